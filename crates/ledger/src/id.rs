//! Opaque wallet identifiers.
//!
//! The ledger never constructs, validates, or dereferences an identity;
//! identifiers exist for equality and lookup only. Callers obtain them from
//! whatever key-management layer they use and hand them in fully formed.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed-width opaque identity reference for a wallet, sink, or authority.
///
/// Displays as base58, matching the notation the surrounding tooling uses
/// for account addresses.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct WalletId([u8; 32]);

impl WalletId {
    /// Byte width of an identifier.
    pub const LEN: usize = 32;

    /// Wrap raw identifier bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw identifier bytes.
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Generate an identifier guaranteed unique within this process.
    ///
    /// Intended for tests and local tooling; production identities come from
    /// the external key-management layer.
    pub fn new_unique() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Self(bytes)
    }
}

impl From<[u8; 32]> for WalletId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for WalletId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletId({self})")
    }
}
