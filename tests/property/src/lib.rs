//! Property-based test suites for the HotWings ledger.
//!
//! Each suite is its own test target (see `Cargo.toml`): tax arithmetic,
//! supply conservation under arbitrary operation sequences, and wallet-cap
//! enforcement.

use hotwings_ledger::{InitializeParams, LockPolicy, TokenLedger, WalletId};

/// Build an initialized ledger and return it with its admin identity and
/// sink identities `(ledger, admin, burn, marketing)`.
pub fn initialized_ledger(
    total_supply: u64,
    lock_policy: LockPolicy,
) -> (TokenLedger, WalletId, WalletId, WalletId) {
    let admin = WalletId::new_unique();
    let burn = WalletId::new_unique();
    let marketing = WalletId::new_unique();
    let mut ledger = TokenLedger::new();
    ledger
        .initialize(
            InitializeParams::new(
                total_supply,
                WalletId::new_unique(),
                WalletId::new_unique(),
                marketing,
                burn,
                admin,
            )
            .with_lock_policy(lock_policy),
        )
        .expect("initialize");
    (ledger, admin, burn, marketing)
}

/// Sum of everything held, liquid or locked.
pub fn total_held(ledger: &TokenLedger) -> u64 {
    ledger
        .wallets()
        .map(|(_, w)| w.balance + w.locked_amount)
        .sum()
}
