//! Per-holder wallet accounts.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// One holder's position in the ledger.
///
/// `balance` is the liquid, transferable amount; `locked_amount` sits in
/// the vesting pool and is released back into `balance` as milestones are
/// reached. `lifetime_locked` records everything ever locked and is the
/// basis for milestone percentages, so partial releases stay proportional
/// to the original position rather than the shrinking remainder.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct WalletAccount {
    /// Liquid balance available to transfer.
    pub balance: u64,
    /// Tokens currently held in the vesting lock pool.
    pub locked_amount: u64,
    /// Total tokens ever locked by this wallet.
    pub lifetime_locked: u64,
    /// Number of milestones this wallet has already claimed.
    pub milestone_cursor: u32,
}

impl WalletAccount {
    /// Everything this wallet holds, liquid or locked.
    pub fn total_held(&self) -> u64 {
        self.balance.saturating_add(self.locked_amount)
    }
}
