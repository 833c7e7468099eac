//! Staged balance mutation with atomic commit.
//!
//! A transfer touches up to four wallets. The journal stages every debit
//! and credit against prospective balances first; nothing in the underlying
//! wallet map changes until `commit`. Dropping the journal without
//! committing discards the staged writes, so a precondition failure
//! discovered mid-operation leaves the ledger untouched.

use crate::errors::{LedgerError, Result};
use crate::id::WalletId;
use crate::wallet::WalletAccount;
use std::collections::HashMap;

/// In-flight balance writes over a wallet map.
pub struct BalanceJournal<'a> {
    wallets: &'a mut HashMap<WalletId, WalletAccount>,
    staged: HashMap<WalletId, u64>,
}

impl<'a> BalanceJournal<'a> {
    /// Open a journal over the wallet registry.
    pub fn new(wallets: &'a mut HashMap<WalletId, WalletAccount>) -> Self {
        Self {
            wallets,
            staged: HashMap::new(),
        }
    }

    /// Current prospective balance for a wallet: staged value if present,
    /// committed value otherwise, zero for wallets not yet seen.
    pub fn balance(&self, id: &WalletId) -> u64 {
        self.staged
            .get(id)
            .copied()
            .or_else(|| self.wallets.get(id).map(|w| w.balance))
            .unwrap_or(0)
    }

    /// Stage a debit. Fails when the prospective balance cannot cover it.
    pub fn debit(&mut self, id: WalletId, amount: u64) -> Result<()> {
        let available = self.balance(&id);
        let next = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                required: amount,
                available,
            })?;
        self.staged.insert(id, next);
        Ok(())
    }

    /// Stage a credit.
    pub fn credit(&mut self, id: WalletId, amount: u64) -> Result<()> {
        let next = self
            .balance(&id)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        self.staged.insert(id, next);
        Ok(())
    }

    /// Apply every staged write, creating wallet accounts on first touch.
    pub fn commit(self) {
        for (id, balance) in self.staged {
            self.wallets.entry(id).or_default().balance = balance;
        }
    }
}
