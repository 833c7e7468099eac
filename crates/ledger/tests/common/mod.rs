//! Shared test fixtures.
#![allow(dead_code)] // not every test binary uses every helper

use hotwings_ledger::{InitializeParams, LockPolicy, TokenLedger, WalletId};

/// An initialized ledger plus the identities it was configured with.
pub struct TestLedger {
    pub ledger: TokenLedger,
    pub admin: WalletId,
    pub oracle: WalletId,
    pub project: WalletId,
    pub marketing: WalletId,
    pub burn: WalletId,
}

impl TestLedger {
    pub fn new(total_supply: u64) -> Self {
        Self::with_lock_policy(total_supply, LockPolicy::DebitFromBalance)
    }

    pub fn with_lock_policy(total_supply: u64, lock_policy: LockPolicy) -> Self {
        let admin = WalletId::new_unique();
        let oracle = WalletId::new_unique();
        let project = WalletId::new_unique();
        let marketing = WalletId::new_unique();
        let burn = WalletId::new_unique();

        let mut ledger = TokenLedger::new();
        ledger
            .initialize(
                InitializeParams::new(total_supply, oracle, project, marketing, burn, admin)
                    .with_lock_policy(lock_policy),
            )
            .expect("initialize");

        Self {
            ledger,
            admin,
            oracle,
            project,
            marketing,
            burn,
        }
    }

    /// Liquid balance of a wallet, zero if unknown.
    pub fn balance(&self, id: &WalletId) -> u64 {
        self.ledger.wallet(id).map_or(0, |w| w.balance)
    }

    /// Locked amount of a wallet, zero if unknown.
    pub fn locked(&self, id: &WalletId) -> u64 {
        self.ledger.wallet(id).map_or(0, |w| w.locked_amount)
    }

    /// Conservation check: everything held equals everything issued.
    pub fn assert_conserved(&self) {
        let held: u64 = self
            .ledger
            .wallets()
            .map(|(_, w)| w.balance + w.locked_amount)
            .sum();
        assert_eq!(held, self.ledger.minted());
        assert!(self.ledger.minted() <= self.ledger.state().expect("state").total_supply);
    }
}
