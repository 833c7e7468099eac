//! HotWings runtime handle.
//!
//! Wraps a [`TokenLedger`] in a shared, write-locked handle so independent
//! callers can issue operations in parallel while every state mutation
//! remains serialized and linearizable: each operation runs under the write
//! lock from first precondition check to commit, so concurrent transfers
//! from one sender can never double-spend. Committed operations are
//! announced on a broadcast [`EventStream`].

use hotwings_ledger::{
    InitializeParams, LedgerError, LedgerState, TokenLedger, TransferReceipt, UnlockOutcome,
    WalletAccount, WalletId,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub mod events;

pub use events::{EventStream, LedgerEvent};

/// Cloneable, thread-safe handle to a single ledger.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<TokenLedger>>,
    events: Arc<EventStream>,
}

impl SharedLedger {
    /// A handle around a fresh, uninitialized ledger.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TokenLedger::new())),
            events: Arc::new(EventStream::default()),
        }
    }

    /// Subscribe to committed-operation events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Initialize the ledger. Snapshot of the created state on success.
    pub async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<LedgerState, LedgerError> {
        let mut ledger = self.inner.write().await;
        match ledger.initialize(params) {
            Ok(state) => {
                let state = state.clone();
                info!(total_supply = state.total_supply, "ledger initialized");
                self.events.publish(LedgerEvent::Initialized {
                    total_supply: state.total_supply,
                    admin: state.admin,
                });
                Ok(state)
            }
            Err(err) => {
                warn!(%err, "initialize rejected");
                Err(err)
            }
        }
    }

    /// Overwrite the market cap (admin only).
    pub async fn update_market_cap(
        &self,
        new_cap: u64,
        caller: &WalletId,
    ) -> Result<LedgerState, LedgerError> {
        let mut ledger = self.inner.write().await;
        let reached_before = ledger.state().map_or(0, |s| s.milestones.reached());
        match ledger.update_market_cap(new_cap, caller) {
            Ok(state) => {
                let state = state.clone();
                let newly_reached = state.milestones.reached() - reached_before;
                info!(market_cap = new_cap, newly_reached, "market cap updated");
                self.events.publish(LedgerEvent::MarketCapUpdated {
                    market_cap: new_cap,
                    newly_reached,
                });
                Ok(state)
            }
            Err(err) => {
                warn!(%err, new_cap, "market cap update rejected");
                Err(err)
            }
        }
    }

    /// Issue tokens from the reserve (admin only).
    pub async fn mint(
        &self,
        amount: u64,
        recipient: WalletId,
        caller: &WalletId,
    ) -> Result<WalletAccount, LedgerError> {
        let mut ledger = self.inner.write().await;
        match ledger.mint(amount, recipient, caller) {
            Ok(wallet) => {
                let wallet = *wallet;
                info!(recipient = %recipient, amount, "minted");
                self.events
                    .publish(LedgerEvent::Minted { recipient, amount });
                Ok(wallet)
            }
            Err(err) => {
                warn!(%err, amount, "mint rejected");
                Err(err)
            }
        }
    }

    /// Lock tokens for an investor.
    pub async fn lock_tokens(
        &self,
        amount: u64,
        investor: WalletId,
    ) -> Result<WalletAccount, LedgerError> {
        let mut ledger = self.inner.write().await;
        match ledger.lock_tokens(amount, investor) {
            Ok(wallet) => {
                let wallet = *wallet;
                info!(investor = %investor, amount, "locked");
                self.events
                    .publish(LedgerEvent::Locked { investor, amount });
                Ok(wallet)
            }
            Err(err) => {
                warn!(%err, amount, "lock rejected");
                Err(err)
            }
        }
    }

    /// Release milestone-gated locked tokens.
    pub async fn unlock_tokens(&self, investor: &WalletId) -> Result<UnlockOutcome, LedgerError> {
        let mut ledger = self.inner.write().await;
        match ledger.unlock_tokens(investor) {
            Ok(outcome) => {
                if outcome.released > 0 {
                    info!(investor = %investor, released = outcome.released, "unlocked");
                    self.events.publish(LedgerEvent::Unlocked(outcome));
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(%err, "unlock rejected");
                Err(err)
            }
        }
    }

    /// Execute a taxed transfer.
    pub async fn transfer(
        &self,
        amount: u64,
        sender: &WalletId,
        receiver: &WalletId,
    ) -> Result<TransferReceipt, LedgerError> {
        let mut ledger = self.inner.write().await;
        match ledger.transfer(amount, sender, receiver) {
            Ok(receipt) => {
                info!(
                    sender = %sender,
                    receiver = %receiver,
                    amount,
                    tax = receipt.tax,
                    "transfer committed"
                );
                self.events.publish(LedgerEvent::Transferred(receipt));
                Ok(receipt)
            }
            Err(err) => {
                warn!(%err, amount, "transfer rejected");
                Err(err)
            }
        }
    }

    /// Snapshot of the global state.
    pub async fn state(&self) -> Result<LedgerState, LedgerError> {
        self.inner.read().await.state().cloned()
    }

    /// Snapshot of one wallet account.
    pub async fn wallet(&self, id: &WalletId) -> Option<WalletAccount> {
        self.inner.read().await.wallet(id).copied()
    }

    /// Tokens issued so far.
    pub async fn minted(&self) -> u64 {
        self.inner.read().await.minted()
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new()
    }
}
