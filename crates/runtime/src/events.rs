//! Ledger event streaming.

use hotwings_ledger::{TransferReceipt, UnlockOutcome, WalletId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// State changes broadcast by a [`SharedLedger`](crate::SharedLedger).
///
/// Events are published only after the underlying operation commits, so a
/// subscriber never observes an event for a rejected call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// The singleton state was created.
    Initialized { total_supply: u64, admin: WalletId },

    /// Market cap overwritten; `newly_reached` milestones crossed.
    MarketCapUpdated { market_cap: u64, newly_reached: u32 },

    /// Tokens issued from the reserve.
    Minted { recipient: WalletId, amount: u64 },

    /// Tokens moved into an investor's lock pool.
    Locked { investor: WalletId, amount: u64 },

    /// Locked tokens released back into circulation.
    Unlocked(UnlockOutcome),

    /// A taxed transfer committed.
    Transferred(TransferReceipt),
}

/// Broadcast fan-out of [`LedgerEvent`]s to any number of subscribers.
pub struct EventStream {
    sender: broadcast::Sender<LedgerEvent>,
}

impl EventStream {
    /// Create a stream buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. Dropped silently when nobody is listening.
    pub fn publish(&self, event: LedgerEvent) {
        if self.sender.send(event).is_err() {
            debug!("ledger event dropped: no subscribers");
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new(1024)
    }
}
