//! HotWings token ledger.
//!
//! A single-writer token-ledger state machine: capped per-wallet holdings
//! (5% of total supply), taxed transfers (1.5%, split between a burn sink
//! and a marketing sink), investor vesting locks, and market-cap milestone
//! unlocks. The ledger is a plain owned value — no ambient globals, no
//! transport, no host-chain account model. Identities are opaque 32-byte
//! keys the ledger only ever compares.
//!
//! ```
//! use hotwings_ledger::{InitializeParams, TokenLedger, WalletId};
//!
//! let admin = WalletId::new_unique();
//! let mut ledger = TokenLedger::new();
//! ledger
//!     .initialize(InitializeParams::new(
//!         1_000_000,
//!         WalletId::new_unique(), // market cap oracle
//!         WalletId::new_unique(), // project wallet
//!         WalletId::new_unique(), // marketing sink
//!         WalletId::new_unique(), // burn sink
//!         admin,
//!     ))
//!     .unwrap();
//!
//! let holder = WalletId::new_unique();
//! ledger.mint(40_000, holder, &admin).unwrap();
//! let receipt = ledger
//!     .transfer(10_000, &holder, &WalletId::new_unique())
//!     .unwrap();
//! assert_eq!(receipt.tax, 150);
//! assert_eq!(receipt.net_amount, 9_850);
//! ```

pub mod errors;
pub mod id;
pub mod journal;
pub mod ledger;
pub mod milestone;
pub mod tax;
pub mod wallet;

pub use errors::{LedgerError, Result};
pub use id::WalletId;
pub use journal::BalanceJournal;
pub use ledger::{
    InitializeParams, LedgerState, LockPolicy, TokenLedger, TransferReceipt, UnlockOutcome,
    WALLET_CAP_BPS,
};
pub use milestone::{Milestone, MilestoneSchedule};
pub use tax::{TaxBreakdown, TaxSchedule, DEFAULT_TAX_RATE_BPS, MAX_BPS};
pub use wallet::WalletAccount;
