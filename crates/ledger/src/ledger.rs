//! The TokenLedger state machine.
//!
//! A ledger is an explicit, caller-owned state object with the lifecycle
//! `new -> initialize -> operate -> drop`. It starts uninitialized; every
//! operation other than `initialize` requires the initialized state. All
//! operations validate their preconditions in full before mutating
//! anything, and multi-wallet mutation goes through [`BalanceJournal`] so
//! a transfer commits all four legs or none of them.

use crate::errors::{LedgerError, Result};
use crate::id::WalletId;
use crate::journal::BalanceJournal;
use crate::milestone::MilestoneSchedule;
use crate::tax::{TaxSchedule, MAX_BPS};
use crate::wallet::WalletAccount;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Per-wallet holding cap: 500 bps = 5% of total supply.
pub const WALLET_CAP_BPS: u16 = 500;

/// How `lock_tokens` sources the tokens it locks.
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
pub enum LockPolicy {
    /// Locking debits the investor's liquid balance.
    #[default]
    DebitFromBalance,
    /// Locking allocates from the unminted reserve straight into the
    /// investor's lock pool, for pre-trading investor allocation.
    CreditExternal,
}

/// Global ledger configuration and counters, fixed or admin-gated after
/// `initialize`.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct LedgerState {
    /// Total token supply; immutable after initialization.
    pub total_supply: u64,
    /// Last market cap reported through `update_market_cap`.
    pub market_cap: u64,
    /// Identity authorized for privileged operations.
    pub admin: WalletId,
    /// External price/cap feed identity. Stored, never dereferenced.
    pub market_cap_oracle: WalletId,
    /// Project proceeds wallet.
    pub project_wallet: WalletId,
    /// Marketing tax sink.
    pub marketing_wallet: WalletId,
    /// Burn tax sink.
    pub burn_wallet: WalletId,
    /// Transfer tax schedule.
    pub tax: TaxSchedule,
    /// Maximum balance a single wallet may reach through transfers.
    pub wallet_cap: u64,
    /// Source policy for `lock_tokens`.
    pub lock_policy: LockPolicy,
    /// Market-cap milestones gating unlocks.
    pub milestones: MilestoneSchedule,
    /// Cumulative tokens issued into circulation (balances plus locked).
    pub minted: u64,
}

/// Everything `initialize` needs. The identity references are supplied
/// once here and are opaque to the ledger thereafter.
#[derive(Debug, Clone)]
pub struct InitializeParams {
    pub total_supply: u64,
    pub market_cap_oracle: WalletId,
    pub project_wallet: WalletId,
    pub marketing_wallet: WalletId,
    pub burn_wallet: WalletId,
    pub admin: WalletId,
    pub tax: TaxSchedule,
    pub lock_policy: LockPolicy,
    pub milestones: MilestoneSchedule,
}

impl InitializeParams {
    /// Parameters with the production defaults: 1.5% tax, balance-debit
    /// locking, the standard milestone schedule.
    pub fn new(
        total_supply: u64,
        market_cap_oracle: WalletId,
        project_wallet: WalletId,
        marketing_wallet: WalletId,
        burn_wallet: WalletId,
        admin: WalletId,
    ) -> Self {
        Self {
            total_supply,
            market_cap_oracle,
            project_wallet,
            marketing_wallet,
            burn_wallet,
            admin,
            tax: TaxSchedule::default(),
            lock_policy: LockPolicy::default(),
            milestones: MilestoneSchedule::standard(),
        }
    }

    pub fn with_tax(mut self, tax: TaxSchedule) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_lock_policy(mut self, lock_policy: LockPolicy) -> Self {
        self.lock_policy = lock_policy;
        self
    }

    pub fn with_milestones(mut self, milestones: MilestoneSchedule) -> Self {
        self.milestones = milestones;
        self
    }
}

/// Receipt for a committed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub sender: WalletId,
    pub receiver: WalletId,
    /// Gross amount debited from the sender.
    pub amount: u64,
    /// Total tax withheld.
    pub tax: u64,
    /// Amount credited to the receiver.
    pub net_amount: u64,
    /// Tax leg credited to the burn sink.
    pub burn_share: u64,
    /// Tax leg credited to the marketing sink.
    pub marketing_share: u64,
}

/// Result of an `unlock_tokens` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockOutcome {
    pub investor: WalletId,
    /// Tokens moved from the lock pool back into the liquid balance.
    pub released: u64,
    /// Milestones newly claimed by this wallet.
    pub milestones_claimed: u32,
}

/// The ledger: singleton state plus the wallet registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    state: Option<LedgerState>,
    wallets: HashMap<WalletId, WalletAccount>,
}

impl TokenLedger {
    /// A fresh, uninitialized ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// The global state. Fails before `initialize`.
    pub fn state(&self) -> Result<&LedgerState> {
        self.state.as_ref().ok_or(LedgerError::Uninitialized)
    }

    /// A holder's account, if it has interacted with the ledger.
    pub fn wallet(&self, id: &WalletId) -> Option<&WalletAccount> {
        self.wallets.get(id)
    }

    /// Every known wallet account.
    pub fn wallets(&self) -> impl Iterator<Item = (&WalletId, &WalletAccount)> {
        self.wallets.iter()
    }

    /// Tokens issued into circulation so far.
    pub fn minted(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.minted)
    }

    /// Create the singleton state. Callable exactly once; the market cap
    /// starts at zero and `total_supply` must be positive.
    pub fn initialize(&mut self, params: InitializeParams) -> Result<&LedgerState> {
        if self.state.is_some() {
            return Err(LedgerError::AlreadyInitialized);
        }
        if params.total_supply == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let wallet_cap = (u128::from(params.total_supply) * u128::from(WALLET_CAP_BPS)
            / u128::from(MAX_BPS)) as u64;

        let state = LedgerState {
            total_supply: params.total_supply,
            market_cap: 0,
            admin: params.admin,
            market_cap_oracle: params.market_cap_oracle,
            project_wallet: params.project_wallet,
            marketing_wallet: params.marketing_wallet,
            burn_wallet: params.burn_wallet,
            tax: params.tax,
            wallet_cap,
            lock_policy: params.lock_policy,
            milestones: params.milestones,
            minted: 0,
        };
        debug!(
            total_supply = state.total_supply,
            wallet_cap,
            tax_rate_bps = state.tax.rate_bps(),
            "ledger initialized"
        );
        Ok(self.state.insert(state))
    }

    /// Overwrite the recorded market cap and advance the milestone
    /// schedule past any newly reached caps. Admin only.
    pub fn update_market_cap(&mut self, new_cap: u64, caller: &WalletId) -> Result<&LedgerState> {
        let state = self.state.as_mut().ok_or(LedgerError::Uninitialized)?;
        if *caller != state.admin {
            return Err(LedgerError::Unauthorized);
        }

        state.market_cap = new_cap;
        let newly_reached = state.milestones.advance(new_cap);
        debug!(
            market_cap = new_cap,
            newly_reached,
            reached = state.milestones.reached(),
            "market cap updated"
        );
        Ok(&*state)
    }

    /// Issue tokens from the unminted reserve into a holder's liquid
    /// balance. Admin only; total issuance can never exceed the supply.
    /// Issuance is not subject to the wallet cap, which governs transfers.
    pub fn mint(&mut self, amount: u64, recipient: WalletId, caller: &WalletId) -> Result<&WalletAccount> {
        let state = self.state.as_mut().ok_or(LedgerError::Uninitialized)?;
        if *caller != state.admin {
            return Err(LedgerError::Unauthorized);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let minted = state
            .minted
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if minted > state.total_supply {
            return Err(LedgerError::ExceedsTotalSupply {
                total_supply: state.total_supply,
                requested: amount,
            });
        }
        let balance = self
            .wallets
            .get(&recipient)
            .map_or(0, |w| w.balance)
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        state.minted = minted;
        debug!(recipient = %recipient, amount, minted, "minted tokens");
        let wallet = self.wallets.entry(recipient).or_default();
        wallet.balance = balance;
        Ok(wallet)
    }

    /// Move tokens into the investor's vesting lock pool.
    ///
    /// Under [`LockPolicy::DebitFromBalance`] the tokens come out of the
    /// investor's liquid balance; under [`LockPolicy::CreditExternal`]
    /// they are allocated from the unminted reserve. Either way the
    /// supply-conservation invariant holds afterwards.
    pub fn lock_tokens(&mut self, amount: u64, investor: WalletId) -> Result<&WalletAccount> {
        let state = self.state.as_mut().ok_or(LedgerError::Uninitialized)?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let current = self.wallets.get(&investor).copied().unwrap_or_default();
        let locked_amount = current
            .locked_amount
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let lifetime_locked = current
            .lifetime_locked
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let balance = match state.lock_policy {
            LockPolicy::DebitFromBalance => current.balance.checked_sub(amount).ok_or(
                LedgerError::InsufficientFunds {
                    required: amount,
                    available: current.balance,
                },
            )?,
            LockPolicy::CreditExternal => {
                let minted = state
                    .minted
                    .checked_add(amount)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
                if minted > state.total_supply {
                    return Err(LedgerError::ExceedsTotalSupply {
                        total_supply: state.total_supply,
                        requested: amount,
                    });
                }
                state.minted = minted;
                current.balance
            }
        };

        debug!(investor = %investor, amount, locked_amount, "locked tokens");
        let wallet = self.wallets.entry(investor).or_default();
        wallet.balance = balance;
        wallet.locked_amount = locked_amount;
        wallet.lifetime_locked = lifetime_locked;
        Ok(wallet)
    }

    /// Release locked tokens for every milestone reached since this
    /// wallet's last claim. Each milestone releases its percentage of the
    /// wallet's lifetime-locked total, capped at what is still locked.
    ///
    /// Unknown wallets and wallets with nothing new to claim get a zero
    /// outcome rather than an error.
    pub fn unlock_tokens(&mut self, investor: &WalletId) -> Result<UnlockOutcome> {
        let state = self.state.as_ref().ok_or(LedgerError::Uninitialized)?;
        let reached = state.milestones.reached();

        let Some(wallet) = self.wallets.get_mut(investor) else {
            return Ok(UnlockOutcome {
                investor: *investor,
                released: 0,
                milestones_claimed: 0,
            });
        };
        if wallet.milestone_cursor >= reached {
            return Ok(UnlockOutcome {
                investor: *investor,
                released: 0,
                milestones_claimed: 0,
            });
        }

        let pct: u64 = state
            .milestones
            .range(wallet.milestone_cursor, reached)
            .iter()
            .map(|m| u64::from(m.unlock_pct))
            .sum();
        let entitled = u128::from(wallet.lifetime_locked) * u128::from(pct) / 100;
        let released = entitled.min(u128::from(wallet.locked_amount)) as u64;
        let milestones_claimed = reached - wallet.milestone_cursor;

        let balance = wallet
            .balance
            .checked_add(released)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        wallet.balance = balance;
        wallet.locked_amount -= released;
        wallet.milestone_cursor = reached;

        debug!(investor = %investor, released, milestones_claimed, "unlocked tokens");
        Ok(UnlockOutcome {
            investor: *investor,
            released,
            milestones_claimed,
        })
    }

    /// Taxed transfer: debit the sender the gross amount, credit the
    /// receiver net of tax, and credit the two tax legs to the configured
    /// sinks. All four legs stage in a journal and commit together.
    ///
    /// The wallet cap is checked against the receiver's balance plus the
    /// gross amount; the sink credits themselves are exempt from the cap.
    pub fn transfer(
        &mut self,
        amount: u64,
        sender: &WalletId,
        receiver: &WalletId,
    ) -> Result<TransferReceipt> {
        let state = self.state.as_ref().ok_or(LedgerError::Uninitialized)?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let available = self.wallets.get(sender).map_or(0, |w| w.balance);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        let receiver_balance = self.wallets.get(receiver).map_or(0, |w| w.balance);
        let resulting = u128::from(receiver_balance) + u128::from(amount);
        if resulting > u128::from(state.wallet_cap) {
            return Err(LedgerError::ExceedsWalletCap {
                cap: state.wallet_cap,
                resulting: resulting.min(u128::from(u64::MAX)) as u64,
            });
        }

        let breakdown = state.tax.assess(amount);
        let burn_wallet = state.burn_wallet;
        let marketing_wallet = state.marketing_wallet;

        let mut journal = BalanceJournal::new(&mut self.wallets);
        journal.debit(*sender, amount)?;
        journal.credit(*receiver, breakdown.net)?;
        journal.credit(burn_wallet, breakdown.burn_share)?;
        journal.credit(marketing_wallet, breakdown.marketing_share)?;
        journal.commit();

        debug!(
            sender = %sender,
            receiver = %receiver,
            amount,
            tax = breakdown.tax,
            net = breakdown.net,
            "transfer committed"
        );
        Ok(TransferReceipt {
            sender: *sender,
            receiver: *receiver,
            amount,
            tax: breakdown.tax,
            net_amount: breakdown.net,
            burn_share: breakdown.burn_share,
            marketing_share: breakdown.marketing_share,
        })
    }
}
