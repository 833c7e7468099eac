//! Transfer tax arithmetic.
//!
//! Every transfer is assessed a flat basis-point tax, split between the
//! burn sink and the marketing sink. All math is integer floor over u128
//! intermediates; the split always reassembles the gross amount exactly.

use crate::errors::{LedgerError, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Maximum basis points (100%).
pub const MAX_BPS: u16 = 10_000;

/// Default transfer tax: 150 bps = 1.5%.
pub const DEFAULT_TAX_RATE_BPS: u16 = 150;

/// Flat basis-point transfer tax, split evenly between the two sinks.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct TaxSchedule {
    rate_bps: u16,
}

impl TaxSchedule {
    /// Build a schedule with the given rate. Rejects rates above 100%.
    pub fn new(rate_bps: u16) -> Result<Self> {
        if rate_bps > MAX_BPS {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(Self { rate_bps })
    }

    /// A schedule that charges nothing.
    pub const fn zero() -> Self {
        Self { rate_bps: 0 }
    }

    /// Configured rate in basis points.
    pub const fn rate_bps(self) -> u16 {
        self.rate_bps
    }

    /// Assess the tax on a gross transfer amount.
    ///
    /// `tax = floor(amount * rate / 10_000)`, `marketing = floor(tax / 2)`,
    /// and the burn sink takes the rest of the tax. When the tax is odd the
    /// extra unit therefore burns rather than leaking out of the supply.
    pub fn assess(self, amount: u64) -> TaxBreakdown {
        let tax = (u128::from(amount) * u128::from(self.rate_bps) / u128::from(MAX_BPS)) as u64;
        let marketing_share = tax / 2;
        TaxBreakdown {
            amount,
            tax,
            burn_share: tax - marketing_share,
            marketing_share,
            net: amount - tax,
        }
    }
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self {
            rate_bps: DEFAULT_TAX_RATE_BPS,
        }
    }
}

/// Result of assessing the tax on one transfer.
///
/// Invariant: `net + burn_share + marketing_share == amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    /// Gross amount debited from the sender.
    pub amount: u64,
    /// Total tax withheld.
    pub tax: u64,
    /// Portion of the tax routed to the burn sink.
    pub burn_share: u64,
    /// Portion of the tax routed to the marketing sink.
    pub marketing_share: u64,
    /// Amount credited to the receiver.
    pub net: u64,
}
