//! Market-cap milestone schedule gating investor unlocks.

use crate::errors::{LedgerError, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// A single unlock milestone.
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
pub struct Milestone {
    /// Market cap that must be reached to trigger this milestone.
    pub cap: u64,
    /// Percentage of a wallet's lifetime-locked tokens released.
    pub unlock_pct: u8,
}

/// Ordered milestone table plus a monotonic reached-count.
///
/// `advance` only ever moves the count forward, so a milestone releases its
/// percentage at most once regardless of how the market cap moves later.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct MilestoneSchedule {
    milestones: Vec<Milestone>,
    reached: u32,
}

impl MilestoneSchedule {
    /// Build a schedule. Caps must be strictly ascending and every
    /// percentage at most 100.
    pub fn new(milestones: Vec<Milestone>) -> Result<Self> {
        for pair in milestones.windows(2) {
            if pair[1].cap <= pair[0].cap {
                return Err(LedgerError::InvalidAmount);
            }
        }
        if milestones.iter().any(|m| m.unlock_pct > 100) {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(Self {
            milestones,
            reached: 0,
        })
    }

    /// An empty schedule: nothing ever unlocks through milestones.
    pub const fn none() -> Self {
        Self {
            milestones: Vec::new(),
            reached: 0,
        }
    }

    /// The production HotWings schedule: eight market-cap milestones, 10%
    /// released at each of the first seven and everything at the last.
    pub fn standard() -> Self {
        let caps = [
            45_000u64, 105_500, 225_000, 395_000, 650_000, 997_000, 1_574_000, 2_500_000,
        ];
        let milestones = caps
            .iter()
            .enumerate()
            .map(|(i, &cap)| Milestone {
                cap,
                unlock_pct: if i == caps.len() - 1 { 100 } else { 10 },
            })
            .collect();
        Self {
            milestones,
            reached: 0,
        }
    }

    /// Mark every not-yet-reached milestone at or below `market_cap` as
    /// reached. Returns how many were newly crossed.
    pub fn advance(&mut self, market_cap: u64) -> u32 {
        let before = self.reached;
        while (self.reached as usize) < self.milestones.len()
            && market_cap >= self.milestones[self.reached as usize].cap
        {
            self.reached += 1;
        }
        self.reached - before
    }

    /// Number of milestones reached so far.
    pub const fn reached(&self) -> u32 {
        self.reached
    }

    /// Total number of milestones in the schedule.
    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    /// Whether the schedule has no milestones.
    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }

    /// Milestones in the half-open index range `[from, to)`.
    pub fn range(&self, from: u32, to: u32) -> &[Milestone] {
        &self.milestones[from as usize..to as usize]
    }
}

impl Default for MilestoneSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
