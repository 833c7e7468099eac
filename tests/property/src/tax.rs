//! Tax arithmetic properties.

use hotwings_ledger::{TaxSchedule, MAX_BPS};
use proptest::prelude::*;

proptest! {
    /// The split always reassembles the gross amount exactly, for any
    /// amount and any legal rate.
    #[test]
    fn split_reassembles_amount(amount in any::<u64>(), rate in 0u16..=MAX_BPS) {
        let schedule = TaxSchedule::new(rate).unwrap();
        let b = schedule.assess(amount);
        prop_assert_eq!(
            b.net as u128 + b.burn_share as u128 + b.marketing_share as u128,
            b.amount as u128
        );
    }

    /// Tax is the integer floor of amount * rate / 10_000.
    #[test]
    fn tax_is_floored_bps(amount in any::<u64>(), rate in 0u16..=MAX_BPS) {
        let b = TaxSchedule::new(rate).unwrap().assess(amount);
        let expected = u128::from(amount) * u128::from(rate) / u128::from(MAX_BPS);
        prop_assert_eq!(u128::from(b.tax), expected);
        prop_assert!(b.tax <= amount);
    }

    /// The two sinks differ by at most the odd unit, and the burn sink is
    /// the one that takes it.
    #[test]
    fn burn_sink_takes_the_remainder(amount in any::<u64>(), rate in 0u16..=MAX_BPS) {
        let b = TaxSchedule::new(rate).unwrap().assess(amount);
        prop_assert!(b.burn_share >= b.marketing_share);
        prop_assert!(b.burn_share - b.marketing_share <= 1);
        prop_assert_eq!(b.burn_share - b.marketing_share, b.tax % 2);
    }

    /// Assessment is deterministic.
    #[test]
    fn assessment_is_deterministic(amount in any::<u64>()) {
        let schedule = TaxSchedule::default();
        prop_assert_eq!(schedule.assess(amount), schedule.assess(amount));
    }
}
