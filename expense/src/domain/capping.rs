//! Claim capping rules.
//!
//! There are two distinct caps. A single transaction is clamped before it is
//! stored, and the sum of one day's transactions is clamped again when the
//! claimable amount is derived for summaries and exports.

pub const DAILY_CAP: f64 = 50.0;
pub const TRANSACTION_CAP: f64 = 50.0;

/// Rounds to cents, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Amount stored for a single transaction.
pub fn cap_transaction(amount: f64) -> f64 {
    round_cents(amount.min(TRANSACTION_CAP))
}

/// Claimable part of a daily total.
pub fn claimable(daily_total: f64) -> f64 {
    round_cents(daily_total.min(DAILY_CAP))
}

/// Running sum of one day's amounts, rounded after every addition.
pub fn daily_total<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts
        .into_iter()
        .fold(0.0, |total, amount| round_cents(total + amount))
}

pub fn claimable_daily<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    claimable(daily_total(amounts))
}

/// Adds to a running total, keeping it on whole cents.
pub fn accumulate(total: f64, amount: f64) -> f64 {
    round_cents(total + amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(12.346), 12.35);
        assert_eq!(round_cents(19.994), 19.99);
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-0.125), -0.13);
    }

    #[test]
    fn test_cap_transaction() {
        assert_eq!(cap_transaction(65.0), 50.0);
        assert_eq!(cap_transaction(50.004), 50.0);
        assert_eq!(cap_transaction(12.346), 12.35);
        assert_eq!(cap_transaction(0.01), 0.01);
    }

    #[test]
    fn test_claimable_daily() {
        assert_eq!(daily_total([30.0, 40.0]), 70.0);
        assert_eq!(claimable_daily([30.0, 40.0]), 50.0);
        assert_eq!(claimable_daily([10.1, 20.2]), 30.3);
        assert_eq!(claimable_daily(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn test_caps_are_independent() {
        // A day with several capped transactions is still capped as a whole.
        let stored: Vec<f64> = [65.0, 80.0].into_iter().map(cap_transaction).collect();
        assert_eq!(stored, vec![50.0, 50.0]);
        assert_eq!(daily_total(stored.clone()), 100.0);
        assert_eq!(claimable_daily(stored), 50.0);
    }

    #[quickcheck]
    fn prop_amounts_over_cap_are_stored_as_cap(cents: u32) -> bool {
        let amount = 50.0 + (cents as f64 + 1.0) / 100.0;
        cap_transaction(amount) == 50.0
    }

    #[quickcheck]
    fn prop_claimable_daily_is_order_independent(cents: Vec<u16>) -> bool {
        let amounts: Vec<f64> = cents.iter().map(|c| *c as f64 / 100.0).collect();
        let mut reversed = amounts.clone();
        reversed.reverse();

        let expected = round_cents(cents.iter().map(|c| *c as u64).sum::<u64>() as f64 / 100.0)
            .min(DAILY_CAP);

        claimable_daily(amounts) == expected && claimable_daily(reversed) == expected
    }
}
