//! Borrowing and redemption fee calculator.
//!
//! The base rate decays every minute since the last fee operation and is bumped
//! by redemptions; borrowing and redemption rates are floored and capped around it.

use super::decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-minute decay applied to the base rate (half-life of 12 hours).
pub const MINUTE_DECAY_FACTOR: Decimal = Decimal::from_raw_u64(999_037_758_833_783_000);

/// Divisor applied to the redeemed fraction of supply when bumping the base rate.
pub const BETA: Decimal = Decimal::from_raw_u64(2_000_000_000_000_000_000);

/// 0.5%
pub const MINIMUM_BORROWING_RATE: Decimal = Decimal::from_raw_u64(5_000_000_000_000_000);

/// 5%
pub const MAXIMUM_BORROWING_RATE: Decimal = Decimal::from_raw_u64(50_000_000_000_000_000);

/// 0.5%
pub const MINIMUM_REDEMPTION_RATE: Decimal = Decimal::from_raw_u64(5_000_000_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    base_rate_without_decay: Decimal,
    minute_decay_factor: Decimal,
    beta: Decimal,
    /// Unix seconds.
    last_fee_operation_time: u64,
    /// Unix seconds.
    time_of_latest_block: u64,
    recovery_mode: bool,
}

impl Fees {
    pub fn new(
        base_rate_without_decay: Decimal,
        minute_decay_factor: Decimal,
        beta: Decimal,
        last_fee_operation_time: u64,
        time_of_latest_block: u64,
        recovery_mode: bool,
    ) -> Self {
        Self {
            base_rate_without_decay,
            minute_decay_factor,
            beta,
            last_fee_operation_time,
            time_of_latest_block,
            recovery_mode,
        }
    }

    pub fn recovery_mode(&self) -> bool {
        self.recovery_mode
    }

    pub fn time_of_latest_block(&self) -> u64 {
        self.time_of_latest_block
    }

    /// Base rate at `when` (unix seconds), defaulting to the latest block time.
    pub fn base_rate(&self, when: Option<u64>) -> Decimal {
        let when = when.unwrap_or(self.time_of_latest_block);
        let minutes = when.saturating_sub(self.last_fee_operation_time) / 60;
        self.base_rate_without_decay
            .saturating_mul(self.minute_decay_factor.pow(minutes))
    }

    /// Fraction of borrowed LUSD charged as fee. Borrowing is free in recovery mode.
    pub fn borrowing_rate(&self, when: Option<u64>) -> Decimal {
        if self.recovery_mode {
            return Decimal::ZERO;
        }
        MINIMUM_BORROWING_RATE
            .saturating_add(self.base_rate(when))
            .min(MAXIMUM_BORROWING_RATE)
    }

    /// Fraction of redeemed collateral charged as fee when redeeming
    /// `redeemed_fraction_of_supply` of the LUSD supply. Capped at 100%.
    pub fn redemption_rate(
        &self,
        redeemed_fraction_of_supply: Decimal,
        when: Option<u64>,
    ) -> Decimal {
        let bump = if self.beta.is_zero() {
            if redeemed_fraction_of_supply.is_zero() {
                Decimal::ZERO
            } else {
                return Decimal::ONE;
            }
        } else {
            match redeemed_fraction_of_supply.checked_div(self.beta) {
                Some(bump) => bump,
                // Quotient beyond Decimal::MAX is far past the cap.
                None => return Decimal::ONE,
            }
        };

        MINIMUM_REDEMPTION_RATE
            .saturating_add(self.base_rate(when))
            .saturating_add(bump)
            .min(Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn fees(base_rate: &str, elapsed_secs: u64, recovery_mode: bool) -> Fees {
        Fees::new(
            d(base_rate),
            MINUTE_DECAY_FACTOR,
            BETA,
            1_000_000,
            1_000_000 + elapsed_secs,
            recovery_mode,
        )
    }

    #[test]
    fn test_base_rate_decays_per_whole_minute() {
        let f = fees("0.01", 59, false);
        assert_eq!(f.base_rate(None), d("0.01"));

        let f = fees("0.01", 12 * 60 * 60, false);
        let half = f.base_rate(None);
        assert!(half > d("0.00499") && half < d("0.00501"), "got {}", half);
    }

    #[test]
    fn test_borrowing_rate_floor_and_cap() {
        assert_eq!(fees("0", 0, false).borrowing_rate(None), MINIMUM_BORROWING_RATE);
        assert_eq!(fees("0.01", 0, false).borrowing_rate(None), d("0.015"));
        assert_eq!(fees("0.2", 0, false).borrowing_rate(None), MAXIMUM_BORROWING_RATE);
        assert_eq!(fees("0.2", 0, true).borrowing_rate(None), Decimal::ZERO);
    }

    #[test]
    fn test_redemption_rate() {
        let f = fees("0.01", 0, false);
        assert_eq!(f.redemption_rate(Decimal::ZERO, None), d("0.015"));
        assert_eq!(f.redemption_rate(d("0.1"), None), d("0.065"));
        assert_eq!(f.redemption_rate(d("5"), None), Decimal::ONE);
    }

    #[test]
    fn test_redemption_rate_caps_huge_fractions() {
        let f = fees("0.01", 0, false);
        let huge = Decimal::from_raw(U256::MAX >> 4usize);
        assert_eq!(f.redemption_rate(huge, None), Decimal::ONE);
        assert_eq!(f.redemption_rate(Decimal::MAX, None), Decimal::ONE);
    }

    #[test]
    fn test_redemption_rate_with_zero_beta() {
        let f = Fees::new(d("0.01"), MINUTE_DECAY_FACTOR, Decimal::ZERO, 0, 0, false);
        assert_eq!(f.redemption_rate(Decimal::ZERO, None), d("0.015"));
        assert_eq!(f.redemption_rate(d("0.001"), None), Decimal::ONE);
    }

    #[test]
    fn test_huge_base_rate_does_not_panic() {
        let f = Fees::new(Decimal::MAX, MINUTE_DECAY_FACTOR, BETA, 0, 600, false);
        assert_eq!(f.borrowing_rate(None), MAXIMUM_BORROWING_RATE);
        assert_eq!(f.redemption_rate(d("0.1"), None), Decimal::ONE);
    }

    #[test]
    fn test_explicit_time_overrides_block_time() {
        let f = fees("0.01", 0, false);
        assert!(f.base_rate(Some(1_000_000 + 3600)) < f.base_rate(None));
    }
}
