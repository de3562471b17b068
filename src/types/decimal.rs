//! 18-digit fixed-point decimal.
//!
//! Every `uint256` amount read from the protocol contracts is a wei-scaled
//! quantity, so the raw integer maps 1:1 onto the backing value of a [`Decimal`].

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

/// Number of fractional digits.
pub const DECIMAL_PRECISION: usize = 18;

const SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

// Matches the exponent cap of the on-chain `_decPow`.
const MAX_EXPONENT: u64 = 525_600_000;

/// Non-negative fixed-point number with 18 decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(U256);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalParseError {
    #[error("empty decimal string")]
    Empty,
    #[error("negative decimals are not representable: {0}")]
    Negative(String),
    #[error("invalid decimal string: {0}")]
    Invalid(String),
    #[error("too many fractional digits (max {DECIMAL_PRECISION}): {0}")]
    TooPrecise(String),
    #[error("decimal out of range: {0}")]
    Overflow(String),
}

impl Decimal {
    pub const ZERO: Decimal = Decimal(U256::ZERO);
    pub const ONE: Decimal = Decimal(SCALE);
    pub const MAX: Decimal = Decimal(U256::MAX);

    /// Wrap a raw 18-decimal integer, e.g. a `uint256` returned by a contract.
    pub const fn from_raw(raw: U256) -> Self {
        Decimal(raw)
    }

    /// Const constructor for raw values that fit in a single limb.
    pub const fn from_raw_u64(raw: u64) -> Self {
        Decimal(U256::from_limbs([raw, 0, 0, 0]))
    }

    /// The backing 18-decimal integer.
    pub const fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_add(rhs.0).map(Decimal)
    }

    pub fn checked_sub(self, rhs: Decimal) -> Option<Decimal> {
        self.0.checked_sub(rhs.0).map(Decimal)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_sub(rhs.0))
    }

    /// Addition clamped at [`Decimal::MAX`].
    pub fn saturating_add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0.saturating_add(rhs.0))
    }

    /// Multiplication rounding down to 18 places. `None` only when the result
    /// itself does not fit.
    pub fn checked_mul(self, rhs: Decimal) -> Option<Decimal> {
        if let Some(product) = self.0.checked_mul(rhs.0) {
            return Some(Decimal(product / SCALE));
        }

        // a * b / S == (a / S) * b + (a % S) * b / S, splitting the larger factor.
        let (big, small) = if self.0 >= rhs.0 {
            (self.0, rhs.0)
        } else {
            (rhs.0, self.0)
        };
        let whole = (big / SCALE).checked_mul(small)?;
        let fraction = (big % SCALE).checked_mul(small)? / SCALE;
        whole.checked_add(fraction).map(Decimal)
    }

    /// Multiplication clamped at [`Decimal::MAX`].
    pub fn saturating_mul(self, rhs: Decimal) -> Decimal {
        self.checked_mul(rhs).unwrap_or(Decimal::MAX)
    }

    /// Division rounding down to 18 places. `None` when dividing by zero or
    /// when the quotient does not fit.
    pub fn checked_div(self, rhs: Decimal) -> Option<Decimal> {
        if rhs.is_zero() {
            return None;
        }
        if let Some(scaled) = self.0.checked_mul(SCALE) {
            return Some(Decimal(scaled / rhs.0));
        }

        // Whole part first, then the 18 fractional digits by long division.
        // Each digit is found by adding the remainder ten times, reducing
        // modulo the divisor as it goes, so no intermediate exceeds 2 * rhs.
        let whole = (self.0 / rhs.0).checked_mul(SCALE)?;
        let ten = U256::from(10u64);
        let mut remainder = self.0 % rhs.0;
        let mut fraction = U256::ZERO;
        for _ in 0..DECIMAL_PRECISION {
            let mut digit = 0u64;
            let mut next = U256::ZERO;
            for _ in 0..10 {
                let (sum, overflow) = next.overflowing_add(remainder);
                if overflow || sum >= rhs.0 {
                    next = sum.wrapping_sub(rhs.0);
                    digit += 1;
                } else {
                    next = sum;
                }
            }
            fraction = fraction * ten + U256::from(digit);
            remainder = next;
        }
        whole.checked_add(fraction).map(Decimal)
    }

    /// Raise to an integer power by repeated squaring, rounding down at each step.
    ///
    /// Exponents above 525,600,000 (1000 years in minutes) are capped; the
    /// result saturates at [`Decimal::MAX`].
    pub fn pow(self, exponent: u64) -> Decimal {
        let mut n = exponent.min(MAX_EXPONENT);
        if n == 0 {
            return Decimal::ONE;
        }

        let mut x = self;
        let mut y = Decimal::ONE;
        while n > 1 {
            if n % 2 == 1 {
                y = y.saturating_mul(x);
            }
            x = x.saturating_mul(x);
            n /= 2;
        }
        x.saturating_mul(y)
    }

    fn fraction_digits(&self) -> String {
        // The remainder is below 10^18 and therefore fits in the low limb.
        let fraction = (self.0 % SCALE).as_limbs()[0];
        format!("{:0width$}", fraction, width = DECIMAL_PRECISION)
    }
}

impl From<u64> for Decimal {
    fn from(whole: u64) -> Self {
        Decimal(U256::from(whole) * SCALE)
    }
}

impl Add for Decimal {
    type Output = Decimal;

    fn add(self, rhs: Decimal) -> Decimal {
        self.checked_add(rhs).expect("Decimal addition overflow")
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, rhs: Decimal) -> Decimal {
        self.checked_sub(rhs).expect("Decimal subtraction underflow")
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, rhs: Decimal) -> Decimal {
        self.checked_mul(rhs).expect("Decimal multiplication overflow")
    }
}

impl Div for Decimal {
    type Output = Decimal;

    fn div(self, rhs: Decimal) -> Decimal {
        self.checked_div(rhs).expect("Decimal division by zero")
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let digits = self.fraction_digits();

        match f.precision() {
            Some(0) => write!(f, "{}", whole),
            Some(precision) => {
                let mut fraction: String = digits.chars().take(precision).collect();
                while fraction.len() < precision {
                    fraction.push('0');
                }
                write!(f, "{}.{}", whole, fraction)
            }
            None => {
                let trimmed = digits.trim_end_matches('0');
                if trimmed.is_empty() {
                    write!(f, "{}", whole)
                } else {
                    write!(f, "{}.{}", whole, trimmed)
                }
            }
        }
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DecimalParseError::Empty);
        }
        if s.starts_with('-') {
            return Err(DecimalParseError::Negative(s.to_string()));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(DecimalParseError::Invalid(s.to_string()));
        }
        if fraction.len() > DECIMAL_PRECISION {
            return Err(DecimalParseError::TooPrecise(s.to_string()));
        }

        let whole = if whole.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(whole, 10)
                .map_err(|_| DecimalParseError::Overflow(s.to_string()))?
        };
        let fraction = format!("{:0<width$}", fraction, width = DECIMAL_PRECISION);
        let fraction = U256::from_str_radix(&fraction, 10)
            .map_err(|_| DecimalParseError::Invalid(s.to_string()))?;

        whole
            .checked_mul(SCALE)
            .and_then(|scaled| scaled.checked_add(fraction))
            .map(Decimal)
            .ok_or_else(|| DecimalParseError::Overflow(s.to_string()))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_raw_mapping() {
        let one = Decimal::from_raw(U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(one, Decimal::ONE);
        assert_eq!(Decimal::from(2u64).raw(), U256::from(2_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Decimal::ONE.to_string(), "1");
        assert_eq!(Decimal::ZERO.to_string(), "0");
        assert_eq!(d("2.250").to_string(), "2.25");
        assert_eq!(Decimal::from_raw(U256::from(1u64)).to_string(), "0.000000000000000001");
    }

    #[test]
    fn test_display_precision_rounds_down() {
        assert_eq!(format!("{:.2}", d("1.239")), "1.23");
        assert_eq!(format!("{:.0}", d("7.99")), "7");
        assert_eq!(format!("{:.3}", d("5")), "5.000");
    }

    #[test]
    fn test_parse() {
        assert_eq!(d("0.5"), Decimal::from_raw_u64(500_000_000_000_000_000));
        assert_eq!(d(".5"), d("0.5"));
        assert_eq!(d("10"), Decimal::from(10u64));
        assert_eq!("".parse::<Decimal>(), Err(DecimalParseError::Empty));
        assert!(matches!("-1".parse::<Decimal>(), Err(DecimalParseError::Negative(_))));
        assert!(matches!("1.2.3".parse::<Decimal>(), Err(DecimalParseError::Invalid(_))));
        assert!(matches!(
            "0.0000000000000000001".parse::<Decimal>(),
            Err(DecimalParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(d("1.5") + d("2.25"), d("3.75"));
        assert_eq!(d("3") - d("0.5"), d("2.5"));
        assert_eq!(d("1.5") * d("2"), d("3"));
        assert_eq!(d("1") / d("3"), d("0.333333333333333333"));
        assert_eq!(d("1").checked_div(Decimal::ZERO), None);
        assert_eq!(d("1").saturating_sub(d("2")), Decimal::ZERO);
        assert_eq!(d("1").checked_sub(d("2")), None);
        assert!(d("0.1") < d("0.2"));
    }

    #[test]
    fn test_mul_with_overflowing_intermediate_product() {
        let big = Decimal::from_raw(U256::from(1u64) << 200usize);
        let million = Decimal::from(1_000_000u64);
        let expected =
            Decimal::from_raw((U256::from(1u64) << 200usize) * U256::from(1_000_000u64));

        assert_eq!(big.checked_mul(million), Some(expected));
        assert_eq!(million.checked_mul(big), Some(expected));
        assert_eq!(Decimal::MAX.checked_mul(d("2")), None);
        assert_eq!(Decimal::MAX.saturating_mul(d("2")), Decimal::MAX);
        assert_eq!(Decimal::MAX.saturating_add(Decimal::ONE), Decimal::MAX);
    }

    #[test]
    fn test_div_with_overflowing_scaled_dividend() {
        let big = Decimal::from_raw(U256::from(3u64) << 200usize);
        let divisor = Decimal::from_raw(U256::from(2u64) << 200usize);
        assert_eq!(big.checked_div(divisor), Some(d("1.5")));

        let third = Decimal::from_raw(U256::from(1u64) << 200usize)
            .checked_div(Decimal::from_raw(U256::from(3u64) << 200usize));
        assert_eq!(third, Some(d("0.333333333333333333")));
        assert_eq!(Decimal::MAX.checked_div(d("0.5")), None);

        let near_max = Decimal::MAX.saturating_sub(Decimal::from_raw(U256::from(1u64)));
        assert_eq!(near_max.checked_div(Decimal::MAX), Some(d("0.999999999999999999")));
        assert_eq!(Decimal::MAX.checked_div(Decimal::MAX), Some(Decimal::ONE));
    }

    #[test]
    fn test_pow() {
        assert_eq!(d("2").pow(10), d("1024"));
        assert_eq!(d("0.5").pow(0), Decimal::ONE);
        assert_eq!(d("0.5").pow(2), d("0.25"));
        assert!(d("0.999").pow(1000) < d("0.37"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&d("1.5")).unwrap();
        assert_eq!(json, "\"1.5\"");
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d("1.5"));
    }
}
