//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` (JSON numbers, `DOUBLE PRECISION` columns).
//! Sums are done in `Decimal` and rounded back to 2 decimal places.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price (unit price or order total)
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// NaN and infinities become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `quantity × unit_price` for one line
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Sum of `quantity × unit_price` over `(unit_price, quantity)` pairs
pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let total: Decimal = lines
        .into_iter()
        .map(|(unit_price, quantity)| line_total(unit_price, quantity))
        .sum();

    to_f64(total)
}

/// Check that a monetary amount is finite, non-negative and bounded
pub fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && (0.0..=MAX_PRICE).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let a = 0.1_f64;
        let b = 0.2_f64;
        assert_ne!(a + b, 0.3);

        let sum_dec = to_decimal(a) + to_decimal(b);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(to_f64(line_total(10.99, 3)), 32.97);
        assert_eq!(to_f64(line_total(2.5, 0)), 0.0);
    }

    #[test]
    fn test_order_total_many_small_lines() {
        let lines = std::iter::repeat_n((0.01, 1), 1000);
        assert_eq!(order_total(lines), 10.0);
    }

    #[test]
    fn test_order_total_empty() {
        assert_eq!(order_total(Vec::new()), 0.0);
    }

    #[test]
    fn test_order_total_mixed() {
        let lines = vec![(19.99, 2), (5.25, 4), (0.1, 3)];
        // 39.98 + 21.00 + 0.30
        assert_eq!(order_total(lines), 61.28);
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(to_f64(Decimal::new(1005, 3)), 1.01);
        assert_eq!(to_f64(Decimal::new(-1005, 3)), -1.01);
    }

    #[test]
    fn test_to_decimal_nan_becomes_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_is_valid_amount() {
        assert!(is_valid_amount(0.0));
        assert!(is_valid_amount(149.5));
        assert!(!is_valid_amount(-0.01));
        assert!(!is_valid_amount(f64::NAN));
        assert!(!is_valid_amount(MAX_PRICE * 2.0));
    }
}
