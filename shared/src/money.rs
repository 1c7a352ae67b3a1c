//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` naira (JSON and SQLite `REAL`), but every sum and
//! product is computed with `Decimal` and rounded back to 2 decimal places.

use rust_decimal::prelude::*;

use crate::error::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price (₦1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

/// Convert f64 to Decimal; non-finite input becomes zero
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round an f64 amount to 2 decimal places
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// `unit_price × quantity`
pub fn line_total(unit_price: f64, quantity: i32) -> Decimal {
    to_decimal(unit_price) * Decimal::from(quantity)
}

/// Sum of `(unit_price, quantity)` lines as a rounded f64
pub fn sum_lines<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let total: Decimal = lines
        .into_iter()
        .map(|(price, qty)| line_total(price, qty))
        .sum();
    to_f64(total)
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff <= MONEY_TOLERANCE
}

/// Reject NaN, infinities, negatives and absurd prices
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} must be a non-negative number, got {value}"),
        )
        .with_detail("field", field));
    }
    if value > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Reject NaN, infinities, negatives and totals no cart of `lines` lines can reach
pub fn validate_total(value: f64, lines: usize, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} must be a non-negative number, got {value}"),
        )
        .with_detail("field", field));
    }
    let max = MAX_PRICE * f64::from(MAX_QUANTITY) * lines as f64;
    if value > max {
        return Err(AppError::with_message(
            ErrorCode::InvalidAmount,
            format!("{field} exceeds maximum allowed ({max}), got {value}"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("quantity must be between 1 and {MAX_QUANTITY}, got {quantity}"),
        )
        .with_detail("field", "quantity"));
    }
    Ok(())
}

/// Naira display with two decimals, e.g. `₦1700.00`
pub fn format_naira(amount: f64) -> String {
    format!("₦{:.2}", round_money(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_lines_example_cart() {
        // 2 × Visionary Popcorn + 1 × Sachet Water
        assert_eq!(sum_lines([(600.0, 2), (500.0, 1)]), 1700.0);
    }

    #[test]
    fn test_sum_lines_avoids_float_drift() {
        assert_eq!(sum_lines([(0.1, 3)]), 0.3);
        assert_eq!(sum_lines([(0.1, 1), (0.2, 1)]), 0.3);
    }

    #[test]
    fn test_sum_lines_empty() {
        assert_eq!(sum_lines(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_money_eq_tolerance() {
        assert!(money_eq(1700.0, 1700.0));
        assert!(money_eq(1700.0, 1700.005));
        assert!(!money_eq(1700.0, 1700.02));
        assert!(!money_eq(1700.0, 1600.0));
    }

    #[test]
    fn test_validate_total_scales_with_lines() {
        // a full line of popcorn is well past the unit price cap
        assert!(validate_total(600.0 * f64::from(MAX_QUANTITY), 1, "total_amount").is_ok());
        assert!(validate_total(MAX_PRICE * f64::from(MAX_QUANTITY), 1, "total_amount").is_ok());

        let err = validate_total(MAX_PRICE * f64::from(MAX_QUANTITY) + 1.0, 1, "total_amount")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert!(validate_total(MAX_PRICE * f64::from(MAX_QUANTITY) + 1.0, 2, "total_amount").is_ok());

        assert!(validate_total(-0.01, 1, "total_amount").is_err());
        assert!(validate_total(f64::NAN, 1, "total_amount").is_err());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.006), 10.01);
        assert_eq!(round_money(10.004), 10.0);
    }

    #[test]
    fn test_to_decimal_non_finite() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(600.0, "unit_price").is_ok());
        assert!(validate_price(0.0, "unit_price").is_ok());

        let err = validate_price(-1.0, "unit_price").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.field(), Some("unit_price"));

        assert!(validate_price(f64::NAN, "total_amount").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "unit_price").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert_eq!(
            validate_quantity(0).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_format_naira() {
        assert_eq!(format_naira(1700.0), "₦1700.00");
        assert_eq!(format_naira(299.5), "₦299.50");
    }
}
