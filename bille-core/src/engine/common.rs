//! Shared helpers for converting and displaying answer values.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Shown in place of a value that has not been answered.
pub const PLACEHOLDER: &str = "—";

/// Converts floating-point input to a [`Decimal`].
///
/// Returns `None` for NaN, infinities, and values outside the range a
/// `Decimal` can hold. Trailing zeros are normalized away.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use bille_core::engine::common::decimal_from_f64;
///
/// assert_eq!(decimal_from_f64(30.0), Some(dec!(30)));
/// assert_eq!(decimal_from_f64(f64::NAN), None);
/// assert_eq!(decimal_from_f64(f64::INFINITY), None);
/// ```
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(|d| d.normalize())
}

/// Formats a yes/no answer, using [`PLACEHOLDER`] when unanswered.
pub fn format_yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats an FPL value as a percentage (`30%`).
pub fn format_percent(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{}%", v.normalize()))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Formats a price in dollars (`$20`).
pub fn format_dollars(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("${}", v.normalize()))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
