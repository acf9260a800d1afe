//! Turning operator-typed text into engine answers.

use bille_core::{AnswerValue, DrugType, FieldName, InsuranceType, RwPrimaryStatus};
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when text cannot be read as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Number(#[from] ParseDecimalError),

    #[error("'{input}' is not a valid answer for {field}")]
    Unrecognized { field: FieldName, input: String },
}

/// Trims whitespace, a leading `$`, a trailing `%` and thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('$').unwrap_or(s);
    let s = s.strip_suffix('%').unwrap_or(s);
    s.trim().replace(',', "")
}

/// Parses a percentage or dollar amount.
///
/// Accepts `"30"`, `"30%"`, `"$1,250.00"`. Unlike a form field, empty input
/// is an error: there is no sensible default for FPL or a price.
///
/// ```
/// use bille_cli::input::parse_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_decimal(" $1,250.50 ").unwrap(), dec!(1250.50));
/// assert_eq!(parse_decimal("135%").unwrap(), dec!(135));
/// ```
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    normalize_decimal_input(s)
        .parse()
        .map_err(|source| ParseDecimalError {
            input: s.to_string(),
            source,
        })
}

/// Reads yes/no style text. Returns `None` for anything else.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Converts text into the [`AnswerValue`] kind that `field` expects.
///
/// Numeric fields become [`AnswerValue::Amount`]; sign and range are left
/// to the engine.
pub fn parse_answer(field: FieldName, text: &str) -> Result<AnswerValue, InputError> {
    let unrecognized = || InputError::Unrecognized {
        field,
        input: text.trim().to_string(),
    };

    let value = match field {
        FieldName::Fpl | FieldName::MmcapPrice => AnswerValue::Amount(parse_decimal(text)?),
        FieldName::Certified
        | FieldName::HasInsurance
        | FieldName::IsArvOnly
        | FieldName::NonFormularyPrimaryCovered => {
            AnswerValue::Flag(parse_flag(text).ok_or_else(unrecognized)?)
        }
        FieldName::InsuranceType => {
            AnswerValue::Insurance(InsuranceType::parse(text).ok_or_else(unrecognized)?)
        }
        FieldName::DrugType => AnswerValue::Drug(DrugType::parse(text).ok_or_else(unrecognized)?),
        FieldName::RwPrimaryStatus => {
            AnswerValue::PrimaryStatus(RwPrimaryStatus::parse(text).ok_or_else(unrecognized)?)
        }
    };
    Ok(value)
}
