//! Accepting an answer and moving to the next question.
//!
//! [`apply_answer`] is pure: it takes the current answers by reference and
//! returns the updated answers together with the phase they lead to. The
//! same inputs always produce the same outputs.
//!
//! | Field written                    | Next phase                                             |
//! |----------------------------------|--------------------------------------------------------|
//! | certified = no                   | Result                                                 |
//! | certified = yes                  | Insurance                                              |
//! | hasInsurance = no                | Result                                                 |
//! | hasInsurance = yes               | Insurance (insurance type)                             |
//! | insuranceType                    | FPL                                                    |
//! | fpl, Medicare over ceiling       | Result                                                 |
//! | fpl, otherwise                   | Drug type (path derived)                               |
//! | drugType ARV/Brand + Medicare    | Result                                                 |
//! | drugType, otherwise              | Drug details                                           |
//! | isARVOnly                        | Result                                                 |
//! | rwPrimaryStatus = nonformulary   | Drug details (MMCAP price)                             |
//! | rwPrimaryStatus, otherwise       | Result                                                 |
//! | nonFormularyPrimaryCovered       | Drug details (MMCAP price)                             |
//! | mmcapPrice                       | Result                                                 |

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::common::decimal_from_f64;
use crate::models::{AnswerError, AnswerValue, Answers, Assignment, FieldName, Phase};
use crate::rules::EligibilityRules;

/// Applies one answer and returns the updated answers and the next phase.
///
/// # Errors
///
/// Returns [`AnswerError::InvalidValue`] when `value` is the wrong kind for
/// `field`, or when a numeric value is non-finite or negative.
///
/// # Example
///
/// ```
/// use bille_core::engine::apply_answer;
/// use bille_core::{Answers, EligibilityRules, FieldName, Phase};
///
/// let rules = EligibilityRules::default();
/// let (answers, phase) =
///     apply_answer(&Answers::default(), FieldName::Certified, false.into(), &rules).unwrap();
///
/// assert_eq!(answers.certified(), Some(false));
/// assert_eq!(phase, Phase::Result);
/// ```
pub fn apply_answer(
    answers: &Answers,
    field: FieldName,
    value: AnswerValue,
    rules: &EligibilityRules,
) -> Result<(Answers, Phase), AnswerError> {
    let assignment = validate(field, value).inspect_err(|error| {
        warn!(%field, %error, "answer rejected");
    })?;

    let mut next = answers.clone();
    next.assign(assignment, rules);
    let phase = Phase::of(&next);

    debug!(%field, ?value, %phase, "answer applied");
    Ok((next, phase))
}

/// Checks that `value` suits `field` and converts it to a typed write.
pub(crate) fn validate(field: FieldName, value: AnswerValue) -> Result<Assignment, AnswerError> {
    let mismatch = || AnswerError::InvalidValue {
        field,
        reason: format!("expected {}, got {}", expected_kind(field), value.kind()),
    };

    let assignment = match (field, value) {
        (FieldName::Certified, AnswerValue::Flag(v)) => Assignment::Certified(v),
        (FieldName::HasInsurance, AnswerValue::Flag(v)) => Assignment::HasInsurance(v),
        (FieldName::InsuranceType, AnswerValue::Insurance(v)) => Assignment::InsuranceType(v),
        (FieldName::Fpl, value) => Assignment::Fpl(non_negative(field, value).ok_or_else(mismatch)??),
        (FieldName::DrugType, AnswerValue::Drug(v)) => Assignment::DrugType(v),
        (FieldName::IsArvOnly, AnswerValue::Flag(v)) => Assignment::IsArvOnly(v),
        (FieldName::RwPrimaryStatus, AnswerValue::PrimaryStatus(v)) => {
            Assignment::RwPrimaryStatus(v)
        }
        (FieldName::NonFormularyPrimaryCovered, AnswerValue::Flag(v)) => {
            Assignment::NonFormularyPrimaryCovered(v)
        }
        (FieldName::MmcapPrice, value) => {
            Assignment::MmcapPrice(non_negative(field, value).ok_or_else(mismatch)??)
        }
        _ => return Err(mismatch()),
    };
    Ok(assignment)
}

/// Numeric check for FPL and MMCAP price.
///
/// The outer `None` means the value was not numeric at all.
fn non_negative(field: FieldName, value: AnswerValue) -> Option<Result<Decimal, AnswerError>> {
    let amount = match value {
        AnswerValue::Number(raw) => match decimal_from_f64(raw) {
            Some(amount) => amount,
            None => {
                return Some(Err(AnswerError::InvalidValue {
                    field,
                    reason: format!("{raw} is not a finite number"),
                }));
            }
        },
        AnswerValue::Amount(amount) => amount,
        _ => return None,
    };

    if amount < Decimal::ZERO {
        return Some(Err(AnswerError::InvalidValue {
            field,
            reason: format!("{amount} is negative"),
        }));
    }
    Some(Ok(amount))
}

fn expected_kind(field: FieldName) -> &'static str {
    match field {
        FieldName::Certified
        | FieldName::HasInsurance
        | FieldName::IsArvOnly
        | FieldName::NonFormularyPrimaryCovered => "a yes/no answer",
        FieldName::InsuranceType => "an insurance type",
        FieldName::DrugType => "a drug type",
        FieldName::RwPrimaryStatus => "a primary status",
        FieldName::Fpl | FieldName::MmcapPrice => "a number",
    }
}
