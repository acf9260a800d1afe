use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::program::{DrugType, InsuranceType, RwPrimaryStatus};

/// Errors raised while accepting an answer.
///
/// In both cases the answers and the phase are left exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    /// The key does not name a user-entered field. Reaching this from a
    /// correct front end is a programming error.
    #[error("unrecognized answer field '{0}'")]
    InvalidField(String),

    /// The value is of the wrong kind for the field, or out of its domain.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: FieldName, reason: String },
}

/// The user-entered fields of [`Answers`](super::Answers).
///
/// `path` is derived from insurance type and FPL and is therefore not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    Certified,
    HasInsurance,
    InsuranceType,
    Fpl,
    DrugType,
    IsArvOnly,
    RwPrimaryStatus,
    NonFormularyPrimaryCovered,
    MmcapPrice,
}

impl FieldName {
    pub const ALL: [FieldName; 9] = [
        FieldName::Certified,
        FieldName::HasInsurance,
        FieldName::InsuranceType,
        FieldName::Fpl,
        FieldName::DrugType,
        FieldName::IsArvOnly,
        FieldName::RwPrimaryStatus,
        FieldName::NonFormularyPrimaryCovered,
        FieldName::MmcapPrice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certified => "certified",
            Self::HasInsurance => "hasInsurance",
            Self::InsuranceType => "insuranceType",
            Self::Fpl => "fpl",
            Self::DrugType => "drugType",
            Self::IsArvOnly => "isARVOnly",
            Self::RwPrimaryStatus => "rwPrimaryStatus",
            Self::NonFormularyPrimaryCovered => "nonFormularyPrimaryCovered",
            Self::MmcapPrice => "mmcapPrice",
        }
    }

    /// Dependency layer of the field. Writing a field resets every field
    /// on a strictly higher layer.
    pub fn layer(&self) -> u8 {
        match self {
            Self::Certified => 0,
            Self::HasInsurance => 1,
            Self::InsuranceType => 2,
            Self::Fpl => 3,
            Self::DrugType => 4,
            Self::IsArvOnly | Self::RwPrimaryStatus | Self::NonFormularyPrimaryCovered => 5,
            Self::MmcapPrice => 6,
        }
    }

    /// Whether the field holds a number entered as free text.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Fpl | Self::MmcapPrice)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = AnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| AnswerError::InvalidField(s.to_string()))
    }
}

/// A value submitted for a field.
///
/// `Number` carries raw floating-point input and is checked for finiteness;
/// `Amount` is for callers that already hold a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnswerValue {
    Flag(bool),
    Insurance(InsuranceType),
    Drug(DrugType),
    PrimaryStatus(RwPrimaryStatus),
    Number(f64),
    Amount(Decimal),
}

impl AnswerValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => "a yes/no answer",
            Self::Insurance(_) => "an insurance type",
            Self::Drug(_) => "a drug type",
            Self::PrimaryStatus(_) => "a primary status",
            Self::Number(_) | Self::Amount(_) => "a number",
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<InsuranceType> for AnswerValue {
    fn from(value: InsuranceType) -> Self {
        Self::Insurance(value)
    }
}

impl From<DrugType> for AnswerValue {
    fn from(value: DrugType) -> Self {
        Self::Drug(value)
    }
}

impl From<RwPrimaryStatus> for AnswerValue {
    fn from(value: RwPrimaryStatus) -> Self {
        Self::PrimaryStatus(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Decimal> for AnswerValue {
    fn from(value: Decimal) -> Self {
        Self::Amount(value)
    }
}
