//! Which question the front end should be showing.
//!
//! The current question is a pure function of [`Answers`]: it is the first
//! unanswered field on the branch the answers so far have selected, or
//! `None` once a billing decision can be made. [`Phase`] is the coarse
//! grouping of questions shown to the operator.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::answers::Answers;
use super::field::{AnswerValue, FieldName};
use super::program::{DrugType, InsuranceType, RwPrimaryStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Certification,
    Insurance,
    Fpl,
    DrugType,
    DrugDetails,
    Result,
}

impl Phase {
    /// Derives the phase from the answers recorded so far.
    pub fn of(answers: &Answers) -> Self {
        Question::next(answers).map_or(Phase::Result, |question| question.phase())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certification => "certification",
            Self::Insurance => "insurance",
            Self::Fpl => "fpl",
            Self::DrugType => "drug_type",
            Self::DrugDetails => "drug_details",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable answer to a categorical question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Choice {
    pub label: &'static str,
    pub value: AnswerValue,
}

impl Choice {
    const fn new(label: &'static str, value: AnswerValue) -> Self {
        Self { label, value }
    }
}

/// A single question asked of the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Question {
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

impl Question {
    /// The next unanswered question, or `None` when a decision is reached.
    pub fn next(answers: &Answers) -> Option<Question> {
        match answers.certified() {
            None => return Some(Question::Certified),
            Some(false) => return None,
            Some(true) => {}
        }
        match answers.has_insurance() {
            None => return Some(Question::HasInsurance),
            Some(false) => return None,
            Some(true) => {}
        }
        let Some(insurance) = answers.insurance_type() else {
            return Some(Question::InsuranceType);
        };
        if answers.fpl().is_none() {
            return Some(Question::Fpl);
        }
        // FPL is recorded but no path was derived: Medicare over the ceiling.
        answers.path()?;
        let Some(drug) = answers.drug_type() else {
            return Some(Question::DrugType);
        };

        match drug {
            DrugType::ArvBrand => {
                if insurance == InsuranceType::Medicare || answers.is_arv_only().is_some() {
                    None
                } else {
                    Some(Question::IsArvOnly)
                }
            }
            DrugType::RwFormulary => match answers.rw_primary_status() {
                None => Some(Question::RwPrimaryStatus),
                Some(RwPrimaryStatus::NonFormulary) if answers.mmcap_price().is_none() => {
                    Some(Question::MmcapPrice)
                }
                Some(_) => None,
            },
            DrugType::NonRwFormulary => {
                if answers.non_formulary_primary_covered().is_none() {
                    Some(Question::NonFormularyPrimaryCovered)
                } else if answers.mmcap_price().is_none() {
                    Some(Question::MmcapPrice)
                } else {
                    None
                }
            }
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::Certified => Phase::Certification,
            Self::HasInsurance | Self::InsuranceType => Phase::Insurance,
            Self::Fpl => Phase::Fpl,
            Self::DrugType => Phase::DrugType,
            Self::IsArvOnly
            | Self::RwPrimaryStatus
            | Self::NonFormularyPrimaryCovered
            | Self::MmcapPrice => Phase::DrugDetails,
        }
    }

    /// The field an answer to this question is written to.
    pub fn field(&self) -> FieldName {
        match self {
            Self::Certified => FieldName::Certified,
            Self::HasInsurance => FieldName::HasInsurance,
            Self::InsuranceType => FieldName::InsuranceType,
            Self::Fpl => FieldName::Fpl,
            Self::DrugType => FieldName::DrugType,
            Self::IsArvOnly => FieldName::IsArvOnly,
            Self::RwPrimaryStatus => FieldName::RwPrimaryStatus,
            Self::NonFormularyPrimaryCovered => FieldName::NonFormularyPrimaryCovered,
            Self::MmcapPrice => FieldName::MmcapPrice,
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Certified => "Is the patient Ryan White certified and up to date?",
            Self::HasInsurance => "Does the patient have insurance?",
            Self::InsuranceType => "Primary Insurance Type?",
            Self::Fpl => "What is the patient's FPL %?",
            Self::DrugType => "What is the drug type?",
            Self::IsArvOnly => "Is ONLY an ARV prescribed?",
            Self::RwPrimaryStatus => "Primary Insurance status for this RW formulary drug?",
            Self::NonFormularyPrimaryCovered => {
                "Is this Non-RW-Formulary drug covered by Primary Insurance?"
            }
            Self::MmcapPrice => "What is the MMCAP price?",
        }
    }

    /// Placeholder for free-text questions.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Fpl => Some("Enter FPL %"),
            Self::MmcapPrice => Some("Enter MMCAP price ($)"),
            _ => None,
        }
    }

    /// Options for categorical questions; empty for numeric ones.
    pub fn choices(&self, answers: &Answers) -> Vec<Choice> {
        use AnswerValue::{Drug, Flag, Insurance, PrimaryStatus};

        match self {
            Self::Certified | Self::HasInsurance => {
                vec![Choice::new("YES", Flag(true)), Choice::new("NO", Flag(false))]
            }
            Self::InsuranceType => vec![
                Choice::new("MEDICARE", Insurance(InsuranceType::Medicare)),
                Choice::new("COMMERCIAL", Insurance(InsuranceType::Commercial)),
            ],
            Self::DrugType => {
                let arv_label = if answers.insurance_type() == Some(InsuranceType::Medicare) {
                    "ARV/Brand (DOH Copay Only)"
                } else {
                    "ARV/Brand (Mfg Card Eligible)"
                };
                vec![
                    Choice::new(arv_label, Drug(DrugType::ArvBrand)),
                    Choice::new("RW FORMULARY DRUG", Drug(DrugType::RwFormulary)),
                    Choice::new("NON-RW-FORMULARY DRUG", Drug(DrugType::NonRwFormulary)),
                ]
            }
            Self::IsArvOnly => vec![
                Choice::new("YES (ARV ONLY)", Flag(true)),
                Choice::new("NO (OTHER DRUGS TOO)", Flag(false)),
            ],
            Self::RwPrimaryStatus => vec![
                Choice::new("COVERED", PrimaryStatus(RwPrimaryStatus::Covered)),
                Choice::new("NON-FORMULARY (PRIMARY)", PrimaryStatus(RwPrimaryStatus::NonFormulary)),
                Choice::new("DENIED", PrimaryStatus(RwPrimaryStatus::Denied)),
            ],
            Self::NonFormularyPrimaryCovered => vec![
                Choice::new("YES (COVERED)", Flag(true)),
                Choice::new("NO / NOT COVERED", Flag(false)),
            ],
            Self::Fpl | Self::MmcapPrice => Vec::new(),
        }
    }

    /// Banner shown above the question, if any.
    pub fn warning(&self, answers: &Answers) -> Option<&'static str> {
        match self {
            Self::DrugType if answers.insurance_type() == Some(InsuranceType::Medicare) => {
                Some("MEDICARE: Manufacturer Copay Cards are not allowed")
            }
            _ => None,
        }
    }
}
