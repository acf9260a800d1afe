//! Billing sequence builder.
//!
//! Produces the ordered list of payers to bill for the current answers.
//! The sequence is empty until every answer its branch depends on is known;
//! it is never guessed from partial data.
//!
//! | Branch                                         | Steps                                     |
//! |------------------------------------------------|-------------------------------------------|
//! | Not certified                                  | STOP: Refer to Case Manager               |
//! | No insurance                                   | DIRECT DISPENSE via MAGELLAN              |
//! | Medicare, FPL over ceiling                     | STOP: Ineligible for Pharmacy             |
//! | ARV/Brand, Medicare                            | Primary → DOH Copay Card                  |
//! | ARV/Brand, Commercial, ARV only                | Primary → Manufacturer Copay Card         |
//! | ARV/Brand, Commercial, other drugs             | Primary → Manufacturer Copay Card → path  |
//! | RW Formulary, denied                           | LPAP (process full cost)                  |
//! | RW Formulary, non-formulary, MMCAP over        | STOP: Seek Supervisor Approval            |
//! | RW Formulary, non-formulary, MMCAP under       | Primary → LPAP (COB override)             |
//! | RW Formulary, covered                          | Primary → path                            |
//! | Non-RW-Formulary, MMCAP over                   | STOP: Seek Supervisor Approval            |
//! | Non-RW-Formulary, MMCAP under, primary covers  | Primary → LPAP                            |
//! | Non-RW-Formulary, MMCAP under, not covered     | Primary → LPAP (COB override)             |

use serde::{Deserialize, Serialize};

use crate::models::{Answers, DrugType, InsuranceType, ProgramPath, RwPrimaryStatus};
use crate::rules::EligibilityRules;

pub const SHADOW_CLAIM_NOTE: &str =
    "SHADOW CLAIM REQUIRED: Run PI2MEDCO on all prescriptions for reporting.";
pub const MEDICARE_NO_MFG_NOTE: &str = "NEVER use Manufacturer Copay Cards for Medicare.";
pub const ARV_ONLY_NOTE: &str = "Only ARV prescribed: no MEDCO step.";

const PRIMARY_INSURANCE: &str = "Primary Insurance";
const MFG_COPAY_CARD: &str = "Manufacturer Copay Card";
const STOP_CASE_MANAGER: &str = "STOP: Refer to Case Manager for Part A/B enrollment.";
const STOP_INELIGIBLE: &str = "STOP: Ineligible for Pharmacy";
const STOP_SUPERVISOR: &str = "STOP: Seek Supervisor Approval";
const DIRECT_DISPENSE: &str = "DIRECT DISPENSE: Bill through MAGELLAN";
const LPAP_FULL_COST: &str = "LPAP (process full cost)";
const LPAP_COB_OVERRIDE: &str = "LPAP (COB override)";

/// Kind of payer or program a step bills, set once by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepCategory {
    Primary,
    MfgCard,
    DohCopay,
    Medco,
    Lpap,
    Magellan,
    Stop,
}

impl StepCategory {
    /// Short badge text shown next to the step.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::MfgCard => "MFG CARD",
            Self::DohCopay => "DOH COPAY",
            Self::Medco => "MEDCO",
            Self::Lpap => "LPAP",
            Self::Magellan => "MAGELLAN",
            Self::Stop => "STOP",
        }
    }
}

impl From<ProgramPath> for StepCategory {
    fn from(path: ProgramPath) -> Self {
        match path {
            ProgramPath::DohCopayCard => Self::DohCopay,
            ProgramPath::Lpap => Self::Lpap,
            ProgramPath::Medco => Self::Medco,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub category: StepCategory,
}

impl Step {
    pub fn new(label: impl Into<String>, category: StepCategory) -> Self {
        Self {
            label: label.into(),
            category,
        }
    }

    fn primary() -> Self {
        Self::new(PRIMARY_INSURANCE, StepCategory::Primary)
    }

    fn path(path: ProgramPath) -> Self {
        Self::new(path.as_str(), path.into())
    }

    /// Terminal steps end the sequence; nothing after them is billed.
    pub fn is_stop(&self) -> bool {
        self.category == StepCategory::Stop
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSequence {
    pub steps: Vec<Step>,
    pub note: Option<String>,
    /// Any step bills MEDCO, so the PI2MEDCO callout must be shown.
    pub has_medco_in_sequence: bool,
}

impl BillingSequence {
    fn new(steps: Vec<Step>, note: Option<&str>) -> Self {
        let has_medco_in_sequence = steps.iter().any(|step| step.category == StepCategory::Medco);
        Self {
            steps,
            note: note.map(str::to_string),
            has_medco_in_sequence,
        }
    }

    fn stop(label: &str) -> Self {
        Self::new(vec![Step::new(label, StepCategory::Stop)], None)
    }

    fn pending() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps joined with arrows, e.g. `Primary Insurance → LPAP`.
    pub fn summary(&self) -> String {
        self.steps
            .iter()
            .map(|step| step.label.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Builds the [`BillingSequence`] for a set of answers.
#[derive(Debug, Clone)]
pub struct BillingSequenceBuilder<'a> {
    rules: &'a EligibilityRules,
}

impl<'a> BillingSequenceBuilder<'a> {
    pub fn new(rules: &'a EligibilityRules) -> Self {
        Self { rules }
    }

    pub fn build(&self, answers: &Answers) -> BillingSequence {
        match answers.certified() {
            None => return BillingSequence::pending(),
            Some(false) => return BillingSequence::stop(STOP_CASE_MANAGER),
            Some(true) => {}
        }
        match answers.has_insurance() {
            Some(false) => {
                return BillingSequence::new(
                    vec![Step::new(DIRECT_DISPENSE, StepCategory::Magellan)],
                    None,
                );
            }
            None => return BillingSequence::pending(),
            Some(true) => {}
        }
        let (Some(insurance), Some(fpl)) = (answers.insurance_type(), answers.fpl()) else {
            return BillingSequence::pending();
        };
        if self.rules.medicare_ineligible(insurance, fpl) {
            return BillingSequence::stop(STOP_INELIGIBLE);
        }

        match answers.drug_type() {
            None => BillingSequence::pending(),
            Some(DrugType::ArvBrand) => self.arv_brand(answers, insurance),
            Some(DrugType::RwFormulary) => self.rw_formulary(answers),
            Some(DrugType::NonRwFormulary) => self.non_rw_formulary(answers),
        }
    }

    fn arv_brand(&self, answers: &Answers, insurance: InsuranceType) -> BillingSequence {
        if insurance == InsuranceType::Medicare {
            return BillingSequence::new(
                vec![Step::primary(), Step::new("DOH Copay Card", StepCategory::DohCopay)],
                Some(MEDICARE_NO_MFG_NOTE),
            );
        }
        let mfg_card = Step::new(MFG_COPAY_CARD, StepCategory::MfgCard);

        match (answers.is_arv_only(), answers.path()) {
            (Some(true), _) => {
                BillingSequence::new(vec![Step::primary(), mfg_card], Some(ARV_ONLY_NOTE))
            }
            (Some(false), Some(path)) => BillingSequence::new(
                vec![Step::primary(), mfg_card, Step::path(path)],
                shadow_note(path),
            ),
            _ => BillingSequence::pending(),
        }
    }

    fn rw_formulary(&self, answers: &Answers) -> BillingSequence {
        match answers.rw_primary_status() {
            None => BillingSequence::pending(),
            Some(RwPrimaryStatus::Denied) => {
                BillingSequence::new(vec![Step::new(LPAP_FULL_COST, StepCategory::Lpap)], None)
            }
            Some(RwPrimaryStatus::NonFormulary) => match answers.mmcap_price() {
                None => BillingSequence::pending(),
                Some(price) if self.rules.needs_supervisor(price) => {
                    BillingSequence::stop(STOP_SUPERVISOR)
                }
                Some(_) => BillingSequence::new(
                    vec![Step::primary(), Step::new(LPAP_COB_OVERRIDE, StepCategory::Lpap)],
                    None,
                ),
            },
            Some(RwPrimaryStatus::Covered) => match answers.path() {
                Some(path) => {
                    BillingSequence::new(vec![Step::primary(), Step::path(path)], shadow_note(path))
                }
                None => BillingSequence::pending(),
            },
        }
    }

    fn non_rw_formulary(&self, answers: &Answers) -> BillingSequence {
        let (Some(covered), Some(price)) =
            (answers.non_formulary_primary_covered(), answers.mmcap_price())
        else {
            return BillingSequence::pending();
        };
        if self.rules.needs_supervisor(price) {
            return BillingSequence::stop(STOP_SUPERVISOR);
        }

        let lpap = if covered { "LPAP" } else { LPAP_COB_OVERRIDE };
        BillingSequence::new(vec![Step::primary(), Step::new(lpap, StepCategory::Lpap)], None)
    }
}

fn shadow_note(path: ProgramPath) -> Option<&'static str> {
    (path == ProgramPath::Medco).then_some(SHADOW_CLAIM_NOTE)
}
