//! The billing decision shown once the question flow reaches its result.

use serde::{Deserialize, Serialize};

use super::sequence::{MEDICARE_NO_MFG_NOTE, SHADOW_CLAIM_NOTE};
use crate::models::{Answers, DrugType, InsuranceType, ProgramPath, RwPrimaryStatus};
use crate::rules::EligibilityRules;

const CONTINUE: &str = "Continue with assessment...";
const SUPERVISOR: &str = "STOP: Seek Supervisor Approval.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Red,
    Blue,
    Green,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub message: String,
    pub tone: Tone,
    pub shadow_claim: bool,
    pub note: Option<String>,
}

impl Outcome {
    fn new(message: impl Into<String>, tone: Tone) -> Self {
        Self {
            message: message.into(),
            tone,
            shadow_claim: false,
            note: None,
        }
    }

    fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    fn with_shadow_claim(mut self, path: ProgramPath) -> Self {
        if path == ProgramPath::Medco {
            self.shadow_claim = true;
            self.note = Some(SHADOW_CLAIM_NOTE.to_string());
        }
        self
    }

    fn pending() -> Self {
        Self::new(CONTINUE, Tone::Blue)
    }

    /// True while answers are still missing.
    pub fn is_pending(&self) -> bool {
        self.message == CONTINUE
    }
}

/// Computes the decision message for the current answers.
pub fn outcome(answers: &Answers, rules: &EligibilityRules) -> Outcome {
    if answers.certified() == Some(false) {
        return Outcome::new("STOP: Refer to Case Manager for Part A/B enrollment.", Tone::Red);
    }
    if answers.has_insurance() == Some(false) {
        return Outcome::new("DIRECT DISPENSE: Bill through MAGELLAN.", Tone::Blue);
    }
    let (Some(insurance), Some(fpl)) = (answers.insurance_type(), answers.fpl()) else {
        return Outcome::pending();
    };
    if rules.medicare_ineligible(insurance, fpl) {
        return Outcome::new("Ineligible for Pharmacy.", Tone::Red);
    }

    match answers.drug_type() {
        Some(DrugType::ArvBrand) => arv_brand(answers, insurance),
        Some(DrugType::RwFormulary) => rw_formulary(answers, rules),
        Some(DrugType::NonRwFormulary) => non_rw_formulary(answers, rules),
        None => Outcome::pending(),
    }
}

fn arv_brand(answers: &Answers, insurance: InsuranceType) -> Outcome {
    if insurance == InsuranceType::Medicare {
        return Outcome::new("Primary Insurance → DOH Copay Card", Tone::Blue)
            .with_note(MEDICARE_NO_MFG_NOTE);
    }
    match (answers.is_arv_only(), answers.path()) {
        (Some(true), _) => Outcome::new("Primary Insurance → Manufacturer Copay Card", Tone::Green)
            .with_note("Only ARV prescribed - No MEDCO needed."),
        (Some(false), Some(path)) => Outcome::new(
            format!("Primary Insurance → Manufacturer Copay Card → {path} (for residual)"),
            Tone::Green,
        )
        .with_shadow_claim(path),
        _ => Outcome::pending(),
    }
}

fn rw_formulary(answers: &Answers, rules: &EligibilityRules) -> Outcome {
    match answers.rw_primary_status() {
        Some(RwPrimaryStatus::Denied) => Outcome::new("Process full cost through LPAP.", Tone::Green),
        Some(RwPrimaryStatus::NonFormulary) => match answers.mmcap_price() {
            None => Outcome::pending(),
            Some(price) if rules.needs_supervisor(price) => Outcome::new(SUPERVISOR, Tone::Red),
            Some(_) => Outcome::new("Primary Insurance → LPAP (COB override)", Tone::Green),
        },
        Some(RwPrimaryStatus::Covered) => match answers.path() {
            Some(path) => {
                let tone = if path == ProgramPath::Medco { Tone::Blue } else { Tone::Green };
                Outcome::new(format!("Primary Insurance → {path}"), tone).with_shadow_claim(path)
            }
            None => Outcome::pending(),
        },
        None => Outcome::pending(),
    }
}

fn non_rw_formulary(answers: &Answers, rules: &EligibilityRules) -> Outcome {
    let (Some(covered), Some(price)) =
        (answers.non_formulary_primary_covered(), answers.mmcap_price())
    else {
        return Outcome::pending();
    };
    if rules.needs_supervisor(price) {
        return Outcome::new(SUPERVISOR, Tone::Red);
    }
    if covered {
        Outcome::new("Primary Insurance → LPAP", Tone::Green)
    } else {
        Outcome::new("Primary Insurance → LPAP (COB override)", Tone::Green)
    }
}
