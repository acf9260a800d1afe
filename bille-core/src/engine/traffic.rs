//! Traffic-light status for the billing panel.
//!
//! Hard stops are checked in a fixed order and the first one found wins:
//!
//! 1. Not Ryan White certified
//! 2. Medicare with FPL over the ceiling
//! 3. Non-RW-Formulary drug with MMCAP price at or over the threshold
//! 4. RW Formulary drug, primary non-formulary, MMCAP price at or over the threshold
//!
//! Without a hard stop, every advisory that applies is collected and the
//! light is yellow. Otherwise it is green once anything has been answered.

use serde::{Deserialize, Serialize};

use crate::models::{Answers, DrugType, InsuranceType, ProgramPath, RwPrimaryStatus};
use crate::rules::EligibilityRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficLight {
    Red,
    Yellow,
    Green,
    Neutral,
}

impl TrafficLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Neutral => "neutral",
        }
    }
}

/// Persistent rule callouts, reported regardless of the light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficFlags {
    /// Medicare patients may never use manufacturer copay cards.
    pub medicare_no_mfg: bool,
    /// The MEDCO path requires PI2MEDCO shadow-claim reporting.
    pub medco_shadow: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficState {
    pub state: TrafficLight,
    pub reasons: Vec<String>,
    pub flags: TrafficFlags,
}

/// Evaluates [`TrafficState`] against a set of thresholds.
#[derive(Debug, Clone)]
pub struct TrafficEvaluator<'a> {
    rules: &'a EligibilityRules,
}

impl<'a> TrafficEvaluator<'a> {
    pub fn new(rules: &'a EligibilityRules) -> Self {
        Self { rules }
    }

    pub fn evaluate(&self, answers: &Answers) -> TrafficState {
        let flags = TrafficFlags {
            medicare_no_mfg: answers.insurance_type() == Some(InsuranceType::Medicare),
            medco_shadow: answers.path() == Some(ProgramPath::Medco),
        };

        if let Some(reason) = self.hard_stop(answers) {
            return TrafficState {
                state: TrafficLight::Red,
                reasons: vec![reason],
                flags,
            };
        }

        let reasons = self.advisories(answers);
        let state = if !reasons.is_empty() {
            TrafficLight::Yellow
        } else if answers.has_progress() {
            TrafficLight::Green
        } else {
            TrafficLight::Neutral
        };

        TrafficState { state, reasons, flags }
    }

    fn hard_stop(&self, answers: &Answers) -> Option<String> {
        let rules = self.rules;

        if answers.certified() == Some(false) {
            return Some("Not Ryan White certified".to_string());
        }

        if let (Some(insurance), Some(fpl)) = (answers.insurance_type(), answers.fpl()) {
            if rules.medicare_ineligible(insurance, fpl) {
                return Some(format!(
                    "Medicare + FPL > {}% (ineligible)",
                    rules.medicare_fpl_ceiling.normalize()
                ));
            }
        }

        let over_threshold = answers
            .mmcap_price()
            .is_some_and(|price| rules.needs_supervisor(price));
        if !over_threshold {
            return None;
        }
        let threshold = rules.mmcap_supervisor_threshold.normalize();

        match (answers.drug_type(), answers.rw_primary_status()) {
            (Some(DrugType::NonRwFormulary), _) => Some(format!(
                "Non-Formulary with MMCAP ≥ ${threshold} (supervisor approval)"
            )),
            (Some(DrugType::RwFormulary), Some(RwPrimaryStatus::NonFormulary)) => Some(format!(
                "RW Formulary + Primary non-formulary with MMCAP ≥ ${threshold} (supervisor approval)"
            )),
            _ => None,
        }
    }

    fn advisories(&self, answers: &Answers) -> Vec<String> {
        let mut reasons = Vec::new();
        let drug = answers.drug_type();
        let rw_status = answers.rw_primary_status().filter(|_| drug == Some(DrugType::RwFormulary));

        if answers.path() == Some(ProgramPath::Medco) {
            reasons.push("Shadow claim reporting required (PI2MEDCO)".to_string());
        }
        if rw_status == Some(RwPrimaryStatus::Denied) {
            reasons.push("Primary denied: flip to LPAP full cost".to_string());
        }
        if rw_status == Some(RwPrimaryStatus::NonFormulary) {
            reasons.push("Primary non-formulary: use COB override with LPAP".to_string());
        }
        let under_threshold = answers
            .mmcap_price()
            .is_some_and(|price| !self.rules.needs_supervisor(price));
        if drug == Some(DrugType::NonRwFormulary) && under_threshold {
            reasons.push("Non-Formulary: use LPAP".to_string());
        }

        reasons
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::apply_answer;
    use crate::models::{AnswerValue, FieldName};

    fn answers_from(steps: &[(FieldName, AnswerValue)]) -> Answers {
        let rules = EligibilityRules::default();
        steps.iter().fold(Answers::default(), |answers, (field, value)| {
            apply_answer(&answers, *field, *value, &rules).unwrap().0
        })
    }

    fn commercial(fpl: f64) -> Vec<(FieldName, AnswerValue)> {
        vec![
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Commercial.into()),
            (FieldName::Fpl, fpl.into()),
        ]
    }

    fn evaluate(answers: &Answers) -> TrafficState {
        let rules = EligibilityRules::default();
        TrafficEvaluator::new(&rules).evaluate(answers)
    }

    // =========================================================================
    // neutral and green
    // =========================================================================

    #[test]
    fn empty_answers_are_neutral() {
        let state = evaluate(&Answers::default());

        assert_eq!(
            state,
            TrafficState {
                state: TrafficLight::Neutral,
                reasons: vec![],
                flags: TrafficFlags::default(),
            }
        );
    }

    #[test]
    fn certified_only_is_green() {
        let answers = answers_from(&[(FieldName::Certified, true.into())]);

        assert_eq!(evaluate(&answers).state, TrafficLight::Green);
    }

    #[test]
    fn lpap_path_without_advisories_is_green() {
        let answers = answers_from(&commercial(30.0));

        let state = evaluate(&answers);

        assert_eq!(state.state, TrafficLight::Green);
        assert!(state.reasons.is_empty());
    }

    // =========================================================================
    // hard stops
    // =========================================================================

    #[test]
    fn not_certified_is_red() {
        let answers = answers_from(&[(FieldName::Certified, false.into())]);

        let state = evaluate(&answers);

        assert_eq!(state.state, TrafficLight::Red);
        assert_eq!(state.reasons, vec!["Not Ryan White certified".to_string()]);
    }

    #[test]
    fn medicare_over_ceiling_is_red_with_flag() {
        let answers = answers_from(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Medicare.into()),
            (FieldName::Fpl, AnswerValue::Number(450.0)),
        ]);

        let state = evaluate(&answers);

        assert_eq!(state.state, TrafficLight::Red);
        assert_eq!(state.reasons, vec!["Medicare + FPL > 400% (ineligible)".to_string()]);
        assert!(state.flags.medicare_no_mfg);
    }

    #[test]
    fn non_rw_over_threshold_is_red() {
        let mut steps = commercial(30.0);
        steps.push((FieldName::DrugType, DrugType::NonRwFormulary.into()));
        steps.push((FieldName::NonFormularyPrimaryCovered, true.into()));
        steps.push((FieldName::MmcapPrice, AnswerValue::Number(50.0)));

        let state = evaluate(&answers_from(&steps));

        assert_eq!(state.state, TrafficLight::Red);
        assert_eq!(
            state.reasons,
            vec!["Non-Formulary with MMCAP ≥ $50 (supervisor approval)".to_string()]
        );
    }

    #[test]
    fn rw_nonformulary_over_threshold_wins_over_medco_advisory() {
        let mut steps = commercial(200.0);
        steps.push((FieldName::DrugType, DrugType::RwFormulary.into()));
        steps.push((FieldName::RwPrimaryStatus, RwPrimaryStatus::NonFormulary.into()));
        steps.push((FieldName::MmcapPrice, AnswerValue::Number(75.0)));

        let state = evaluate(&answers_from(&steps));

        assert_eq!(state.state, TrafficLight::Red);
        assert_eq!(
            state.reasons,
            vec![
                "RW Formulary + Primary non-formulary with MMCAP ≥ $50 (supervisor approval)"
                    .to_string()
            ]
        );
        assert!(state.flags.medco_shadow);
    }

    #[test]
    fn thresholds_in_reasons_follow_configuration() {
        let rules = EligibilityRules {
            medicare_fpl_ceiling: 300.into(),
            ..Default::default()
        };
        let mut answers = Answers::default();
        for (field, value) in [
            (FieldName::Certified, AnswerValue::Flag(true)),
            (FieldName::HasInsurance, AnswerValue::Flag(true)),
            (FieldName::InsuranceType, InsuranceType::Medicare.into()),
            (FieldName::Fpl, AnswerValue::Number(350.0)),
        ] {
            answers = apply_answer(&answers, field, value, &rules).unwrap().0;
        }

        let state = TrafficEvaluator::new(&rules).evaluate(&answers);

        assert_eq!(state.reasons, vec!["Medicare + FPL > 300% (ineligible)".to_string()]);
    }

    // =========================================================================
    // advisories
    // =========================================================================

    #[test]
    fn medco_path_is_yellow() {
        let state = evaluate(&answers_from(&commercial(200.0)));

        assert_eq!(state.state, TrafficLight::Yellow);
        assert_eq!(state.reasons, vec!["Shadow claim reporting required (PI2MEDCO)".to_string()]);
    }

    #[test]
    fn advisories_accumulate_in_order() {
        let mut steps = commercial(200.0);
        steps.push((FieldName::DrugType, DrugType::RwFormulary.into()));
        steps.push((FieldName::RwPrimaryStatus, RwPrimaryStatus::NonFormulary.into()));
        steps.push((FieldName::MmcapPrice, AnswerValue::Number(10.0)));

        let state = evaluate(&answers_from(&steps));

        assert_eq!(state.state, TrafficLight::Yellow);
        assert_eq!(
            state.reasons,
            vec![
                "Shadow claim reporting required (PI2MEDCO)".to_string(),
                "Primary non-formulary: use COB override with LPAP".to_string(),
            ]
        );
    }

    #[test]
    fn rw_denied_advises_lpap_full_cost() {
        let mut steps = commercial(30.0);
        steps.push((FieldName::DrugType, DrugType::RwFormulary.into()));
        steps.push((FieldName::RwPrimaryStatus, RwPrimaryStatus::Denied.into()));

        let state = evaluate(&answers_from(&steps));

        assert_eq!(state.reasons, vec!["Primary denied: flip to LPAP full cost".to_string()]);
    }

    #[test]
    fn non_rw_under_threshold_advises_lpap() {
        let mut steps = commercial(30.0);
        steps.push((FieldName::DrugType, DrugType::NonRwFormulary.into()));
        steps.push((FieldName::NonFormularyPrimaryCovered, false.into()));
        steps.push((FieldName::MmcapPrice, AnswerValue::Number(20.0)));

        let state = evaluate(&answers_from(&steps));

        assert_eq!(state.state, TrafficLight::Yellow);
        assert_eq!(state.reasons, vec!["Non-Formulary: use LPAP".to_string()]);
    }
}
