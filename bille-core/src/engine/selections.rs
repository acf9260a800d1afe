//! Human-readable summary of the answers that are currently in play.
//!
//! The list stops at the same points the decision does (not certified, no
//! insurance, Medicare over the FPL ceiling), so fields that can no longer
//! matter are never shown.

use serde::Serialize;

use super::common::{PLACEHOLDER, format_dollars, format_percent, format_yes_no};
use crate::models::{Answers, DrugType, InsuranceType, RwPrimaryStatus};
use crate::rules::EligibilityRules;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub label: &'static str,
    pub value: String,
}

impl Selection {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Lists `(label, value)` pairs in question order.
pub fn selections(answers: &Answers, rules: &EligibilityRules) -> Vec<Selection> {
    let mut out = vec![Selection::new(
        "Ryan White Certified (up to date)",
        format_yes_no(answers.certified()),
    )];
    if answers.certified() == Some(false) {
        return out;
    }

    out.push(Selection::new("Has insurance", format_yes_no(answers.has_insurance())));
    if answers.has_insurance() == Some(false) {
        return out;
    }

    let insurance = answers.insurance_type();
    out.push(Selection::new(
        "Primary insurance type",
        insurance.map_or(PLACEHOLDER, |i| i.as_str()),
    ));
    if insurance.is_some() {
        out.push(Selection::new("FPL %", format_percent(answers.fpl())));
    }
    if let (Some(insurance), Some(fpl)) = (insurance, answers.fpl()) {
        if rules.medicare_ineligible(insurance, fpl) {
            return out;
        }
    }

    if let Some(path) = answers.path() {
        out.push(Selection::new("Program path (derived)", path.as_str()));
    }

    let drug = answers.drug_type();
    out.push(Selection::new("Drug type", drug.map_or(PLACEHOLDER, |d| d.as_str())));

    match drug {
        Some(DrugType::ArvBrand) if insurance == Some(InsuranceType::Commercial) => {
            out.push(Selection::new("ARV only", format_yes_no(answers.is_arv_only())));
        }
        Some(DrugType::RwFormulary) => {
            let status = answers.rw_primary_status();
            out.push(Selection::new(
                "Primary status (RW formulary)",
                status.map_or(PLACEHOLDER, |s| s.label()),
            ));
            if status == Some(RwPrimaryStatus::NonFormulary) {
                out.push(Selection::new("MMCAP price", format_dollars(answers.mmcap_price())));
            }
        }
        Some(DrugType::NonRwFormulary) => {
            out.push(Selection::new(
                "Covered by Primary (Non-Formulary)",
                format_yes_no(answers.non_formulary_primary_covered()),
            ));
            out.push(Selection::new("MMCAP price", format_dollars(answers.mmcap_price())));
        }
        _ => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::apply_answer;
    use crate::models::{AnswerValue, FieldName};

    fn summarize(steps: &[(FieldName, AnswerValue)]) -> Vec<(&'static str, String)> {
        let rules = EligibilityRules::default();
        let answers = steps.iter().fold(Answers::default(), |answers, (field, value)| {
            apply_answer(&answers, *field, *value, &rules).unwrap().0
        });
        selections(&answers, &rules)
            .into_iter()
            .map(|selection| (selection.label, selection.value))
            .collect()
    }

    fn pairs(expected: &[(&'static str, &str)]) -> Vec<(&'static str, String)> {
        expected
            .iter()
            .map(|(label, value)| (*label, value.to_string()))
            .collect()
    }

    #[test]
    fn empty_answers_show_placeholders() {
        assert_eq!(
            summarize(&[]),
            pairs(&[
                ("Ryan White Certified (up to date)", "—"),
                ("Has insurance", "—"),
                ("Primary insurance type", "—"),
                ("Drug type", "—"),
            ])
        );
    }

    #[test]
    fn not_certified_stops_after_first_line() {
        assert_eq!(
            summarize(&[(FieldName::Certified, false.into())]),
            pairs(&[("Ryan White Certified (up to date)", "No")])
        );
    }

    #[test]
    fn uninsured_stops_after_insurance_line() {
        assert_eq!(
            summarize(&[
                (FieldName::Certified, true.into()),
                (FieldName::HasInsurance, false.into()),
            ]),
            pairs(&[
                ("Ryan White Certified (up to date)", "Yes"),
                ("Has insurance", "No"),
            ])
        );
    }

    #[test]
    fn medicare_over_ceiling_stops_after_fpl() {
        assert_eq!(
            summarize(&[
                (FieldName::Certified, true.into()),
                (FieldName::HasInsurance, true.into()),
                (FieldName::InsuranceType, InsuranceType::Medicare.into()),
                (FieldName::Fpl, AnswerValue::Number(450.0)),
            ]),
            pairs(&[
                ("Ryan White Certified (up to date)", "Yes"),
                ("Has insurance", "Yes"),
                ("Primary insurance type", "Medicare"),
                ("FPL %", "450%"),
            ])
        );
    }

    #[test]
    fn commercial_arv_shows_arv_only_line() {
        let summary = summarize(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Commercial.into()),
            (FieldName::Fpl, AnswerValue::Number(30.0)),
            (FieldName::DrugType, DrugType::ArvBrand.into()),
        ]);

        assert_eq!(
            summary[3..].to_vec(),
            pairs(&[
                ("FPL %", "30%"),
                ("Program path (derived)", "LPAP"),
                ("Drug type", "ARV/Brand"),
                ("ARV only", "—"),
            ])
        );
    }

    #[test]
    fn medicare_arv_omits_arv_only_line() {
        let summary = summarize(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Medicare.into()),
            (FieldName::Fpl, AnswerValue::Number(150.0)),
            (FieldName::DrugType, DrugType::ArvBrand.into()),
        ]);

        assert_eq!(summary.last(), Some(&("Drug type", "ARV/Brand".to_string())));
        assert!(summary.contains(&("Program path (derived)", "DOH Copay Card".to_string())));
    }

    #[test]
    fn rw_covered_hides_mmcap_price() {
        let summary = summarize(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Commercial.into()),
            (FieldName::Fpl, AnswerValue::Number(80.0)),
            (FieldName::DrugType, DrugType::RwFormulary.into()),
            (FieldName::RwPrimaryStatus, RwPrimaryStatus::Covered.into()),
        ]);

        assert_eq!(
            summary.last(),
            Some(&("Primary status (RW formulary)", "Covered".to_string()))
        );
    }

    #[test]
    fn rw_nonformulary_shows_mmcap_price() {
        let summary = summarize(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Commercial.into()),
            (FieldName::Fpl, AnswerValue::Number(80.0)),
            (FieldName::DrugType, DrugType::RwFormulary.into()),
            (FieldName::RwPrimaryStatus, RwPrimaryStatus::NonFormulary.into()),
            (FieldName::MmcapPrice, AnswerValue::Number(75.0)),
        ]);

        assert_eq!(
            summary[summary.len() - 2..].to_vec(),
            pairs(&[
                ("Primary status (RW formulary)", "Non-Formulary (Primary) — COB override"),
                ("MMCAP price", "$75"),
            ])
        );
    }

    #[test]
    fn non_rw_shows_coverage_and_price() {
        let summary = summarize(&[
            (FieldName::Certified, true.into()),
            (FieldName::HasInsurance, true.into()),
            (FieldName::InsuranceType, InsuranceType::Commercial.into()),
            (FieldName::Fpl, AnswerValue::Number(80.0)),
            (FieldName::DrugType, DrugType::NonRwFormulary.into()),
            (FieldName::NonFormularyPrimaryCovered, false.into()),
        ]);

        assert_eq!(
            summary[summary.len() - 2..].to_vec(),
            pairs(&[
                ("Covered by Primary (Non-Formulary)", "No"),
                ("MMCAP price", "—"),
            ])
        );
    }
}
