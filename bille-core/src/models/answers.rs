use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::field::FieldName;
use super::program::{DrugType, InsuranceType, ProgramPath, RwPrimaryStatus};
use crate::rules::EligibilityRules;

/// Everything the operator has answered about the current patient.
///
/// `None` means "not answered yet". Fields are only written through
/// `Answers::assign`, which keeps the dependency layers consistent: a
/// write clears every field on a higher layer, so downstream answers never
/// outlive the answer they depended on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    certified: Option<bool>,
    has_insurance: Option<bool>,
    insurance_type: Option<InsuranceType>,
    fpl: Option<Decimal>,
    path: Option<ProgramPath>,
    drug_type: Option<DrugType>,
    is_arv_only: Option<bool>,
    rw_primary_status: Option<RwPrimaryStatus>,
    non_formulary_primary_covered: Option<bool>,
    mmcap_price: Option<Decimal>,
}

/// A validated write of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assignment {
    Certified(bool),
    HasInsurance(bool),
    InsuranceType(InsuranceType),
    Fpl(Decimal),
    DrugType(DrugType),
    IsArvOnly(bool),
    RwPrimaryStatus(RwPrimaryStatus),
    NonFormularyPrimaryCovered(bool),
    MmcapPrice(Decimal),
}

impl Assignment {
    pub(crate) fn field(&self) -> FieldName {
        match self {
            Self::Certified(_) => FieldName::Certified,
            Self::HasInsurance(_) => FieldName::HasInsurance,
            Self::InsuranceType(_) => FieldName::InsuranceType,
            Self::Fpl(_) => FieldName::Fpl,
            Self::DrugType(_) => FieldName::DrugType,
            Self::IsArvOnly(_) => FieldName::IsArvOnly,
            Self::RwPrimaryStatus(_) => FieldName::RwPrimaryStatus,
            Self::NonFormularyPrimaryCovered(_) => FieldName::NonFormularyPrimaryCovered,
            Self::MmcapPrice(_) => FieldName::MmcapPrice,
        }
    }
}

impl Answers {
    pub fn certified(&self) -> Option<bool> {
        self.certified
    }

    pub fn has_insurance(&self) -> Option<bool> {
        self.has_insurance
    }

    pub fn insurance_type(&self) -> Option<InsuranceType> {
        self.insurance_type
    }

    pub fn fpl(&self) -> Option<Decimal> {
        self.fpl
    }

    /// Derived from insurance type and FPL when FPL is recorded.
    pub fn path(&self) -> Option<ProgramPath> {
        self.path
    }

    pub fn drug_type(&self) -> Option<DrugType> {
        self.drug_type
    }

    pub fn is_arv_only(&self) -> Option<bool> {
        self.is_arv_only
    }

    pub fn rw_primary_status(&self) -> Option<RwPrimaryStatus> {
        self.rw_primary_status
    }

    pub fn non_formulary_primary_covered(&self) -> Option<bool> {
        self.non_formulary_primary_covered
    }

    pub fn mmcap_price(&self) -> Option<Decimal> {
        self.mmcap_price
    }

    /// True once any of the top-level questions has an answer.
    pub fn has_progress(&self) -> bool {
        self.certified.is_some()
            || self.has_insurance.is_some()
            || self.insurance_type.is_some()
            || self.fpl.is_some()
            || self.drug_type.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes one field, clearing everything that depends on it first.
    ///
    /// Recording FPL also derives the program path.
    pub(crate) fn assign(&mut self, assignment: Assignment, rules: &EligibilityRules) {
        self.clear_above(assignment.field().layer());

        match assignment {
            Assignment::Certified(value) => self.certified = Some(value),
            Assignment::HasInsurance(value) => self.has_insurance = Some(value),
            Assignment::InsuranceType(value) => self.insurance_type = Some(value),
            Assignment::Fpl(value) => {
                self.fpl = Some(value);
                self.path = self
                    .insurance_type
                    .and_then(|insurance| rules.program_path(insurance, value));
            }
            Assignment::DrugType(value) => self.drug_type = Some(value),
            Assignment::IsArvOnly(value) => self.is_arv_only = Some(value),
            Assignment::RwPrimaryStatus(value) => self.rw_primary_status = Some(value),
            Assignment::NonFormularyPrimaryCovered(value) => {
                self.non_formulary_primary_covered = Some(value)
            }
            Assignment::MmcapPrice(value) => self.mmcap_price = Some(value),
        }
    }

    fn clear_above(&mut self, layer: u8) {
        for field in FieldName::ALL {
            if field.layer() > layer {
                self.clear(field);
            }
        }
    }

    fn clear(&mut self, field: FieldName) {
        match field {
            FieldName::Certified => self.certified = None,
            FieldName::HasInsurance => self.has_insurance = None,
            FieldName::InsuranceType => self.insurance_type = None,
            FieldName::Fpl => {
                self.fpl = None;
                self.path = None;
            }
            FieldName::DrugType => self.drug_type = None,
            FieldName::IsArvOnly => self.is_arv_only = None,
            FieldName::RwPrimaryStatus => self.rw_primary_status = None,
            FieldName::NonFormularyPrimaryCovered => self.non_formulary_primary_covered = None,
            FieldName::MmcapPrice => self.mmcap_price = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn commercial_rw_nonformulary() -> Answers {
        let rules = EligibilityRules::default();
        let mut answers = Answers::default();
        answers.assign(Assignment::Certified(true), &rules);
        answers.assign(Assignment::HasInsurance(true), &rules);
        answers.assign(Assignment::InsuranceType(InsuranceType::Commercial), &rules);
        answers.assign(Assignment::Fpl(dec!(120)), &rules);
        answers.assign(Assignment::DrugType(DrugType::RwFormulary), &rules);
        answers.assign(Assignment::RwPrimaryStatus(RwPrimaryStatus::NonFormulary), &rules);
        answers.assign(Assignment::MmcapPrice(dec!(20)), &rules);
        answers
    }

    #[test]
    fn default_answers_are_empty() {
        let answers = Answers::default();

        assert!(answers.is_empty());
        assert!(!answers.has_progress());
    }

    #[test]
    fn assign_fpl_derives_path() {
        let answers = commercial_rw_nonformulary();

        assert_eq!(answers.path(), Some(ProgramPath::Medco));
    }

    #[test]
    fn assign_drug_type_clears_drug_details() {
        let rules = EligibilityRules::default();
        let mut answers = commercial_rw_nonformulary();

        answers.assign(Assignment::DrugType(DrugType::RwFormulary), &rules);

        assert_eq!(answers.drug_type(), Some(DrugType::RwFormulary));
        assert_eq!(answers.rw_primary_status(), None);
        assert_eq!(answers.mmcap_price(), None);
        assert_eq!(answers.fpl(), Some(dec!(120)));
    }

    #[test]
    fn assign_insurance_type_clears_fpl_and_path() {
        let rules = EligibilityRules::default();
        let mut answers = commercial_rw_nonformulary();

        answers.assign(Assignment::InsuranceType(InsuranceType::Medicare), &rules);

        assert_eq!(answers.fpl(), None);
        assert_eq!(answers.path(), None);
        assert_eq!(answers.drug_type(), None);
    }

    #[test]
    fn assign_certified_resets_everything_else() {
        let rules = EligibilityRules::default();
        let mut answers = commercial_rw_nonformulary();

        answers.assign(Assignment::Certified(false), &rules);

        let mut expected = Answers::default();
        expected.certified = Some(false);
        assert_eq!(answers, expected);
    }

    #[test]
    fn assign_primary_status_clears_mmcap_price() {
        let rules = EligibilityRules::default();
        let mut answers = commercial_rw_nonformulary();

        answers.assign(Assignment::RwPrimaryStatus(RwPrimaryStatus::NonFormulary), &rules);

        assert_eq!(answers.mmcap_price(), None);
    }

    #[test]
    fn assign_fpl_over_medicare_ceiling_leaves_path_unset() {
        let rules = EligibilityRules::default();
        let mut answers = Answers::default();
        answers.assign(Assignment::InsuranceType(InsuranceType::Medicare), &rules);

        answers.assign(Assignment::Fpl(dec!(450)), &rules);

        assert_eq!(answers.path(), None);
    }
}
