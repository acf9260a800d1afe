//! Numeric thresholds that drive eligibility and routing.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use bille_core::{EligibilityRules, InsuranceType, ProgramPath};
//!
//! let rules = EligibilityRules::default();
//!
//! assert_eq!(
//!     rules.program_path(InsuranceType::Commercial, dec!(30)),
//!     Some(ProgramPath::Lpap)
//! );
//! assert_eq!(rules.program_path(InsuranceType::Medicare, dec!(450)), None);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{InsuranceType, ProgramPath};

/// Errors that can occur while validating [`EligibilityRules`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("{name} must be non-negative, got {value}")]
    NegativeThreshold { name: &'static str, value: Decimal },
}

/// Threshold configuration.
///
/// Every field has a default, so a partial TOML table deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    /// Medicare patients above this FPL % are ineligible for pharmacy.
    pub medicare_fpl_ceiling: Decimal,

    /// Commercial patients below this FPL % are routed to LPAP, the rest to MEDCO.
    pub lpap_fpl_ceiling: Decimal,

    /// MMCAP prices at or above this amount require supervisor approval.
    pub mmcap_supervisor_threshold: Decimal,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            medicare_fpl_ceiling: Decimal::from(400),
            lpap_fpl_ceiling: Decimal::from(50),
            mmcap_supervisor_threshold: Decimal::from(50),
        }
    }
}

impl EligibilityRules {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::NegativeThreshold`] for the first threshold
    /// below zero.
    pub fn validate(&self) -> Result<(), RulesError> {
        let thresholds = [
            ("medicare_fpl_ceiling", self.medicare_fpl_ceiling),
            ("lpap_fpl_ceiling", self.lpap_fpl_ceiling),
            ("mmcap_supervisor_threshold", self.mmcap_supervisor_threshold),
        ];
        for (name, value) in thresholds {
            if value < Decimal::ZERO {
                return Err(RulesError::NegativeThreshold { name, value });
            }
        }
        Ok(())
    }

    pub fn medicare_ineligible(&self, insurance: InsuranceType, fpl: Decimal) -> bool {
        insurance == InsuranceType::Medicare && fpl > self.medicare_fpl_ceiling
    }

    pub fn needs_supervisor(&self, mmcap_price: Decimal) -> bool {
        mmcap_price >= self.mmcap_supervisor_threshold
    }

    /// Program path for a resolved insurance type and FPL, or `None` when the
    /// patient is ineligible.
    pub fn program_path(&self, insurance: InsuranceType, fpl: Decimal) -> Option<ProgramPath> {
        match insurance {
            InsuranceType::Medicare if self.medicare_ineligible(insurance, fpl) => None,
            InsuranceType::Medicare => Some(ProgramPath::DohCopayCard),
            InsuranceType::Commercial if fpl < self.lpap_fpl_ceiling => Some(ProgramPath::Lpap),
            InsuranceType::Commercial => Some(ProgramPath::Medco),
        }
    }
}
