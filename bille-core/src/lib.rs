//! Pharmacy billing eligibility engine.
//!
//! Walks a case through the Ryan White certification, insurance, FPL and
//! drug questions, then derives the traffic-light status, the ordered
//! billing sequence and the final routing message.
//!
//! ```
//! use bille_core::{EligibilitySession, FieldName, Phase};
//!
//! let mut session = EligibilitySession::default();
//! session.apply_answer(FieldName::Certified, true.into()).unwrap();
//! session.apply_answer(FieldName::HasInsurance, false.into()).unwrap();
//!
//! assert_eq!(session.phase(), Phase::Result);
//! assert_eq!(
//!     session.billing_sequence().summary(),
//!     "DIRECT DISPENSE: Bill through MAGELLAN"
//! );
//! ```

pub mod engine;
pub mod models;
pub mod rules;
pub mod session;

pub use engine::{
    BillingSequence, BillingSequenceBuilder, Outcome, Selection, Step, StepCategory, Tone,
    TrafficEvaluator, TrafficFlags, TrafficLight, TrafficState,
};
pub use models::*;
pub use rules::{EligibilityRules, RulesError};
pub use session::EligibilitySession;
