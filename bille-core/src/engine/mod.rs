//! Decision logic over an [`Answers`](crate::models::Answers) record.
//!
//! Every evaluator here is a pure function of the answers and the
//! [`EligibilityRules`](crate::rules::EligibilityRules) in force:
//! the question transition, the traffic light, the billing sequence,
//! the selection summary and the final outcome message.

pub mod common;
mod outcome;
mod selections;
mod sequence;
mod traffic;
mod transition;

pub use outcome::{Outcome, Tone, outcome};
pub use selections::{Selection, selections};
pub use sequence::{
    ARV_ONLY_NOTE, BillingSequence, BillingSequenceBuilder, MEDICARE_NO_MFG_NOTE,
    SHADOW_CLAIM_NOTE, Step, StepCategory,
};
pub use traffic::{TrafficEvaluator, TrafficFlags, TrafficLight, TrafficState};
pub use transition::apply_answer;
