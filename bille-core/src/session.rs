//! Stateful wrapper around the pure engine.
//!
//! An [`EligibilitySession`] owns one set of answers and the rules they are
//! evaluated against. Writes go through [`apply_answer`], so a rejected
//! answer leaves the session untouched.

use tracing::info;

use crate::engine::{
    BillingSequence, BillingSequenceBuilder, Outcome, Selection, TrafficEvaluator, TrafficState,
    apply_answer, outcome, selections,
};
use crate::models::{AnswerError, AnswerValue, Answers, FieldName, Phase, Question};
use crate::rules::{EligibilityRules, RulesError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilitySession {
    rules: EligibilityRules,
    answers: Answers,
}

impl EligibilitySession {
    /// Creates an empty session after validating `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] if any threshold is negative.
    pub fn new(rules: EligibilityRules) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            rules,
            answers: Answers::default(),
        })
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn phase(&self) -> Phase {
        Phase::of(&self.answers)
    }

    /// The next unanswered question, or `None` once a result is reached.
    pub fn current_question(&self) -> Option<Question> {
        Question::next(&self.answers)
    }

    /// Records one answer and returns the phase it leads to.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerError::InvalidValue`] for a value of the wrong kind,
    /// a non-finite number or a negative amount.
    pub fn apply_answer(&mut self, field: FieldName, value: AnswerValue) -> Result<Phase, AnswerError> {
        let (answers, phase) = apply_answer(&self.answers, field, value, &self.rules)?;
        self.answers = answers;
        Ok(phase)
    }

    /// Like [`apply_answer`](Self::apply_answer), but takes the wire name of the field.
    ///
    /// # Errors
    ///
    /// Returns [`AnswerError::InvalidField`] for an unknown name, including
    /// `path`, which is derived and never written directly.
    pub fn apply_named(&mut self, field: &str, value: AnswerValue) -> Result<Phase, AnswerError> {
        let field: FieldName = field.parse()?;
        self.apply_answer(field, value)
    }

    /// Clears every answer. The rules are kept.
    pub fn reset(&mut self) {
        info!("session reset");
        self.answers = Answers::default();
    }

    pub fn traffic_state(&self) -> TrafficState {
        TrafficEvaluator::new(&self.rules).evaluate(&self.answers)
    }

    pub fn billing_sequence(&self) -> BillingSequence {
        BillingSequenceBuilder::new(&self.rules).build(&self.answers)
    }

    pub fn selections(&self) -> Vec<Selection> {
        selections(&self.answers, &self.rules)
    }

    pub fn outcome(&self) -> Outcome {
        outcome(&self.answers, &self.rules)
    }
}
