//! Plain-text panels for the terminal front end.
//!
//! Every function returns a `String` so the interactive loop and replay
//! output share one rendering, and tests can compare it directly.

use std::fmt::Write;

use bille_core::{
    Answers, BillingSequence, EligibilitySession, Outcome, Question, Selection, Tone,
    TrafficLight, TrafficState,
};

pub const MEDICARE_RULE_CALLOUT: &str = "MEDICARE RULE: No manufacturer copay cards allowed.";
pub const PI2MEDCO_CALLOUT: &str = "PI2MEDCO REQUIRED";

const RULE: &str = "----------------------------------------------------------------";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}\n{title}\n{RULE}");
}

fn light_label(light: TrafficLight) -> &'static str {
    match light {
        TrafficLight::Red => "RED (stop)",
        TrafficLight::Yellow => "YELLOW (caution)",
        TrafficLight::Green => "GREEN (ok)",
        TrafficLight::Neutral => "NEUTRAL (no answers yet)",
    }
}

fn tone_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Red => "RED",
        Tone::Blue => "BLUE",
        Tone::Green => "GREEN",
    }
}

pub fn selections(selections: &[Selection]) -> String {
    let mut out = String::new();
    heading(&mut out, "Selections");
    let width = selections.iter().map(|s| s.label.len()).max().unwrap_or(0);
    for selection in selections {
        let _ = writeln!(out, "  {:<width$}  {}", selection.label, selection.value);
    }
    out
}

pub fn traffic(state: &TrafficState) -> String {
    let mut out = String::new();
    heading(&mut out, "Status");
    let _ = writeln!(out, "  {}", light_label(state.state));
    for reason in &state.reasons {
        let _ = writeln!(out, "  - {reason}");
    }
    out
}

/// The billing checklist, with the Medicare and PI2MEDCO callouts above it.
pub fn sequence(sequence: &BillingSequence, state: &TrafficState) -> String {
    let mut out = String::new();
    heading(&mut out, "Billing sequence");
    if state.flags.medicare_no_mfg {
        let _ = writeln!(out, "  ! {MEDICARE_RULE_CALLOUT}");
    }
    if sequence.has_medco_in_sequence {
        let _ = writeln!(out, "  ! {PI2MEDCO_CALLOUT}");
    }

    if sequence.is_empty() {
        let _ = writeln!(out, "  Make selections to see the recommended billing sequence.");
        return out;
    }
    for (idx, step) in sequence.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. [{}] {}", idx + 1, step.category.badge(), step.label);
    }
    if let Some(note) = &sequence.note {
        let _ = writeln!(out, "  Note: {note}");
    }
    out
}

/// The question prompt with numbered choices, or an input hint for numbers.
pub fn question(question: Question, answers: &Answers) -> String {
    let mut out = String::new();
    if let Some(warning) = question.warning(answers) {
        let _ = writeln!(out, "  ! {warning}");
    }
    let _ = writeln!(out, "{}", question.prompt());

    if question.field().is_numeric() {
        if let Some(placeholder) = question.placeholder() {
            let _ = writeln!(out, "  ({placeholder})");
        }
    }
    for (idx, choice) in question.choices(answers).iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", idx + 1, choice.label);
    }
    out
}

pub fn outcome(outcome: &Outcome) -> String {
    let mut out = String::new();
    heading(&mut out, "Decision");
    let _ = writeln!(out, "  [{}] {}", tone_label(outcome.tone), outcome.message);
    if let Some(note) = &outcome.note {
        let _ = writeln!(out, "  {note}");
    }
    out
}

/// Everything derived from the session: selections, status, sequence, and
/// either the current question or the decision.
pub fn session(session: &EligibilitySession) -> String {
    let state = session.traffic_state();
    let mut out = selections(&session.selections());
    out.push_str(&traffic(&state));
    out.push_str(&sequence(&session.billing_sequence(), &state));
    match session.current_question() {
        Some(q) => {
            out.push_str(RULE);
            out.push('\n');
            out.push_str(&question(q, session.answers()));
        }
        None => out.push_str(&outcome(&session.outcome())),
    }
    out
}

#[cfg(test)]
mod tests {
    use bille_core::{AnswerValue, DrugType, FieldName, InsuranceType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn medicare_session() -> EligibilitySession {
        let mut session = EligibilitySession::default();
        session.apply_answer(FieldName::Certified, true.into()).unwrap();
        session.apply_answer(FieldName::HasInsurance, true.into()).unwrap();
        session
            .apply_answer(FieldName::InsuranceType, InsuranceType::Medicare.into())
            .unwrap();
        session
    }

    #[test]
    fn selections_are_aligned() {
        let rendered = selections(&EligibilitySession::default().selections());

        assert!(rendered.contains("  Ryan White Certified (up to date)  —\n"));
        assert!(rendered.contains("  Has insurance                      —\n"));
    }

    #[test]
    fn empty_sequence_shows_hint() {
        let session = EligibilitySession::default();

        let rendered = sequence(&session.billing_sequence(), &session.traffic_state());

        assert!(rendered.ends_with("  Make selections to see the recommended billing sequence.\n"));
    }

    #[test]
    fn medicare_sequence_has_callout_badges_and_note() {
        let mut session = medicare_session();
        session.apply_answer(FieldName::Fpl, AnswerValue::Number(120.0)).unwrap();
        session.apply_answer(FieldName::DrugType, DrugType::ArvBrand.into()).unwrap();

        let rendered = sequence(&session.billing_sequence(), &session.traffic_state());

        let lines: Vec<&str> = rendered.lines().skip(3).collect();
        assert_eq!(
            lines,
            vec![
                "  ! MEDICARE RULE: No manufacturer copay cards allowed.",
                "  1. [PRIMARY] Primary Insurance",
                "  2. [DOH COPAY] DOH Copay Card",
                "  Note: NEVER use Manufacturer Copay Cards for Medicare.",
            ]
        );
    }

    #[test]
    fn drug_question_carries_medicare_warning() {
        let mut session = medicare_session();
        session.apply_answer(FieldName::Fpl, AnswerValue::Number(120.0)).unwrap();

        let rendered = question(Question::DrugType, session.answers());

        assert_eq!(
            rendered,
            "  ! MEDICARE: Manufacturer Copay Cards are not allowed\n\
             What is the drug type?\n\
             \x20 1) ARV/Brand (DOH Copay Only)\n\
             \x20 2) RW FORMULARY DRUG\n\
             \x20 3) NON-RW-FORMULARY DRUG\n"
        );
    }

    #[test]
    fn numeric_question_shows_placeholder() {
        let rendered = question(Question::Fpl, &Answers::default());

        assert_eq!(rendered, "What is the patient's FPL %?\n  (Enter FPL %)\n");
    }

    #[test]
    fn session_at_result_shows_decision() {
        let mut case = EligibilitySession::default();
        case.apply_answer(FieldName::Certified, false.into()).unwrap();

        let rendered = session(&case);

        assert!(rendered.contains("  RED (stop)\n  - Not Ryan White certified\n"));
        assert!(rendered.contains("  [RED] STOP: Refer to Case Manager for Part A/B enrollment.\n"));
    }
}
