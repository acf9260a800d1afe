//! The question-and-answer loop behind `bill-e interactive`.
//!
//! Generic over its reader and writer so tests can script a whole session.

use std::io::{self, BufRead, Write};

use bille_core::{AnswerValue, Answers, EligibilitySession, FieldName, Question};
use thiserror::Error;
use tracing::debug;

use crate::input::{InputError, parse_answer};
use crate::render;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Reset,
    Answer(FieldName, AnswerValue),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("a decision has been reached; type 'reset' for a new case or 'quit' to exit")]
    Finished,

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Interprets one line of operator input against the current question.
///
/// Categorical questions take a choice number or the answer itself
/// (`yes`, `medicare`, `denied`); numeric ones take `30`, `30%`, `$75`.
pub fn parse_command(
    text: &str,
    question: Option<Question>,
    answers: &Answers,
) -> Result<Command, CommandError> {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "reset" => return Ok(Command::Reset),
        _ => {}
    }

    let question = question.ok_or(CommandError::Finished)?;
    let field = question.field();
    let choices = question.choices(answers);

    let chosen = text
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| choices.get(idx));
    let value = match chosen {
        Some(choice) => choice.value,
        None => parse_answer(field, text)?,
    };
    Ok(Command::Answer(field, value))
}

/// Runs until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut EligibilitySession,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut lines = input.lines();
    let mut redraw = true;

    loop {
        if redraw {
            write!(output, "{}", render::session(session))?;
        }
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            redraw = false;
            continue;
        }

        match parse_command(&line, session.current_question(), session.answers()) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Reset) => {
                session.reset();
                redraw = true;
            }
            Ok(Command::Answer(field, value)) => match session.apply_answer(field, value) {
                Ok(phase) => {
                    debug!(%field, %phase, "interactive answer");
                    redraw = true;
                }
                Err(err) => {
                    writeln!(output, "  ! {err}")?;
                    redraw = false;
                }
            },
            Err(err) => {
                writeln!(output, "  ! {err}")?;
                redraw = false;
            }
        }
    }
}
