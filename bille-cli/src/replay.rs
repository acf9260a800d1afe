//! Scripted sessions read from CSV.
//!
//! ## CSV Format
//!
//! | Column  | Type   | Notes                                                  |
//! |---------|--------|--------------------------------------------------------|
//! | `field` | string | Wire name, e.g. `certified`, `fpl`, `rwPrimaryStatus`  |
//! | `value` | string | Parsed for that field: `yes`, `Medicare`, `$75`, `30%` |
//!
//! Rows are applied in file order. Lines starting with `#` are ignored.
//!
//! ```csv
//! field,value
//! certified,yes
//! hasInsurance,yes
//! insuranceType,Commercial
//! fpl,30
//! ```

use std::path::{Path, PathBuf};

use bille_core::{AnswerError, AnswerValue, EligibilitySession, FieldName, Phase};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::input::{InputError, parse_answer};

#[derive(Debug, Deserialize)]
struct ReplayRow {
    field: String,
    value: String,
}

/// One parsed row. `row` is 1-based, header excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    pub row: usize,
    pub field: FieldName,
    pub value: AnswerValue,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("row {row}: {source}")]
    UnknownField {
        row: usize,
        #[source]
        source: AnswerError,
    },

    #[error("row {row}: {source}")]
    BadValue {
        row: usize,
        #[source]
        source: InputError,
    },

    #[error("row {row}: {source}")]
    Rejected {
        row: usize,
        #[source]
        source: AnswerError,
    },
}

fn convert_row(row: ReplayRow, row_number: usize) -> Result<ReplayStep, ReplayError> {
    let field: FieldName = row.field.parse().map_err(|source| ReplayError::UnknownField {
        row: row_number,
        source,
    })?;
    let value = parse_answer(field, &row.value).map_err(|source| ReplayError::BadValue {
        row: row_number,
        source,
    })?;

    Ok(ReplayStep {
        row: row_number,
        field,
        value,
    })
}

/// Parses a replay script held in memory.
///
/// # Errors
///
/// * [`ReplayError::Parse`] if the CSV is structurally invalid.
/// * [`ReplayError::UnknownField`] for a field that is not an answer key.
/// * [`ReplayError::BadValue`] for a value that does not fit its field.
pub fn load_from_str(input: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<ReplayRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads a replay script from disk and delegates to [`load_from_str`].
///
/// # Errors
///
/// [`ReplayError::Io`] when the file cannot be read, otherwise as
/// [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ReplayStep>, ReplayError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let steps = load_from_str(&contents)?;
    debug!(path = %path.display(), rows = steps.len(), "replay script loaded");
    Ok(steps)
}

/// Applies `steps` to `session` in order and returns the final phase.
///
/// Stops at the first rejected answer; earlier rows stay applied.
///
/// # Errors
///
/// [`ReplayError::Rejected`] carrying the row that the engine refused.
pub fn run(session: &mut EligibilitySession, steps: &[ReplayStep]) -> Result<Phase, ReplayError> {
    let mut phase = session.phase();
    for step in steps {
        phase = session
            .apply_answer(step.field, step.value)
            .map_err(|source| ReplayError::Rejected {
                row: step.row,
                source,
            })?;
    }
    info!(rows = steps.len(), %phase, "replay finished");
    Ok(phase)
}
