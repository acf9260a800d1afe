//! Loading [`EligibilityRules`] from an optional TOML file.
//!
//! ```toml
//! # rules.toml: any key may be omitted to keep its default
//! medicare_fpl_ceiling = 400
//! lpap_fpl_ceiling = 50
//! mmcap_supervisor_threshold = 50
//! ```

use std::path::{Path, PathBuf};

use bille_core::{EligibilityRules, RulesError};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read rules file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] RulesError),
}

/// Parses and validates rules from TOML text. `origin` only labels errors.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML and
/// [`ConfigError::Invalid`] for a negative threshold.
pub fn parse_rules(text: &str, origin: &Path) -> Result<EligibilityRules, ConfigError> {
    let rules: EligibilityRules = toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    rules.validate()?;
    Ok(rules)
}

/// Reads rules from `path`, or returns the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is unreadable, is not valid TOML,
/// or holds a negative threshold.
pub fn load_rules(path: Option<&Path>) -> Result<EligibilityRules, ConfigError> {
    let Some(path) = path else {
        debug!("no rules file given, using defaults");
        return Ok(EligibilityRules::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&text, path)?;

    info!(
        path = %path.display(),
        medicare_fpl_ceiling = %rules.medicare_fpl_ceiling,
        lpap_fpl_ceiling = %rules.lpap_fpl_ceiling,
        mmcap_supervisor_threshold = %rules.mmcap_supervisor_threshold,
        "loaded eligibility rules"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(text: &str) -> Result<EligibilityRules, ConfigError> {
        parse_rules(text, Path::new("rules.toml"))
    }

    #[test]
    fn no_path_gives_defaults() {
        let rules = load_rules(None).unwrap();

        assert_eq!(rules, EligibilityRules::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let rules = parse("lpap_fpl_ceiling = 75\n").unwrap();

        assert_eq!(rules.lpap_fpl_ceiling, dec!(75));
        assert_eq!(rules.medicare_fpl_ceiling, dec!(400));
        assert_eq!(rules.mmcap_supervisor_threshold, dec!(50));
    }

    #[test]
    fn fractional_thresholds_are_accepted() {
        let rules = parse("mmcap_supervisor_threshold = \"49.99\"\n").unwrap();

        assert_eq!(rules.mmcap_supervisor_threshold, dec!(49.99));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let result = parse("medicare_fpl_ceiling = -1\n");

        assert!(matches!(
            result,
            Err(ConfigError::Invalid(RulesError::NegativeThreshold {
                name: "medicare_fpl_ceiling",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = parse("lpap_fpl_ceiling = ");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_rules(Some(Path::new("does/not/exist.toml")));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
