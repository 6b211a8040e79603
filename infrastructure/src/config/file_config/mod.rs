//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agenda;
mod output;

pub use agenda::FileAgendaConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("agenda.other_outcome_slots cannot be 0")]
    NoOtherOutcomeSlots,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Agenda procedure settings
    pub agenda: FileAgendaConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration after all sources are merged
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.agenda.other_outcome_slots == 0 {
            return Err(ConfigValidationError::NoOtherOutcomeSlots);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_application::TallyFreeze;
    use agenda_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[agenda]
post_phase = true
tally_freeze = "vote_start"
live_flip_adjustment = true
other_outcome_slots = 3

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.agenda.post_phase);
        assert_eq!(config.agenda.tally_freeze, TallyFreeze::VoteStart);
        assert!(config.agenda.live_flip_adjustment);
        assert_eq!(config.agenda.other_outcome_slots, 3);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[agenda]
live_flip_adjustment = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.agenda.live_flip_adjustment);
        // Defaults should apply
        assert!(!config.agenda.post_phase);
        assert_eq!(config.agenda.other_outcome_slots, 2);
        assert!(config.output.format.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_outcome_slots() {
        let toml_str = r#"
[agenda]
other_outcome_slots = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::NoOtherOutcomeSlots)
        );
    }
}
