//! Agenda procedure configuration from TOML (`[agenda]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [agenda]
//! post_phase = true
//! tally_freeze = "vote_start"
//! live_flip_adjustment = false
//! other_outcome_slots = 3
//! ```

use agenda_application::{AgendaConfig, TallyFreeze};
use serde::{Deserialize, Serialize};

/// Raw `[agenda]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgendaConfig {
    /// Insert the POST phase between VOTE and FINISH
    pub post_phase: bool,
    /// When the vote tally is read from the table
    pub tally_freeze: TallyFreeze,
    /// Adjust open votes as planet cards are flipped
    pub live_flip_adjustment: bool,
    /// Placeholder outcomes seeded into an "Other" outcome list
    pub other_outcome_slots: usize,
}

impl Default for FileAgendaConfig {
    fn default() -> Self {
        let defaults = AgendaConfig::default();
        Self {
            post_phase: defaults.post_phase,
            tally_freeze: defaults.tally_freeze,
            live_flip_adjustment: defaults.live_flip_adjustment,
            other_outcome_slots: defaults.other_outcome_slots,
        }
    }
}

impl FileAgendaConfig {
    /// Convert into the application-level configuration
    pub fn to_agenda_config(&self) -> AgendaConfig {
        AgendaConfig::default()
            .with_post_phase(self.post_phase)
            .with_tally_freeze(self.tally_freeze)
            .with_live_flip_adjustment(self.live_flip_adjustment)
            .with_other_outcome_slots(self.other_outcome_slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agenda_config_default() {
        let config = FileAgendaConfig::default();
        assert!(!config.post_phase);
        assert_eq!(config.tally_freeze, TallyFreeze::Reveal);
        assert!(!config.live_flip_adjustment);
        assert_eq!(config.other_outcome_slots, 2);
    }

    #[test]
    fn test_agenda_config_deserialize() {
        let toml_str = r#"
[agenda]
post_phase = true
tally_freeze = "vote_start"
other_outcome_slots = 4
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.agenda.post_phase);
        assert_eq!(config.agenda.tally_freeze, TallyFreeze::VoteStart);
        assert!(!config.agenda.live_flip_adjustment);

        let agenda = config.agenda.to_agenda_config();
        assert!(agenda.post_phase);
        assert_eq!(agenda.other_outcome_slots, 4);
        assert_eq!(
            agenda,
            AgendaConfig::default()
                .with_post_phase(true)
                .with_tally_freeze(TallyFreeze::VoteStart)
                .with_other_outcome_slots(4)
        );
    }

    #[test]
    fn test_unknown_tally_freeze_is_rejected() {
        let toml_str = r#"
[agenda]
tally_freeze = "never"
"#;
        assert!(toml::from_str::<super::super::FileConfig>(toml_str).is_err());
    }
}
