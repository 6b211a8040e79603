//! Agenda behavior configuration.
//!
//! [`AgendaConfig`] controls the optional parts of the agenda procedure.
//! It is set once at startup and handed to the controller.
//!
//! | Field | Default | Effect |
//! |-------|---------|--------|
//! | `post_phase` | `false` | Route `Vote` through `Post` before `Finish` |
//! | `tally_freeze` | `Reveal` | When the vote tally is read from the board |
//! | `live_flip_adjustment` | `false` | Adjust committed votes when planet cards flip |
//! | `other_outcome_slots` | `2` | Placeholder outcomes for the "Other" type |

use agenda_domain::AgendaStateMachine;
use serde::{Deserialize, Serialize};

/// Point at which the vote tally is read from the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyFreeze {
    /// Computed once when the agenda is revealed
    #[default]
    Reveal,
    /// Recomputed when the vote phase begins
    VoteStart,
}

impl std::str::FromStr for TallyFreeze {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reveal" => Ok(TallyFreeze::Reveal),
            "vote_start" | "vote" => Ok(TallyFreeze::VoteStart),
            _ => Err(format!("unknown tally freeze point: {s}")),
        }
    }
}

/// Configuration for the agenda controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    pub post_phase: bool,
    pub tally_freeze: TallyFreeze,
    pub live_flip_adjustment: bool,
    pub other_outcome_slots: usize,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            post_phase: false,
            tally_freeze: TallyFreeze::Reveal,
            live_flip_adjustment: false,
            other_outcome_slots: 2,
        }
    }
}

impl AgendaConfig {
    // ==================== Builder Methods (init-time) ====================

    pub fn with_post_phase(mut self, enabled: bool) -> Self {
        self.post_phase = enabled;
        self
    }

    pub fn with_tally_freeze(mut self, freeze: TallyFreeze) -> Self {
        self.tally_freeze = freeze;
        self
    }

    pub fn with_live_flip_adjustment(mut self, enabled: bool) -> Self {
        self.live_flip_adjustment = enabled;
        self
    }

    pub fn with_other_outcome_slots(mut self, slots: usize) -> Self {
        self.other_outcome_slots = slots;
        self
    }

    /// Fresh phase machine honoring `post_phase`
    pub fn state_machine(&self) -> AgendaStateMachine {
        AgendaStateMachine::new().with_post_phase(self.post_phase)
    }
}
