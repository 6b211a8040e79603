//! UI event types emitted by AgendaController for presentation layer rendering
//!
//! These events form the output port from the application layer to the
//! presentation layer. Rendering buttons, sliders and chat is up to the
//! receiver; the controller only says what should be visible.

use agenda_domain::{
    AgendaCard, AgendaPhase, DeskVoteState, OutcomeSummary, OutcomeType, SeatIndex,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the shared (central) agenda panel should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum MainPrompt {
    /// No agenda in play; offers the reset-cards affordance
    PlaceAgendaToStart,
    /// Yes/no: run the vote helper for this agenda?
    UseHelper { agenda: AgendaCard },
    /// Pick the outcome category
    ChooseOutcomeType { choices: Vec<OutcomeType> },
    Whens,
    Afters,
    Voting,
    Post,
    /// Final summary; offers the reset-cards affordance
    Outcome { summary: String },
}

/// A finished agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaResolution {
    pub agenda: AgendaCard,
    pub outcome_type: OutcomeType,
    pub summary: OutcomeSummary,
    pub resolved_at: DateTime<Utc>,
}

impl AgendaResolution {
    /// Broadcast text, e.g. `Outcome: For: 3, Against: 5`
    pub fn message(&self) -> String {
        format!("Outcome: {}", self.summary)
    }
}

/// Events emitted by AgendaController for the presentation layer to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgendaUiEvent {
    // === Shared panel ===
    /// Replace the shared panel
    MainPanel(MainPrompt),
    /// The protocol entered a phase
    PhaseEntered { phase: AgendaPhase },
    /// Status line: whose turn it is
    Waiting {
        phase: AgendaPhase,
        seat: SeatIndex,
        message: String,
    },

    // === Seat panels ===
    /// Seat panels appear, one per seat
    DesksAttached {
        seats: Vec<SeatIndex>,
        outcomes: Vec<String>,
        editable: bool,
    },
    /// A seat panel changed
    DeskUpdated(DeskVoteState),
    /// Outcome names of an editable catalog changed
    OutcomesChanged { outcomes: Vec<String> },
    /// All seat panels are removed
    DesksDetached,

    // === Table ===
    /// Chat message for every player
    Broadcast { text: String },
    /// Voting finished
    Resolved(AgendaResolution),
    /// Exhausted planet cards were turned face up
    CardsReset { count: usize },
}
