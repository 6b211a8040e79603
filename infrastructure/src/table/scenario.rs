//! Scenario files
//!
//! A scenario is a table plus a scripted list of events:
//!
//! ```json
//! {
//!   "seats": [{"index": 0, "player_slot": 1, "color_name": "red"}],
//!   "speaker": 0,
//!   "board": {"cards": []},
//!   "events": [{"event": "agenda_revealed", "card": {"id": "a1", "name": "Mutiny"}}]
//! }
//! ```

use super::{JsonTableState, SpeakerTurnOrder, TableStateError, validate_seats};
use agenda_domain::{AgendaEvent, BoardSnapshot, Seat, SeatIndex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub speaker: Option<SeatIndex>,
    #[serde(default)]
    pub board: BoardSnapshot,
    #[serde(default)]
    pub events: Vec<AgendaEvent>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, TableStateError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableStateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&json)?;
        info!(
            "Loaded scenario {} ({} seats, {} cards, {} events)",
            path.display(),
            scenario.seats.len(),
            scenario.board.cards.len(),
            scenario.events.len()
        );
        Ok(scenario)
    }

    pub fn from_json(json: &str) -> Result<Self, TableStateError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), TableStateError> {
        validate_seats(&self.seats)?;
        match self.speaker {
            Some(speaker) if !self.seats.iter().any(|s| s.index == speaker) => {
                Err(TableStateError::UnknownSpeaker(speaker))
            }
            _ => Ok(()),
        }
    }

    /// Table adapter seeded with this scenario's seats and cards
    pub fn table(&self) -> Result<JsonTableState, TableStateError> {
        JsonTableState::new(self.seats.clone(), self.board.clone())
    }

    pub fn turn_order(&self) -> SpeakerTurnOrder {
        SpeakerTurnOrder::new(self.speaker)
    }
}
