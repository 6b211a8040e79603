//! In-memory table state
//!
//! [`JsonTableState`] stands in for a game host: it holds the seat roster
//! and the cards on the table, loaded from JSON, and implements
//! [`BoardPort`] for the agenda controller.

mod scenario;
mod speaker_order;

pub use scenario::Scenario;
pub use speaker_order::SpeakerTurnOrder;

use agenda_application::BoardPort;
use agenda_domain::{BoardSnapshot, CardId, Seat, SeatIndex};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

/// Errors from loading or mutating table state
#[derive(Error, Debug)]
pub enum TableStateError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Table has no seats")]
    NoSeats,

    #[error("Seat {0} appears more than once")]
    DuplicateSeat(SeatIndex),

    #[error("Speaker {0} is not seated")]
    UnknownSpeaker(SeatIndex),

    #[error("Card {0} is not on the table")]
    UnknownCard(CardId),
}

impl TableStateError {
    /// Check if the input could not be read or parsed at all
    pub fn is_unreadable(&self) -> bool {
        matches!(self, TableStateError::Io { .. } | TableStateError::Json(_))
    }
}

/// Seat roster plus a mutable set of cards
pub struct JsonTableState {
    seats: Vec<Seat>,
    board: Mutex<BoardSnapshot>,
}

impl JsonTableState {
    pub fn new(seats: Vec<Seat>, board: BoardSnapshot) -> Result<Self, TableStateError> {
        validate_seats(&seats)?;
        Ok(Self {
            seats,
            board: Mutex::new(board),
        })
    }

    /// Turn a card face up or face down
    pub fn set_face_up(&self, card: &CardId, face_up: bool) -> Result<(), TableStateError> {
        let mut board = self.board();
        let found = board
            .cards
            .iter_mut()
            .find(|c| &c.id == card)
            .ok_or_else(|| TableStateError::UnknownCard(card.clone()))?;
        found.face_up = face_up;
        Ok(())
    }

    /// Replace every card on the table
    pub fn replace_board(&self, snapshot: BoardSnapshot) {
        *self.board() = snapshot;
    }

    fn board(&self) -> MutexGuard<'_, BoardSnapshot> {
        self.board.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BoardPort for JsonTableState {
    fn seats(&self) -> Vec<Seat> {
        self.seats.clone()
    }

    fn snapshot(&self) -> BoardSnapshot {
        self.board().clone()
    }

    fn flip_face_up(&self, cards: &[CardId]) -> usize {
        let mut board = self.board();
        let mut flipped = 0;
        for card in board
            .cards
            .iter_mut()
            .filter(|c| !c.face_up && cards.contains(&c.id))
        {
            card.face_up = true;
            flipped += 1;
        }
        debug!("Flipped {} of {} requested cards face up", flipped, cards.len());
        flipped
    }
}

pub(crate) fn validate_seats(seats: &[Seat]) -> Result<(), TableStateError> {
    if seats.is_empty() {
        return Err(TableStateError::NoSeats);
    }
    let mut seen = HashSet::new();
    for seat in seats {
        if !seen.insert(seat.index) {
            return Err(TableStateError::DuplicateSeat(seat.index));
        }
    }
    Ok(())
}
