//! Seats at the table
//!
//! The seat roster is owned by the host. This crate only indexes into it:
//! seats are never created or destroyed here.

use crate::core::string::capitalize_first;
use serde::{Deserialize, Serialize};

/// Stable position of a seat at the table (0..N-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatIndex(pub usize);

impl std::fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host identifier of the player occupying a seat (or clicking a button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerSlot(pub u32);

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// A player's persistent position at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub index: SeatIndex,
    pub player_slot: PlayerSlot,
    pub color_name: String,
}

impl Seat {
    pub fn new(index: usize, player_slot: u32, color_name: impl Into<String>) -> Self {
        Self {
            index: SeatIndex(index),
            player_slot: PlayerSlot(player_slot),
            color_name: color_name.into(),
        }
    }

    /// Color name as shown to players (e.g. "red" -> "Red")
    pub fn display_name(&self) -> String {
        capitalize_first(&self.color_name)
    }
}

/// Find a seat in a roster by index
pub fn find_seat(seats: &[Seat], index: SeatIndex) -> Option<&Seat> {
    seats.iter().find(|s| s.index == index)
}
