//! Speaker-relative turn order

use agenda_application::TurnOrderPolicy;
use agenda_domain::{Seat, SeatIndex};

/// Orders seats by index, rotated around the speaker
///
/// Resolve order starts with the speaker. Vote order starts with the seat
/// after the speaker and ends with the speaker. Without a seated speaker
/// both orders fall back to plain index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeakerTurnOrder {
    speaker: Option<SeatIndex>,
}

impl SpeakerTurnOrder {
    pub fn new(speaker: Option<SeatIndex>) -> Self {
        Self { speaker }
    }

    pub fn speaker(&self) -> Option<SeatIndex> {
        self.speaker
    }

    fn rotated(&self, seats: &[Seat], offset: usize) -> Vec<SeatIndex> {
        let mut order: Vec<SeatIndex> = seats.iter().map(|s| s.index).collect();
        order.sort();
        if let Some(pos) = self
            .speaker
            .and_then(|speaker| order.iter().position(|s| *s == speaker))
        {
            let len = order.len();
            order.rotate_left((pos + offset) % len);
        }
        order
    }
}

impl TurnOrderPolicy for SpeakerTurnOrder {
    fn resolve_order(&self, seats: &[Seat]) -> Vec<SeatIndex> {
        self.rotated(seats, 0)
    }

    fn vote_order(&self, seats: &[Seat]) -> Vec<SeatIndex> {
        self.rotated(seats, 1)
    }
}
