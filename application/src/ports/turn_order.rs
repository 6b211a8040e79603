//! Turn order port
//!
//! The agenda uses two seat orderings: the **resolve order** for the
//! reaction windows and the **vote order** for casting votes. Both depend on
//! who holds the speaker token, which the host tracks.

use agenda_domain::{Seat, SeatIndex};

/// Produces the seat orderings used by the agenda phases
pub trait TurnOrderPolicy: Send + Sync {
    /// Order for the "when", "after" and "post" phases
    fn resolve_order(&self, seats: &[Seat]) -> Vec<SeatIndex>;

    /// Order for the vote phase
    fn vote_order(&self, seats: &[Seat]) -> Vec<SeatIndex>;
}

/// Seat-index order for both phases, for hosts without a speaker
pub struct IndexTurnOrder;

impl TurnOrderPolicy for IndexTurnOrder {
    fn resolve_order(&self, seats: &[Seat]) -> Vec<SeatIndex> {
        seats.iter().map(|s| s.index).collect()
    }

    fn vote_order(&self, seats: &[Seat]) -> Vec<SeatIndex> {
        self.resolve_order(seats)
    }
}
