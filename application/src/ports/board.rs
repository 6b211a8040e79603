//! Board port
//!
//! Defines the interface to the host's table: who is seated, which cards
//! lie where, and the one physical manipulation the agenda flow performs
//! (turning exhausted planet cards face up again).

use agenda_domain::{BoardSnapshot, CardId, Seat};

/// Access to the seat roster and the cards on the table
///
/// Implementations live in the infrastructure layer.
pub trait BoardPort: Send + Sync {
    /// Current seat roster, ordered by seat index
    fn seats(&self) -> Vec<Seat>;

    /// Cards on the table right now, resolved to their nearest seat
    fn snapshot(&self) -> BoardSnapshot;

    /// Turn the given cards face up, returning how many were flipped
    fn flip_face_up(&self, cards: &[CardId]) -> usize;
}
