//! Turn coordination
//!
//! A [`TurnCoordinator`] walks one seat ordering per phase. Seats can be
//! marked passed at any time (including before their turn); the walk skips
//! passed seats and the order is exhausted once no unpassed seat remains at
//! or after the cursor.

use crate::seat::SeatIndex;
use std::collections::BTreeSet;

/// Turn pointer and pass set over an ordering of seats
///
/// # Example
///
/// ```
/// use agenda_domain::seat::SeatIndex;
/// use agenda_domain::turn::TurnCoordinator;
///
/// let mut turns = TurnCoordinator::new();
/// turns.set_order(vec![SeatIndex(2), SeatIndex(0), SeatIndex(1)]);
/// turns.set_passed(SeatIndex(0), true);
///
/// assert_eq!(turns.current_turn(), Some(SeatIndex(2)));
/// turns.end_turn();
/// assert_eq!(turns.current_turn(), Some(SeatIndex(1)));
/// turns.end_turn();
/// assert!(turns.is_order_exhausted());
/// assert_eq!(turns.current_turn(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnCoordinator {
    order: Vec<SeatIndex>,
    cursor: usize,
    passed: BTreeSet<SeatIndex>,
}

impl TurnCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ordering, pointing at its first seat with no passes
    pub fn set_order(&mut self, order: Vec<SeatIndex>) {
        self.order = order;
        self.cursor = 0;
        self.passed.clear();
    }

    pub fn order(&self) -> &[SeatIndex] {
        &self.order
    }

    /// Point the turn at `seat`
    ///
    /// Returns `false` (and changes nothing) when the seat is not in the order.
    pub fn set_current_turn(&mut self, seat: SeatIndex) -> bool {
        match self.position(seat) {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    /// Seat whose turn it is, `None` once the order is exhausted
    ///
    /// When the cursor sits on a passed seat (it passed during its own turn
    /// and nobody called [`end_turn`](Self::end_turn) yet) that seat is
    /// still reported.
    pub fn current_turn(&self) -> Option<SeatIndex> {
        if self.is_order_exhausted() {
            return None;
        }
        self.order.get(self.cursor).copied()
    }

    /// Move to the next unpassed seat after the current one
    ///
    /// Moves past the end of the order when none remains.
    pub fn end_turn(&mut self) {
        if self.cursor >= self.order.len() {
            return;
        }
        self.cursor = self.order[self.cursor + 1..]
            .iter()
            .position(|seat| !self.passed.contains(seat))
            .map_or(self.order.len(), |offset| self.cursor + 1 + offset);
    }

    /// Mark or unmark a seat as passed; seats outside the order are ignored
    pub fn set_passed(&mut self, seat: SeatIndex, passed: bool) {
        if self.position(seat).is_none() {
            return;
        }
        if passed {
            self.passed.insert(seat);
        } else {
            self.passed.remove(&seat);
        }
    }

    pub fn is_passed(&self, seat: SeatIndex) -> bool {
        self.passed.contains(&seat)
    }

    pub fn clear_all_passed(&mut self) {
        self.passed.clear();
    }

    /// First seat in the order that has not passed
    pub fn first_unpassed(&self) -> Option<SeatIndex> {
        self.order
            .iter()
            .copied()
            .find(|seat| !self.passed.contains(seat))
    }

    /// No unpassed seat remains at or after the cursor
    pub fn is_order_exhausted(&self) -> bool {
        self.order
            .get(self.cursor..)
            .is_none_or(|rest| rest.iter().all(|seat| self.passed.contains(seat)))
    }

    fn position(&self, seat: SeatIndex) -> Option<usize> {
        self.order.iter().position(|s| *s == seat)
    }
}
