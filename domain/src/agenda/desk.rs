//! Per-seat vote state

use crate::agenda::phase::AgendaPhase;
use crate::seat::SeatIndex;
use serde::{Deserialize, Serialize};

/// What one seat has decided during an agenda
///
/// The three early-pass flags are sticky: once set they stay set until a
/// new agenda begins (which builds fresh desk states).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskVoteState {
    pub seat: SeatIndex,
    pub selected_outcome: Option<usize>,
    pub committed_votes: u32,
    pub no_whens: bool,
    pub no_afters: bool,
    pub vote_locked: bool,
}

impl DeskVoteState {
    pub fn new(seat: SeatIndex) -> Self {
        Self {
            seat,
            selected_outcome: None,
            committed_votes: 0,
            no_whens: false,
            no_afters: false,
            vote_locked: false,
        }
    }

    /// Choose an outcome, committing `available` votes to it
    ///
    /// Ignored once the vote is locked. Returns whether anything changed.
    pub fn select_outcome(&mut self, index: usize, available: u32) -> bool {
        if self.vote_locked {
            return false;
        }
        self.selected_outcome = Some(index);
        self.committed_votes = available;
        true
    }

    /// Manually override the committed vote count
    pub fn set_votes(&mut self, votes: u32) -> bool {
        if self.vote_locked {
            return false;
        }
        self.committed_votes = votes;
        true
    }

    /// Adjust committed votes after a planet card changed face
    ///
    /// Only applies while an outcome is selected and the vote is not locked.
    /// Votes never drop below zero.
    pub fn apply_vote_delta(&mut self, delta: i64) -> bool {
        if self.selected_outcome.is_none() || self.vote_locked {
            return false;
        }
        let adjusted = (i64::from(self.committed_votes) + delta).clamp(0, i64::from(u32::MAX));
        self.committed_votes = adjusted as u32;
        true
    }

    /// Record the sticky early-pass flag that belongs to `phase`
    ///
    /// Phases without an early pass are ignored.
    pub fn mark_pass(&mut self, phase: AgendaPhase) {
        match phase {
            AgendaPhase::When => self.no_whens = true,
            AgendaPhase::After => self.no_afters = true,
            AgendaPhase::Vote => self.vote_locked = true,
            _ => {}
        }
    }

    /// Whether this seat has pre-committed a pass for `phase`
    pub fn has_passed(&self, phase: AgendaPhase) -> bool {
        match phase {
            AgendaPhase::When => self.no_whens,
            AgendaPhase::After => self.no_afters,
            AgendaPhase::Vote => self.vote_locked,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_desk_is_blank() {
        let desk = DeskVoteState::new(SeatIndex(2));
        assert_eq!(desk.selected_outcome, None);
        assert_eq!(desk.committed_votes, 0);
        assert!(!desk.has_passed(AgendaPhase::When));
        assert!(!desk.has_passed(AgendaPhase::After));
        assert!(!desk.has_passed(AgendaPhase::Vote));
    }

    #[test]
    fn test_select_outcome_commits_available_votes() {
        let mut desk = DeskVoteState::new(SeatIndex(0));
        assert!(desk.select_outcome(1, 7));
        assert_eq!(desk.selected_outcome, Some(1));
        assert_eq!(desk.committed_votes, 7);
    }

    #[test]
    fn test_lock_freezes_vote() {
        let mut desk = DeskVoteState::new(SeatIndex(0));
        desk.select_outcome(0, 4);
        desk.mark_pass(AgendaPhase::Vote);

        assert!(!desk.select_outcome(1, 9));
        assert!(!desk.set_votes(2));
        assert!(!desk.apply_vote_delta(-3));
        assert_eq!(desk.selected_outcome, Some(0));
        assert_eq!(desk.committed_votes, 4);
    }

    #[test]
    fn test_vote_delta_requires_selection_and_saturates() {
        let mut desk = DeskVoteState::new(SeatIndex(0));
        assert!(!desk.apply_vote_delta(3));
        assert_eq!(desk.committed_votes, 0);

        desk.select_outcome(0, 2);
        assert!(desk.apply_vote_delta(-5));
        assert_eq!(desk.committed_votes, 0);
        assert!(desk.apply_vote_delta(4));
        assert_eq!(desk.committed_votes, 4);
    }

    #[test]
    fn test_pass_flags_are_per_phase() {
        let mut desk = DeskVoteState::new(SeatIndex(0));
        desk.mark_pass(AgendaPhase::After);
        assert!(desk.no_afters);
        assert!(!desk.no_whens);
        assert!(desk.has_passed(AgendaPhase::After));

        desk.mark_pass(AgendaPhase::Finish);
        assert!(!desk.has_passed(AgendaPhase::Finish));
    }
}
