//! Agenda session aggregate
//!
//! Everything that belongs to one revealed agenda: its phase machine, the
//! frozen vote tally, the outcome catalog and one desk state per seat. A new
//! reveal replaces the whole aggregate.

use crate::agenda::desk::DeskVoteState;
use crate::agenda::outcome::OutcomeCatalog;
use crate::agenda::phase::{AgendaPhase, AgendaStateMachine};
use crate::agenda::summary::OutcomeSummary;
use crate::agenda::tally::VoteTally;
use crate::board::AgendaCard;
use crate::core::error::DomainError;
use crate::seat::{Seat, SeatIndex};

#[derive(Debug, Clone)]
pub struct AgendaSession {
    agenda: AgendaCard,
    machine: AgendaStateMachine,
    tally: VoteTally,
    catalog: Option<OutcomeCatalog>,
    desks: Option<Vec<DeskVoteState>>,
}

impl AgendaSession {
    pub fn new(agenda: AgendaCard, machine: AgendaStateMachine, tally: VoteTally) -> Self {
        Self {
            agenda,
            machine,
            tally,
            catalog: None,
            desks: None,
        }
    }

    pub fn agenda(&self) -> &AgendaCard {
        &self.agenda
    }

    pub fn phase(&self) -> AgendaPhase {
        self.machine.phase()
    }

    pub fn machine(&self) -> &AgendaStateMachine {
        &self.machine
    }

    /// Advance the phase machine
    pub fn next_phase(&mut self) -> AgendaPhase {
        self.machine.next().phase()
    }

    pub fn tally(&self) -> &VoteTally {
        &self.tally
    }

    /// Replace the tally (used when the freeze point is later than reveal)
    pub fn set_tally(&mut self, tally: VoteTally) {
        self.tally = tally;
    }

    pub fn catalog(&self) -> Option<&OutcomeCatalog> {
        self.catalog.as_ref()
    }

    pub fn catalog_mut(&mut self) -> Option<&mut OutcomeCatalog> {
        self.catalog.as_mut()
    }

    /// Fix the outcome catalog; only the first choice counts
    pub fn choose_outcomes(&mut self, catalog: OutcomeCatalog) -> bool {
        if self.catalog.is_some() {
            return false;
        }
        self.catalog = Some(catalog);
        true
    }

    /// Create one desk per seat once outcomes are known
    ///
    /// Returns `true` only when desks were created by this call.
    pub fn ensure_desks(&mut self, seats: &[Seat]) -> bool {
        if self.catalog.is_none() || self.desks.is_some() {
            return false;
        }
        self.desks = Some(seats.iter().map(|s| DeskVoteState::new(s.index)).collect());
        true
    }

    pub fn desks(&self) -> Option<&[DeskVoteState]> {
        self.desks.as_deref()
    }

    pub fn desk(&self, seat: SeatIndex) -> Option<&DeskVoteState> {
        self.desks.as_ref()?.iter().find(|d| d.seat == seat)
    }

    pub fn desk_mut(&mut self, seat: SeatIndex) -> Result<&mut DeskVoteState, DomainError> {
        self.desks
            .as_mut()
            .and_then(|desks| desks.iter_mut().find(|d| d.seat == seat))
            .ok_or(DomainError::UnknownSeat(seat))
    }

    /// Votes per outcome as they stand now
    pub fn summary(&self) -> Option<OutcomeSummary> {
        let catalog = self.catalog.as_ref()?;
        let desks = self.desks.as_deref().unwrap_or_default();
        Some(OutcomeSummary::from_desks(catalog, desks))
    }
}
