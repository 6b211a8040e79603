//! Agenda Controller
//!
//! Drives one agenda at a time through its phases and keeps the phase, the
//! seat panels and the shared turn pointer consistent while seats act
//! asynchronously. Emits AgendaUiEvent messages to a channel for the
//! presentation layer to render.
//!
//! Every inbound event is processed to completion before the next one; the
//! controller takes `&mut self` and is meant to be owned by a single task
//! (see [`AgendaActor`](crate::use_cases::agenda_actor::AgendaActor)).

use crate::config::{AgendaConfig, TallyFreeze};
use crate::ports::board::BoardPort;
use crate::ports::turn_order::TurnOrderPolicy;
use crate::ports::ui_event::{AgendaResolution, AgendaUiEvent, MainPrompt};
use agenda_domain::seat::find_seat;
use agenda_domain::{
    AgendaCard, AgendaEvent, AgendaPhase, AgendaSession, CardId, CardKind, DeskVoteState,
    DomainError, OutcomeCatalog, OutcomeSummary, OutcomeType, PlayerSlot, SeatAction, SeatIndex,
    TallyBonuses, TurnCoordinator, VoteTallyCalculator,
};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Errors that can occur while handling agenda events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgendaError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Phase {0} auto-advanced into itself")]
    AutoAdvanceLoop(AgendaPhase),

    #[error("Agenda actor stopped")]
    ActorStopped,
}

/// Phases entered while handling a single event
#[derive(Debug, Default)]
struct AutoAdvanceGuard {
    visited: HashSet<AgendaPhase>,
}

impl AutoAdvanceGuard {
    fn enter(&mut self, phase: AgendaPhase) -> Result<(), AgendaError> {
        if self.visited.insert(phase) {
            return Ok(());
        }
        error!("Phase {} auto-advanced into itself", phase);
        Err(AgendaError::AutoAdvanceLoop(phase))
    }
}

/// Orchestrates the agenda procedure
///
/// Owns the active [`AgendaSession`] (if any) and the [`TurnCoordinator`].
/// Seat actions that arrive in the wrong phase or out of turn are absorbed:
/// an early pass is remembered on the seat's desk and applied when its
/// phase begins.
pub struct AgendaController {
    board: Arc<dyn BoardPort>,
    turn_order: Arc<dyn TurnOrderPolicy>,
    config: AgendaConfig,
    turns: TurnCoordinator,
    session: Option<AgendaSession>,
    /// Seat panels are currently shown
    desks_attached: bool,
    last_resolution: Option<AgendaResolution>,
    /// Channel sender for UI events
    tx: mpsc::UnboundedSender<AgendaUiEvent>,
}

impl AgendaController {
    pub fn new(
        board: Arc<dyn BoardPort>,
        turn_order: Arc<dyn TurnOrderPolicy>,
        config: AgendaConfig,
        tx: mpsc::UnboundedSender<AgendaUiEvent>,
    ) -> Self {
        Self {
            board,
            turn_order,
            config,
            turns: TurnCoordinator::new(),
            session: None,
            desks_attached: false,
            last_resolution: None,
            tx,
        }
    }

    // ==================== Accessors ====================

    pub fn config(&self) -> &AgendaConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AgendaSession> {
        self.session.as_ref()
    }

    pub fn current_phase(&self) -> Option<AgendaPhase> {
        self.session.as_ref().map(AgendaSession::phase)
    }

    pub fn turns(&self) -> &TurnCoordinator {
        &self.turns
    }

    pub fn desk(&self, seat: SeatIndex) -> Option<&DeskVoteState> {
        self.session.as_ref()?.desk(seat)
    }

    /// The most recent finished agenda
    pub fn last_resolution(&self) -> Option<&AgendaResolution> {
        self.last_resolution.as_ref()
    }

    /// Seat the table is waiting on, if the current phase has seat turns
    pub fn waiting_seat(&self) -> Option<SeatIndex> {
        let phase = self.current_phase()?;
        if !phase.has_seat_turns() {
            return None;
        }
        self.turns.current_turn()
    }

    /// Status line for [`waiting_seat`](Self::waiting_seat)
    pub fn waiting_message(&self) -> Option<String> {
        let phase = self.current_phase()?;
        let seat = self.waiting_seat()?;
        let doing = match phase {
            AgendaPhase::When => "to play or pass whens",
            AgendaPhase::After => "to play or pass afters",
            _ => "to vote",
        };
        Some(format!("Waiting on {} {}", self.seat_name(seat), doing))
    }

    // ==================== Event Handling ====================

    /// Show whatever the current state calls for
    ///
    /// Hosts call this once after construction.
    pub fn refresh(&mut self) -> Result<(), AgendaError> {
        self.reset_for_current_state()
    }

    /// Dispatch one inbound event
    pub fn handle(&mut self, event: AgendaEvent) -> Result<(), AgendaError> {
        match event {
            AgendaEvent::AgendaRevealed { card } => self.on_agenda_revealed(card),
            AgendaEvent::TurnChanged => {
                self.on_turn_changed();
                Ok(())
            }
            AgendaEvent::CardFaceChanged { card, face_up } => {
                self.on_card_face_changed(&card, face_up)
            }
            AgendaEvent::SeatAction {
                seat,
                actor,
                action,
            } => self.on_seat_action(seat, action, actor),
        }
    }

    /// A new agenda was revealed (or the agenda was removed)
    ///
    /// Always discards the previous session, whatever its phase.
    pub fn on_agenda_revealed(&mut self, card: Option<AgendaCard>) -> Result<(), AgendaError> {
        self.turns.clear_all_passed();
        self.session = match card {
            Some(card) => {
                info!("Agenda {} revealed", card.id);
                let tally = VoteTallyCalculator::compute(&self.board.seats(), &self.board.snapshot());
                debug!("Vote tally at reveal: {} total", tally.total());
                Some(AgendaSession::new(card, self.config.state_machine(), tally))
            }
            None => {
                info!("Agenda removed");
                None
            }
        };
        self.reset_for_current_state()
    }

    /// The host moved its turn pointer; only the status line changes
    pub fn on_turn_changed(&mut self) {
        self.update_waiting_message();
    }

    /// A card on the table was flipped
    ///
    /// Best effort: only applied when live flip adjustment is enabled and the
    /// owning seat has picked an outcome without locking its vote.
    pub fn on_card_face_changed(&mut self, card: &CardId, face_up: bool) -> Result<(), AgendaError> {
        if !self.config.live_flip_adjustment {
            debug!("Ignoring flip of {}: live flip adjustment disabled", card);
            return Ok(());
        }
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.desks().is_none() {
            return Ok(());
        }

        let snapshot = self.board.snapshot();
        let Some(found) = snapshot.find(card) else {
            return Err(DomainError::UnknownCard(card.clone()).into());
        };
        let CardKind::Planet(planet) = found.kind() else {
            return Ok(());
        };
        let Some(seat) = found.nearest_seat else {
            warn!("Flipped planet {} has no nearby seat, skipping", card);
            return Ok(());
        };

        let value = i64::from(TallyBonuses::detect(&snapshot).planet_value(seat, planet));
        let delta = if face_up { value } else { -value };

        let Ok(desk) = session.desk_mut(seat) else {
            warn!("Flipped planet {} is near unknown seat {}", card, seat);
            return Ok(());
        };
        if !desk.apply_vote_delta(delta) {
            debug!("Seat {} has no open vote, flip of {} ignored", seat, card);
            return Ok(());
        }
        debug!("Adjusted seat {} votes by {} after flip of {}", seat, delta, card);
        let updated = desk.clone();
        self.emit(AgendaUiEvent::DeskUpdated(updated));
        Ok(())
    }

    /// A seat (or the shared panel, on behalf of a seat) did something
    pub fn on_seat_action(
        &mut self,
        seat: SeatIndex,
        action: SeatAction,
        actor: PlayerSlot,
    ) -> Result<(), AgendaError> {
        debug!("Seat {} ({}) action: {}", seat, actor, action);
        let phase = self.current_phase();

        match action {
            SeatAction::Begin if phase == Some(AgendaPhase::Start) => self.advance_phase(),
            SeatAction::Cancel if phase == Some(AgendaPhase::Start) => {
                info!("Agenda helper declined by {}", actor);
                self.session = None;
                self.reset_for_current_state()
            }
            SeatAction::SelectOutcomeType { outcome_type }
                if phase == Some(AgendaPhase::OutcomeType) =>
            {
                self.select_outcome_type(outcome_type)
            }
            SeatAction::Begin | SeatAction::Cancel | SeatAction::SelectOutcomeType { .. } => {
                debug!("Ignoring {} during {:?}", action, phase);
                Ok(())
            }
            SeatAction::SelectOutcome { index } => self.select_outcome(seat, index),
            SeatAction::SetVotes { votes } => self.update_desk(seat, |desk| desk.set_votes(votes)),
            SeatAction::RenameOutcome { index, name } => {
                self.edit_outcomes(|catalog| catalog.rename(index, name))
            }
            SeatAction::AddOutcome { name } => {
                self.edit_outcomes(|catalog| catalog.push(name).map(|_| ()))
            }
            SeatAction::NoWhens => self.pass_for_phase(seat, actor, AgendaPhase::When),
            SeatAction::NoAfters => self.pass_for_phase(seat, actor, AgendaPhase::After),
            SeatAction::LockVote => self.pass_for_phase(seat, actor, AgendaPhase::Vote),
            SeatAction::PlayWhen => self.play_reaction(seat, AgendaPhase::When),
            SeatAction::PlayAfter => self.play_reaction(seat, AgendaPhase::After),
            SeatAction::EndTurn => self.end_seat_turn(seat),
            SeatAction::ResetCards => {
                self.reset_planet_cards();
                Ok(())
            }
        }
    }

    // ==================== Seat Actions ====================

    fn select_outcome_type(&mut self, outcome_type: OutcomeType) -> Result<(), AgendaError> {
        let seats = self.board.seats();
        let catalog = OutcomeCatalog::new(outcome_type, &seats, self.config.other_outcome_slots);
        if let Some(session) = self.session.as_mut() {
            session.choose_outcomes(catalog);
            info!("Outcome type: {}", outcome_type);
        }
        self.advance_phase()
    }

    fn select_outcome(&mut self, seat: SeatIndex, index: usize) -> Result<(), AgendaError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let Some(len) = session.catalog().map(OutcomeCatalog::len) else {
            debug!("Seat {} picked an outcome before outcomes exist", seat);
            return Ok(());
        };
        if index >= len {
            return Err(DomainError::OutcomeOutOfRange { index, len }.into());
        }
        let available = session.tally().votes(seat);
        self.update_desk(seat, |desk| desk.select_outcome(index, available))
    }

    fn update_desk(
        &mut self,
        seat: SeatIndex,
        change: impl FnOnce(&mut DeskVoteState) -> bool,
    ) -> Result<(), AgendaError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.desks().is_none() {
            return Ok(());
        }
        let desk = session.desk_mut(seat)?;
        if !change(desk) {
            debug!("Seat {} vote is locked", seat);
            return Ok(());
        }
        let updated = desk.clone();
        self.emit(AgendaUiEvent::DeskUpdated(updated));
        Ok(())
    }

    fn edit_outcomes(
        &mut self,
        edit: impl FnOnce(&mut OutcomeCatalog) -> Result<(), DomainError>,
    ) -> Result<(), AgendaError> {
        let Some(catalog) = self.session.as_mut().and_then(AgendaSession::catalog_mut) else {
            return Ok(());
        };
        edit(catalog)?;
        let outcomes = catalog.names().to_vec();
        self.emit(AgendaUiEvent::OutcomesChanged { outcomes });
        Ok(())
    }

    /// "No whens", "no afters" or "lock vote"
    ///
    /// The sticky flag is always recorded. Only when the session is in
    /// `required` does the seat count as passed, and only when it is also
    /// that seat's turn does the turn (or the phase) move on.
    fn pass_for_phase(
        &mut self,
        seat: SeatIndex,
        actor: PlayerSlot,
        required: AgendaPhase,
    ) -> Result<(), AgendaError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if session.desks().is_none() {
            debug!("Seat {} passed before seat panels exist", seat);
            return Ok(());
        }
        let phase = session.phase();
        let desk = session.desk_mut(seat)?;
        desk.mark_pass(required);
        let updated = desk.clone();
        self.emit(AgendaUiEvent::DeskUpdated(updated));

        if phase != required {
            debug!("Seat {} pre-passed {} during {}", seat, required, phase);
            return Ok(());
        }

        let was_turn = self.turns.current_turn() == Some(seat);
        self.turns.set_passed(seat, true);
        if !was_turn {
            debug!("Seat {} passed {} out of turn", seat, phase);
            return Ok(());
        }

        if !self.turns.is_order_exhausted() {
            self.turns.end_turn();
            self.update_waiting_message();
            return Ok(());
        }

        info!("Every seat passed {} (last: {})", phase, actor);
        self.advance_phase()
    }

    fn play_reaction(&mut self, seat: SeatIndex, phase: AgendaPhase) -> Result<(), AgendaError> {
        if self.session.is_none() {
            return Ok(());
        }
        let reaction = if phase == AgendaPhase::When {
            "a \"when\""
        } else {
            "an \"after\""
        };
        self.broadcast(format!("{} is playing {}", self.seat_name(seat), reaction));

        if self.current_phase() == Some(phase) && self.turns.current_turn() == Some(seat) {
            return self.end_turn_and_advance();
        }
        Ok(())
    }

    fn end_seat_turn(&mut self, seat: SeatIndex) -> Result<(), AgendaError> {
        let in_turn_phase = self.current_phase().is_some_and(|p| p.has_seat_turns());
        if in_turn_phase && self.turns.current_turn() == Some(seat) {
            return self.end_turn_and_advance();
        }
        debug!("Seat {} ended a turn it did not have", seat);
        Ok(())
    }

    fn end_turn_and_advance(&mut self) -> Result<(), AgendaError> {
        self.turns.end_turn();
        if self.turns.is_order_exhausted() {
            return self.advance_phase();
        }
        self.update_waiting_message();
        Ok(())
    }

    fn reset_planet_cards(&mut self) {
        let cards = self.board.snapshot().planet_cards_to_reset();
        let count = self.board.flip_face_up(&cards);
        info!("Turned {} planet cards face up", count);
        self.emit(AgendaUiEvent::CardsReset { count });
    }

    // ==================== Phase Entry ====================

    fn advance_phase(&mut self) -> Result<(), AgendaError> {
        if let Some(session) = self.session.as_mut() {
            let phase = session.next_phase();
            info!("Agenda phase: {}", phase);
        }
        self.reset_for_current_state()
    }

    /// Bring panels and turn order in line with the current phase
    ///
    /// Phases in which no seat can act complete themselves; entering the same
    /// phase twice while handling one event is reported as a loop.
    fn reset_for_current_state(&mut self) -> Result<(), AgendaError> {
        let mut guard = AutoAdvanceGuard::default();
        loop {
            self.maybe_create_desks();

            let Some(phase) = self.current_phase() else {
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::PlaceAgendaToStart));
                break;
            };
            guard.enter(phase)?;

            self.emit(AgendaUiEvent::PhaseEntered { phase });
            if !self.enter_phase(phase) {
                break;
            }

            debug!("No seat can act during {}, advancing", phase);
            if let Some(session) = self.session.as_mut() {
                session.next_phase();
            }
        }

        self.update_waiting_message();
        self.maybe_destroy_desks();
        Ok(())
    }

    /// Set up `phase`; returns `true` when it completes immediately
    fn enter_phase(&mut self, phase: AgendaPhase) -> bool {
        match phase {
            AgendaPhase::Start => {
                if let Some(agenda) = self.session.as_ref().map(|s| s.agenda().clone()) {
                    self.emit(AgendaUiEvent::MainPanel(MainPrompt::UseHelper { agenda }));
                }
                false
            }
            AgendaPhase::OutcomeType => {
                let choices = vec![OutcomeType::ForAgainst, OutcomeType::Player, OutcomeType::Other];
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::ChooseOutcomeType { choices }));
                false
            }
            AgendaPhase::When => {
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::Whens));
                !self.seed_turns(phase)
            }
            AgendaPhase::After => {
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::Afters));
                !self.seed_turns(phase)
            }
            AgendaPhase::Vote => {
                if self.config.tally_freeze == TallyFreeze::VoteStart {
                    self.recompute_tally();
                }
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::Voting));
                !self.seed_turns(phase)
            }
            AgendaPhase::Post => {
                self.emit(AgendaUiEvent::MainPanel(MainPrompt::Post));
                let order = self.turn_order.resolve_order(&self.board.seats());
                let first = order.first().copied();
                self.turns.set_order(order);
                if let Some(first) = first {
                    self.turns.set_current_turn(first);
                }
                true
            }
            AgendaPhase::Finish => {
                self.finish();
                false
            }
        }
    }

    /// Install the phase's turn order and apply early passes
    ///
    /// Returns `false` when every seat has already passed.
    fn seed_turns(&mut self, phase: AgendaPhase) -> bool {
        let seats = self.board.seats();
        let order = if phase == AgendaPhase::Vote {
            self.turn_order.vote_order(&seats)
        } else {
            self.turn_order.resolve_order(&seats)
        };
        self.turns.set_order(order);
        self.turns.clear_all_passed();

        let Some(desks) = self.session.as_ref().and_then(AgendaSession::desks) else {
            return false;
        };
        for desk in desks.iter().filter(|d| d.has_passed(phase)) {
            debug!("Seat {} already passed {}", desk.seat, phase);
            self.turns.set_passed(desk.seat, true);
        }

        match self.turns.first_unpassed() {
            Some(first) => {
                self.turns.set_current_turn(first);
                true
            }
            None => false,
        }
    }

    fn recompute_tally(&mut self) {
        let tally = VoteTallyCalculator::compute(&self.board.seats(), &self.board.snapshot());
        debug!("Vote tally at vote start: {} total", tally.total());
        if let Some(session) = self.session.as_mut() {
            session.set_tally(tally);
        }
    }

    /// Tally the votes, announce them and end the session
    fn finish(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let Some(catalog) = session.catalog() else {
            warn!("Agenda {} finished without outcomes", session.agenda().id);
            return;
        };

        let summary = OutcomeSummary::from_desks(catalog, session.desks().unwrap_or_default());
        let resolution = AgendaResolution {
            agenda: session.agenda().clone(),
            outcome_type: catalog.outcome_type(),
            summary,
            resolved_at: Utc::now(),
        };
        let message = resolution.message();
        info!("Agenda {} resolved: {}", resolution.agenda.id, resolution.summary);

        self.emit(AgendaUiEvent::Resolved(resolution.clone()));
        self.emit(AgendaUiEvent::MainPanel(MainPrompt::Outcome {
            summary: message.clone(),
        }));
        self.broadcast(message);
        self.last_resolution = Some(resolution);
    }

    // ==================== Seat Panels ====================

    fn maybe_create_desks(&mut self) {
        let needed = self
            .session
            .as_ref()
            .is_some_and(|s| s.catalog().is_some() && s.desks().is_none());
        if !needed {
            return;
        }
        let seats = self.board.seats();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ensure_desks(&seats);
        let (outcomes, editable) = session
            .catalog()
            .map(|c| (c.names().to_vec(), c.is_editable()))
            .unwrap_or_default();

        self.desks_attached = true;
        self.emit(AgendaUiEvent::DesksAttached {
            seats: seats.iter().map(|s| s.index).collect(),
            outcomes,
            editable,
        });
    }

    fn maybe_destroy_desks(&mut self) {
        let in_use = self
            .session
            .as_ref()
            .is_some_and(|s| s.catalog().is_some());
        if !in_use && self.desks_attached {
            self.desks_attached = false;
            self.emit(AgendaUiEvent::DesksDetached);
        }
    }

    fn update_waiting_message(&self) {
        let (Some(phase), Some(seat), Some(message)) = (
            self.current_phase(),
            self.waiting_seat(),
            self.waiting_message(),
        ) else {
            return;
        };
        self.emit(AgendaUiEvent::Waiting {
            phase,
            seat,
            message,
        });
    }

    // ==================== Helpers ====================

    fn seat_name(&self, seat: SeatIndex) -> String {
        find_seat(&self.board.seats(), seat).map_or_else(|| seat.to_string(), |s| s.display_name())
    }

    fn broadcast(&self, text: String) {
        info!("Broadcast: {}", text);
        self.emit(AgendaUiEvent::Broadcast { text });
    }

    fn emit(&self, event: AgendaUiEvent) {
        let _ = self.tx.send(event);
    }
}
