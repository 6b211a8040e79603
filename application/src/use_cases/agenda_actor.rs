//! Agenda actor
//!
//! Runs an [`AgendaController`] on its own task so hosts can push events from
//! anywhere without sharing the controller. Events are handled strictly one
//! at a time, in the order they were sent.
//!
//! ```text
//! host ── AgendaHandle::send ──> event_rx ──> controller.handle()
//!                                                 └── ui_tx ──> renderer
//! ```

use super::agenda_controller::{AgendaController, AgendaError};
use agenda_domain::AgendaEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Spawns the controller task
pub struct AgendaActor;

impl AgendaActor {
    /// Start handling events on a background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(controller: AgendaController, cancellation: CancellationToken) -> AgendaHandle {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AgendaEvent>();
        let task = tokio::spawn(actor_task(controller, event_rx, cancellation.clone()));
        AgendaHandle {
            event_tx,
            cancellation,
            task,
        }
    }
}

/// Sending side of a running [`AgendaActor`]
pub struct AgendaHandle {
    event_tx: mpsc::UnboundedSender<AgendaEvent>,
    cancellation: CancellationToken,
    task: JoinHandle<AgendaController>,
}

impl AgendaHandle {
    pub fn send(&self, event: AgendaEvent) -> Result<(), AgendaError> {
        self.event_tx
            .send(event)
            .map_err(|_| AgendaError::ActorStopped)
    }

    /// Extra sender for hosts that produce events from several places
    pub fn sender(&self) -> mpsc::UnboundedSender<AgendaEvent> {
        self.event_tx.clone()
    }

    /// Stop once the events already queued are handled; later sends fail
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Handle every queued event, then stop and hand back the controller
    ///
    /// Senders obtained through [`sender`](Self::sender) must be dropped
    /// first or this waits for them.
    pub async fn shutdown(self) -> Result<AgendaController, AgendaError> {
        drop(self.event_tx);
        self.task.await.map_err(|e| {
            error!("Agenda actor task failed: {}", e);
            AgendaError::ActorStopped
        })
    }
}

async fn actor_task(
    mut controller: AgendaController,
    mut event_rx: mpsc::UnboundedReceiver<AgendaEvent>,
    cancellation: CancellationToken,
) -> AgendaController {
    if let Err(e) = controller.refresh() {
        warn!("Initial refresh failed: {}", e);
    }

    loop {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => {
                event_rx.close();
                let mut drained = 0;
                while let Ok(event) = event_rx.try_recv() {
                    handle_event(&mut controller, event);
                    drained += 1;
                }
                debug!("Agenda actor cancelled, drained {} queued events", drained);
                break;
            }
            event = event_rx.recv() => {
                let Some(event) = event else {
                    debug!("Agenda event channel closed");
                    break;
                };
                handle_event(&mut controller, event);
            }
        }
    }

    controller
}

fn handle_event(controller: &mut AgendaController, event: AgendaEvent) {
    if let Err(e) = controller.handle(event) {
        match e {
            AgendaError::AutoAdvanceLoop(_) => error!("Agenda event failed: {}", e),
            _ => warn!("Agenda event rejected: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AgendaConfig;
    use crate::ports::board::BoardPort;
    use crate::ports::turn_order::IndexTurnOrder;
    use crate::ports::ui_event::{AgendaUiEvent, MainPrompt};
    use agenda_domain::{
        AgendaCard, AgendaPhase, BoardSnapshot, CardId, OutcomeType, PlayerSlot, Seat,
        SeatAction, SeatIndex,
    };
    use std::sync::Arc;

    struct EmptyBoard(Vec<Seat>);

    impl BoardPort for EmptyBoard {
        fn seats(&self) -> Vec<Seat> {
            self.0.clone()
        }

        fn snapshot(&self) -> BoardSnapshot {
            BoardSnapshot::default()
        }

        fn flip_face_up(&self, _cards: &[CardId]) -> usize {
            0
        }
    }

    fn spawn_actor() -> (AgendaHandle, mpsc::UnboundedReceiver<AgendaUiEvent>) {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let board = Arc::new(EmptyBoard(vec![
            Seat::new(0, 1, "red"),
            Seat::new(1, 2, "blue"),
        ]));
        let controller = AgendaController::new(
            board,
            Arc::new(IndexTurnOrder),
            AgendaConfig::default(),
            ui_tx,
        );
        (
            AgendaActor::spawn(controller, CancellationToken::new()),
            ui_rx,
        )
    }

    fn action(seat: usize, action: SeatAction) -> AgendaEvent {
        AgendaEvent::SeatAction {
            seat: SeatIndex(seat),
            actor: PlayerSlot(seat as u32 + 1),
            action,
        }
    }

    #[tokio::test]
    async fn test_actor_handles_events_in_order() {
        let (handle, mut ui_rx) = spawn_actor();

        handle
            .send(AgendaEvent::AgendaRevealed {
                card: Some(AgendaCard::new("a1", "Minister of Policy")),
            })
            .unwrap();
        handle.send(action(0, SeatAction::Begin)).unwrap();
        handle
            .send(action(
                0,
                SeatAction::SelectOutcomeType {
                    outcome_type: OutcomeType::Player,
                },
            ))
            .unwrap();
        handle.send(action(0, SeatAction::NoWhens)).unwrap();

        let controller = handle.shutdown().await.unwrap();
        assert_eq!(controller.current_phase(), Some(AgendaPhase::When));
        assert_eq!(controller.turns().current_turn(), Some(SeatIndex(1)));

        assert_eq!(
            ui_rx.recv().await,
            Some(AgendaUiEvent::MainPanel(MainPrompt::PlaceAgendaToStart))
        );
    }

    #[tokio::test]
    async fn test_rejected_event_does_not_stop_actor() {
        let (handle, _ui_rx) = spawn_actor();

        handle
            .send(AgendaEvent::AgendaRevealed {
                card: Some(AgendaCard::new("a1", "Mutiny")),
            })
            .unwrap();
        handle.send(action(0, SeatAction::Begin)).unwrap();
        handle
            .send(action(
                0,
                SeatAction::SelectOutcomeType {
                    outcome_type: OutcomeType::ForAgainst,
                },
            ))
            .unwrap();
        handle
            .send(action(0, SeatAction::SelectOutcome { index: 9 }))
            .unwrap();
        handle
            .send(action(0, SeatAction::SelectOutcome { index: 1 }))
            .unwrap();

        let controller = handle.shutdown().await.unwrap();
        assert_eq!(
            controller.desk(SeatIndex(0)).unwrap().selected_outcome,
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_cancel_drains_queued_events() {
        let (handle, _ui_rx) = spawn_actor();
        handle
            .send(AgendaEvent::AgendaRevealed {
                card: Some(AgendaCard::new("a1", "Mutiny")),
            })
            .unwrap();
        handle.cancel();

        let controller = handle.shutdown().await.unwrap();
        assert_eq!(controller.current_phase(), Some(AgendaPhase::Start));
    }

    #[tokio::test]
    async fn test_send_after_cancel_fails() {
        let (handle, _ui_rx) = spawn_actor();
        let sender = handle.sender();
        handle.cancel();

        let controller = handle.shutdown().await.unwrap();
        assert!(!controller.is_active());

        drop(controller);
        assert!(sender.send(AgendaEvent::TurnChanged).is_err());
    }

    #[tokio::test]
    async fn test_oversized_votes_do_not_stop_actor() {
        let (handle, _ui_rx) = spawn_actor();
        handle
            .send(AgendaEvent::AgendaRevealed {
                card: Some(AgendaCard::new("a1", "Mutiny")),
            })
            .unwrap();
        handle.send(action(0, SeatAction::Begin)).unwrap();
        handle
            .send(action(
                0,
                SeatAction::SelectOutcomeType {
                    outcome_type: OutcomeType::ForAgainst,
                },
            ))
            .unwrap();
        for seat in [0, 1] {
            handle
                .send(action(seat, SeatAction::SelectOutcome { index: 0 }))
                .unwrap();
            handle
                .send(action(seat, SeatAction::SetVotes { votes: u32::MAX }))
                .unwrap();
        }
        for step in [SeatAction::NoWhens, SeatAction::NoAfters, SeatAction::LockVote] {
            for seat in [0, 1] {
                handle.send(action(seat, step.clone())).unwrap();
            }
        }

        let controller = handle.shutdown().await.unwrap();
        assert!(!controller.is_active());
        let resolution = controller.last_resolution().unwrap();
        assert_eq!(resolution.summary.votes_for("For"), Some(u32::MAX));
        assert_eq!(resolution.summary.votes_for("Against"), Some(0));
    }
}
