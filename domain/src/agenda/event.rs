//! Inbound agenda events

use crate::agenda::outcome::OutcomeType;
use crate::agenda::phase::AgendaPhase;
use crate::board::{AgendaCard, CardId};
use crate::seat::{PlayerSlot, SeatIndex};
use serde::{Deserialize, Serialize};

/// Something a player did on a seat's panel (or the shared panel)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeatAction {
    /// Accept the vote helper at the start prompt
    Begin,
    /// Decline the vote helper at the start prompt
    Cancel,
    SelectOutcomeType { outcome_type: OutcomeType },
    SelectOutcome { index: usize },
    /// Override the committed vote count
    SetVotes { votes: u32 },
    RenameOutcome { index: usize, name: String },
    AddOutcome { name: String },
    NoWhens,
    PlayWhen,
    NoAfters,
    PlayAfter,
    LockVote,
    EndTurn,
    ResetCards,
}

impl SeatAction {
    /// The phase an early-pass action belongs to
    pub fn pass_phase(&self) -> Option<AgendaPhase> {
        match self {
            SeatAction::NoWhens => Some(AgendaPhase::When),
            SeatAction::NoAfters => Some(AgendaPhase::After),
            SeatAction::LockVote => Some(AgendaPhase::Vote),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatAction::Begin => "begin",
            SeatAction::Cancel => "cancel",
            SeatAction::SelectOutcomeType { .. } => "select_outcome_type",
            SeatAction::SelectOutcome { .. } => "select_outcome",
            SeatAction::SetVotes { .. } => "set_votes",
            SeatAction::RenameOutcome { .. } => "rename_outcome",
            SeatAction::AddOutcome { .. } => "add_outcome",
            SeatAction::NoWhens => "no_whens",
            SeatAction::PlayWhen => "play_when",
            SeatAction::NoAfters => "no_afters",
            SeatAction::PlayAfter => "play_after",
            SeatAction::LockVote => "lock_vote",
            SeatAction::EndTurn => "end_turn",
            SeatAction::ResetCards => "reset_cards",
        }
    }
}

impl std::fmt::Display for SeatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events pushed by the host, processed one at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgendaEvent {
    /// An agenda card was revealed (or removed, with `None`)
    AgendaRevealed { card: Option<AgendaCard> },
    /// The host's turn pointer moved
    TurnChanged,
    /// A card on the table was flipped
    CardFaceChanged { card: CardId, face_up: bool },
    SeatAction {
        seat: SeatIndex,
        actor: PlayerSlot,
        #[serde(flatten)]
        action: SeatAction,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_phase() {
        assert_eq!(SeatAction::NoWhens.pass_phase(), Some(AgendaPhase::When));
        assert_eq!(SeatAction::NoAfters.pass_phase(), Some(AgendaPhase::After));
        assert_eq!(SeatAction::LockVote.pass_phase(), Some(AgendaPhase::Vote));
        assert_eq!(SeatAction::PlayWhen.pass_phase(), None);
    }

    #[test]
    fn test_seat_action_event_from_json() {
        let json = r#"{"event":"seat_action","seat":1,"actor":11,"kind":"select_outcome","index":0}"#;
        let event: AgendaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AgendaEvent::SeatAction {
                seat: SeatIndex(1),
                actor: PlayerSlot(11),
                action: SeatAction::SelectOutcome { index: 0 },
            }
        );
    }

    #[test]
    fn test_outcome_type_action_from_json() {
        let json = r#"{"event":"seat_action","seat":0,"actor":10,"kind":"select_outcome_type","outcome_type":"for_against"}"#;
        let event: AgendaEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(
            event,
            AgendaEvent::SeatAction {
                action: SeatAction::SelectOutcomeType {
                    outcome_type: OutcomeType::ForAgainst
                },
                ..
            }
        ));
    }

    #[test]
    fn test_reveal_event_from_json() {
        let json = r#"{"event":"agenda_revealed","card":{"id":"a1","name":"Mutiny"}}"#;
        let event: AgendaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AgendaEvent::AgendaRevealed {
                card: Some(AgendaCard::new("a1", "Mutiny"))
            }
        );
    }
}
