//! Domain layer for agenda-vote
//!
//! This crate contains the core rules of the agenda vote: phases, seats,
//! outcomes, vote tallies and turn order. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Agenda
//!
//! After an agenda card is revealed every seat, in turn order, may react in
//! the **when** and **after** windows and then casts a weighted **vote** for
//! one of the agenda's outcomes.
//!
//! ## Early pass
//!
//! Any seat may pre-commit a pass ("no whens", "no afters", "lock vote") at
//! any time. The flag is sticky and is applied when the phase arrives.

pub mod agenda;
pub mod board;
pub mod config;
pub mod core;
pub mod seat;
pub mod turn;

// Re-export commonly used types
pub use agenda::{
    AgendaEvent, AgendaPhase, AgendaSession, AgendaStateMachine, DeskVoteState, OutcomeCatalog,
    OutcomeSummary, OutcomeTotal, OutcomeType, SeatAction, TallyBonuses, VoteTally,
    VoteTallyCalculator,
};
pub use board::{AgendaCard, BoardCard, BoardSnapshot, CardId, CardKind, PlanetValues};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use seat::{PlayerSlot, Seat, SeatIndex};
pub use turn::TurnCoordinator;
