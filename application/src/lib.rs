//! Application layer for agenda-vote
//!
//! This crate contains the agenda controller, its actor wrapper, port
//! definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgendaConfig, TallyFreeze};
pub use ports::{
    board::BoardPort,
    turn_order::{IndexTurnOrder, TurnOrderPolicy},
    ui_event::{AgendaResolution, AgendaUiEvent, MainPrompt},
};
pub use use_cases::agenda_actor::{AgendaActor, AgendaHandle};
pub use use_cases::agenda_controller::{AgendaController, AgendaError};
