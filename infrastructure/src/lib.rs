//! Infrastructure layer for agenda-vote
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading
//! and the JSON-backed table used for scenario replay.

pub mod config;
pub mod table;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgendaConfig, FileConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use table::{JsonTableState, Scenario, SpeakerTurnOrder, TableStateError};
