//! Application-level configuration.
//!
//! - [`AgendaConfig`] — optional parts of the agenda procedure
//! - [`TallyFreeze`] — when the vote tally is read from the board

pub mod agenda_config;

pub use agenda_config::{AgendaConfig, TallyFreeze};
