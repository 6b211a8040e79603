//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod agenda_actor;
pub mod agenda_controller;
