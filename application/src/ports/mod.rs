//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement,
//! and the events the application emits toward presentation.

pub mod board;
pub mod turn_order;
pub mod ui_event;
