//! Presentation layer for agenda-vote
//!
//! This crate contains the CLI definition and the formatters that turn
//! agenda UI events into console text or JSON.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use output::printer::EventPrinter;
