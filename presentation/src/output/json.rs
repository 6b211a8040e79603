//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use agenda_application::{AgendaResolution, AgendaUiEvent};

/// Formats each agenda event as a single-line JSON object
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_event(&mut self, event: &AgendaUiEvent) -> Option<String> {
        serde_json::to_string(event).ok()
    }

    fn format_resolution(&self, resolution: &AgendaResolution) -> String {
        serde_json::to_string_pretty(resolution).unwrap_or_else(|_| "{}".to_string())
    }
}
