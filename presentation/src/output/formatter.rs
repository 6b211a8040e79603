//! Output formatter trait

use agenda_application::{AgendaResolution, AgendaUiEvent};

/// Trait for rendering agenda UI events
pub trait OutputFormatter: Send {
    /// Render one event, `None` when there is nothing to show
    fn format_event(&mut self, event: &AgendaUiEvent) -> Option<String>;

    /// Render a finished agenda on its own (quiet mode)
    fn format_resolution(&self, resolution: &AgendaResolution) -> String;
}
