//! Prints the agenda UI event stream

use crate::output::formatter::OutputFormatter;
use agenda_application::AgendaUiEvent;
use tokio::sync::mpsc;

/// Writes formatted UI events to stdout until the controller goes away
pub struct EventPrinter {
    formatter: Box<dyn OutputFormatter>,
    quiet: bool,
}

impl EventPrinter {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self {
            formatter,
            quiet: false,
        }
    }

    /// Only print finished agendas
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Text for one event, `None` when it is not shown
    pub fn render(&mut self, event: &AgendaUiEvent) -> Option<String> {
        match event {
            AgendaUiEvent::Resolved(resolution) if self.quiet => {
                Some(self.formatter.format_resolution(resolution))
            }
            _ if self.quiet => None,
            _ => self.formatter.format_event(event),
        }
    }

    /// Print events until every sender is dropped
    ///
    /// Returns the number of agendas that were resolved.
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<AgendaUiEvent>) -> usize {
        let mut resolved = 0;
        while let Some(event) = ui_rx.recv().await {
            if matches!(event, AgendaUiEvent::Resolved(_)) {
                resolved += 1;
            }
            if let Some(text) = self.render(&event) {
                println!("{}", text);
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::json::JsonFormatter;
    use agenda_application::AgendaResolution;
    use agenda_domain::{AgendaCard, OutcomeSummary, OutcomeType};
    use chrono::Utc;

    fn resolved() -> AgendaUiEvent {
        AgendaUiEvent::Resolved(AgendaResolution {
            agenda: AgendaCard::new("a1", "Mutiny"),
            outcome_type: OutcomeType::ForAgainst,
            summary: OutcomeSummary { totals: vec![] },
            resolved_at: Utc::now(),
        })
    }

    #[test]
    fn test_quiet_only_shows_resolutions() {
        let mut printer = EventPrinter::new(Box::new(JsonFormatter)).with_quiet(true);
        assert!(printer.render(&AgendaUiEvent::DesksDetached).is_none());
        let text = printer.render(&resolved()).unwrap();
        assert!(text.contains("\"outcome_type\": \"for_against\""));
    }

    #[tokio::test]
    async fn test_run_counts_resolutions() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(AgendaUiEvent::DesksDetached).unwrap();
        tx.send(resolved()).unwrap();
        tx.send(resolved()).unwrap();
        drop(tx);

        let printer = EventPrinter::new(Box::new(JsonFormatter)).with_quiet(true);
        assert_eq!(printer.run(rx).await, 2);
    }
}
