//! Console output formatter for agenda events

use crate::output::formatter::OutputFormatter;
use agenda_application::{AgendaResolution, AgendaUiEvent, MainPrompt};
use agenda_domain::{DeskVoteState, Seat, SeatIndex};
use colored::Colorize;
use std::collections::BTreeMap;

/// Formats agenda events as colored console lines
///
/// Remembers seat names and the current outcome names so seat panel
/// updates can be shown as "Red: For (3 votes)".
pub struct ConsoleFormatter {
    seat_names: BTreeMap<SeatIndex, String>,
    outcomes: Vec<String>,
}

impl ConsoleFormatter {
    /// Turn colored output on or off for the whole process
    pub fn set_color_enabled(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    pub fn new(seats: &[Seat]) -> Self {
        Self {
            seat_names: seats
                .iter()
                .map(|s| (s.index, s.display_name()))
                .collect(),
            outcomes: Vec::new(),
        }
    }

    fn seat_name(&self, seat: SeatIndex) -> String {
        self.seat_names
            .get(&seat)
            .cloned()
            .unwrap_or_else(|| seat.to_string())
    }

    fn format_prompt(prompt: &MainPrompt) -> String {
        let text = match prompt {
            MainPrompt::PlaceAgendaToStart => {
                "Place an agenda card to start (or reset planet cards)".to_string()
            }
            MainPrompt::UseHelper { agenda } => {
                format!("Agenda revealed: {}. Use the vote helper?", agenda.name)
            }
            MainPrompt::ChooseOutcomeType { choices } => format!(
                "Choose outcome type: {}",
                choices
                    .iter()
                    .map(|c| c.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            MainPrompt::Whens => "Play \"when\" cards or pass".to_string(),
            MainPrompt::Afters => "Play \"after\" cards or pass".to_string(),
            MainPrompt::Voting => "Cast votes".to_string(),
            MainPrompt::Post => "Resolve post-vote effects".to_string(),
            MainPrompt::Outcome { summary } => return summary.green().bold().to_string(),
        };
        format!("{} {}", "[table]".cyan(), text)
    }

    fn format_desk(&self, desk: &DeskVoteState) -> String {
        let choice = match desk.selected_outcome {
            Some(index) => format!(
                "{} ({} votes)",
                self.outcomes
                    .get(index)
                    .map_or("?", String::as_str),
                desk.committed_votes
            ),
            None => "no outcome".to_string(),
        };

        let flags: Vec<&str> = [
            (desk.no_whens, "no whens"),
            (desk.no_afters, "no afters"),
            (desk.vote_locked, "locked"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect();

        if flags.is_empty() {
            format!("  {}: {}", self.seat_name(desk.seat).bold(), choice)
        } else {
            format!(
                "  {}: {} {}",
                self.seat_name(desk.seat).bold(),
                choice,
                format!("[{}]", flags.join(", ")).dimmed()
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        "=".repeat(60).cyan().to_string()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_event(&mut self, event: &AgendaUiEvent) -> Option<String> {
        let line = match event {
            AgendaUiEvent::MainPanel(prompt) => Self::format_prompt(prompt),
            AgendaUiEvent::PhaseEntered { phase } => {
                format!("── {} ──", phase.display_name()).yellow().bold().to_string()
            }
            AgendaUiEvent::Waiting { message, .. } => format!("  {}", message.dimmed()),
            AgendaUiEvent::DesksAttached {
                seats,
                outcomes,
                editable,
            } => {
                self.outcomes = outcomes.clone();
                let names: Vec<String> = seats.iter().map(|s| self.seat_name(*s)).collect();
                format!(
                    "{} {} | outcomes: {}{}",
                    "Seat panels:".cyan().bold(),
                    names.join(", "),
                    outcomes.join(", "),
                    if *editable { " (editable)" } else { "" }
                )
            }
            AgendaUiEvent::DeskUpdated(desk) => self.format_desk(desk),
            AgendaUiEvent::OutcomesChanged { outcomes } => {
                self.outcomes = outcomes.clone();
                format!("{} {}", "Outcomes:".cyan().bold(), outcomes.join(", "))
            }
            AgendaUiEvent::DesksDetached => "Seat panels removed".dimmed().to_string(),
            AgendaUiEvent::Broadcast { text } => format!("{} {}", "[chat]".yellow(), text),
            AgendaUiEvent::Resolved(resolution) => self.format_resolution(resolution),
            AgendaUiEvent::CardsReset { count } => {
                format!("Turned {} planet cards face up", count)
            }
        };
        Some(line)
    }

    fn format_resolution(&self, resolution: &AgendaResolution) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Agenda: {}", resolution.agenda.name)));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Outcome type:".cyan().bold(),
            resolution.outcome_type
        ));

        for total in &resolution.summary.totals {
            let voters: Vec<String> = total.voters.iter().map(|s| self.seat_name(*s)).collect();
            output.push_str(&format!(
                "  {:<20} {:>4}  {}\n",
                total.name,
                total.votes,
                voters.join(", ").dimmed()
            ));
        }

        output.push_str(&format!(
            "{} {}\n",
            "Total votes:".cyan().bold(),
            resolution.summary.total_votes()
        ));
        output.push_str(&Self::footer());
        output
    }
}
