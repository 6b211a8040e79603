//! Agenda phase graph
//!
//! The phase table is a closed enum matched exhaustively: adding a phase
//! without wiring its panels and successor does not compile.

use serde::{Deserialize, Serialize};

/// One step of the agenda protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaPhase {
    /// Ask whether to run the vote helper at all
    Start,
    /// Choose what kind of outcomes the agenda has
    OutcomeType,
    /// "When" reaction window
    When,
    /// "After" reaction window
    After,
    /// Weighted voting
    Vote,
    /// Fix the acting seat before the tally (optional)
    Post,
    /// Tally and broadcast
    Finish,
}

impl AgendaPhase {
    /// Identifier of the central panel shown during this phase
    pub fn main(&self) -> &'static str {
        match self {
            AgendaPhase::Start => "START.MAIN",
            AgendaPhase::OutcomeType => "OUTCOME_TYPE.MAIN",
            AgendaPhase::When => "WHEN.MAIN",
            AgendaPhase::After => "AFTER.MAIN",
            AgendaPhase::Vote => "VOTE.MAIN",
            AgendaPhase::Post => "POST.MAIN",
            AgendaPhase::Finish => "FINISH.MAIN",
        }
    }

    /// Identifier of the per-seat panel, `None` when seats show nothing
    pub fn desk(&self) -> Option<&'static str> {
        match self {
            AgendaPhase::When | AgendaPhase::After => Some("WHEN-AFTER.DESK"),
            AgendaPhase::Vote => Some("VOTE.DESK"),
            AgendaPhase::Start
            | AgendaPhase::OutcomeType
            | AgendaPhase::Post
            | AgendaPhase::Finish => None,
        }
    }

    /// Whether seats take turns during this phase
    pub fn has_seat_turns(&self) -> bool {
        matches!(
            self,
            AgendaPhase::When | AgendaPhase::After | AgendaPhase::Vote
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgendaPhase::Start => "Start",
            AgendaPhase::OutcomeType => "Outcome Type",
            AgendaPhase::When => "Whens",
            AgendaPhase::After => "Afters",
            AgendaPhase::Vote => "Voting",
            AgendaPhase::Post => "Post Vote",
            AgendaPhase::Finish => "Finish",
        }
    }
}

impl std::fmt::Display for AgendaPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Current position in the agenda phase cycle
///
/// The machine is cyclic: [`next`](Self::next) from `Finish` returns to
/// `Start`. It carries no seat data; whoever owns it decides whether a new
/// cycle begins.
///
/// # Example
///
/// ```
/// use agenda_domain::agenda::{AgendaPhase, AgendaStateMachine};
///
/// let mut machine = AgendaStateMachine::new();
/// assert_eq!(machine.main(), "START.MAIN");
/// assert!(machine.desk().is_none());
///
/// machine.next().next();
/// assert_eq!(machine.phase(), AgendaPhase::When);
/// assert_eq!(machine.desk(), Some("WHEN-AFTER.DESK"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaStateMachine {
    phase: AgendaPhase,
    post_phase: bool,
}

impl Default for AgendaStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AgendaStateMachine {
    /// Machine over the six-phase cycle (no `Post`)
    pub fn new() -> Self {
        Self {
            phase: AgendaPhase::Start,
            post_phase: false,
        }
    }

    /// Route `Vote` through `Post` before `Finish`
    pub fn with_post_phase(mut self, enabled: bool) -> Self {
        self.post_phase = enabled;
        self
    }

    pub fn phase(&self) -> AgendaPhase {
        self.phase
    }

    pub fn main(&self) -> &'static str {
        self.phase.main()
    }

    pub fn desk(&self) -> Option<&'static str> {
        self.phase.desk()
    }

    /// Successor of `phase` in this machine's table
    pub fn successor(&self, phase: AgendaPhase) -> AgendaPhase {
        match phase {
            AgendaPhase::Start => AgendaPhase::OutcomeType,
            AgendaPhase::OutcomeType => AgendaPhase::When,
            AgendaPhase::When => AgendaPhase::After,
            AgendaPhase::After => AgendaPhase::Vote,
            AgendaPhase::Vote if self.post_phase => AgendaPhase::Post,
            AgendaPhase::Vote => AgendaPhase::Finish,
            AgendaPhase::Post => AgendaPhase::Finish,
            AgendaPhase::Finish => AgendaPhase::Start,
        }
    }

    /// Advance to the successor phase
    ///
    /// Returns `self` for chaining.
    pub fn next(&mut self) -> &mut Self {
        self.phase = self.successor(self.phase);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_closes_after_six_steps() {
        let mut machine = AgendaStateMachine::new();
        let mut seen = vec![machine.phase()];
        for _ in 0..6 {
            machine.next();
            seen.push(machine.phase());
        }
        assert_eq!(machine.phase(), AgendaPhase::Start);
        assert_eq!(
            seen,
            vec![
                AgendaPhase::Start,
                AgendaPhase::OutcomeType,
                AgendaPhase::When,
                AgendaPhase::After,
                AgendaPhase::Vote,
                AgendaPhase::Finish,
                AgendaPhase::Start,
            ]
        );
    }

    #[test]
    fn test_post_phase_inserted_between_vote_and_finish() {
        let mut machine = AgendaStateMachine::new().with_post_phase(true);
        for _ in 0..4 {
            machine.next();
        }
        assert_eq!(machine.phase(), AgendaPhase::Vote);
        assert_eq!(machine.next().phase(), AgendaPhase::Post);
        assert_eq!(machine.next().phase(), AgendaPhase::Finish);
        assert_eq!(machine.next().phase(), AgendaPhase::Start);
    }

    #[test]
    fn test_desk_panels() {
        assert_eq!(AgendaPhase::When.desk(), AgendaPhase::After.desk());
        assert_eq!(AgendaPhase::Vote.desk(), Some("VOTE.DESK"));
        assert!(AgendaPhase::Post.desk().is_none());
        assert!(AgendaPhase::Finish.desk().is_none());
    }

    #[test]
    fn test_main_panels_unique() {
        let phases = [
            AgendaPhase::Start,
            AgendaPhase::OutcomeType,
            AgendaPhase::When,
            AgendaPhase::After,
            AgendaPhase::Vote,
            AgendaPhase::Post,
            AgendaPhase::Finish,
        ];
        let mains: std::collections::HashSet<_> = phases.iter().map(|p| p.main()).collect();
        assert_eq!(mains.len(), phases.len());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(AgendaPhase::When.to_string(), "Whens");
        assert_eq!(AgendaPhase::OutcomeType.to_string(), "Outcome Type");
    }
}
