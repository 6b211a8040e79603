//! Agenda vote domain
//!
//! Pure building blocks of the agenda procedure. Orchestration (who acts
//! when, and what happens on each event) lives in the application layer.
//!
//! ```text
//! START ─▶ OUTCOME_TYPE ─▶ WHEN ─▶ AFTER ─▶ VOTE ─▶ (POST) ─▶ FINISH ─┐
//!   ▲                                                                 │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod desk;
pub mod event;
pub mod outcome;
pub mod phase;
pub mod session;
pub mod summary;
pub mod tally;

pub use desk::DeskVoteState;
pub use event::{AgendaEvent, SeatAction};
pub use outcome::{OutcomeCatalog, OutcomeType};
pub use phase::{AgendaPhase, AgendaStateMachine};
pub use session::AgendaSession;
pub use summary::{OutcomeSummary, OutcomeTotal};
pub use tally::{TallyBonuses, VoteTally, VoteTallyCalculator};
