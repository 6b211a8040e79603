//! Outcome summary
//!
//! Aggregates committed votes per outcome once voting is over. Ties and
//! zero-vote outcomes are reported as they are; picking a winner is left to
//! the players.

use crate::agenda::desk::DeskVoteState;
use crate::agenda::outcome::OutcomeCatalog;
use crate::seat::SeatIndex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Votes gathered by one outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTotal {
    pub name: String,
    pub votes: u32,
    /// Seats that chose this outcome, in seat order
    pub voters: Vec<SeatIndex>,
}

/// Result of an agenda vote
///
/// # Example
///
/// ```
/// use agenda_domain::agenda::{DeskVoteState, OutcomeCatalog, OutcomeSummary, OutcomeType};
/// use agenda_domain::seat::SeatIndex;
///
/// let catalog = OutcomeCatalog::new(OutcomeType::ForAgainst, &[], 0);
/// let mut a = DeskVoteState::new(SeatIndex(0));
/// a.select_outcome(0, 3);
/// let mut b = DeskVoteState::new(SeatIndex(1));
/// b.select_outcome(1, 5);
///
/// let summary = OutcomeSummary::from_desks(&catalog, &[a, b]);
/// assert_eq!(summary.to_string(), "For: 3, Against: 5");
/// assert_eq!(summary.totals_json(), r#"{"For":3,"Against":5}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub totals: Vec<OutcomeTotal>,
}

impl OutcomeSummary {
    /// Sum committed votes per outcome, in catalog order
    ///
    /// Desks without a selection, or pointing outside the catalog, are left
    /// out.
    pub fn from_desks(catalog: &OutcomeCatalog, desks: &[DeskVoteState]) -> Self {
        let mut totals: Vec<OutcomeTotal> = catalog
            .names()
            .iter()
            .map(|name| OutcomeTotal {
                name: name.clone(),
                votes: 0,
                voters: Vec::new(),
            })
            .collect();

        let mut desks: Vec<&DeskVoteState> = desks.iter().collect();
        desks.sort_by_key(|d| d.seat);
        for desk in desks {
            let Some(total) = desk.selected_outcome.and_then(|i| totals.get_mut(i)) else {
                continue;
            };
            total.votes = total.votes.saturating_add(desk.committed_votes);
            total.voters.push(desk.seat);
        }

        Self { totals }
    }

    pub fn total_votes(&self) -> u32 {
        self.totals
            .iter()
            .fold(0, |acc, t| acc.saturating_add(t.votes))
    }

    pub fn votes_for(&self, name: &str) -> Option<u32> {
        self.totals.iter().find(|t| t.name == name).map(|t| t.votes)
    }

    /// Outcome name → votes as a JSON object, keeping catalog order
    pub fn totals_json(&self) -> String {
        serde_json::to_string(&OrderedTotals(&self.totals)).unwrap_or_else(|_| "{}".to_string())
    }
}

impl std::fmt::Display for OutcomeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.totals.is_empty() {
            return f.write_str("no outcomes");
        }
        let parts: Vec<String> = self
            .totals
            .iter()
            .map(|t| format!("{}: {}", t.name, t.votes))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

struct OrderedTotals<'a>(&'a [OutcomeTotal]);

impl Serialize for OrderedTotals<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for total in self.0 {
            map.serialize_entry(&total.name, &total.votes)?;
        }
        map.end()
    }
}
