//! Outcome catalog
//!
//! Maps the outcome-type choice made at the start of a vote to the ordered
//! list of outcomes seats can vote for.

use crate::core::error::DomainError;
use crate::seat::Seat;
use serde::{Deserialize, Serialize};

/// Category of outcomes an agenda offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    /// Exactly "For" and "Against"
    ForAgainst,
    /// One outcome per seated player
    Player,
    /// Free-form, editable outcomes
    Other,
}

impl OutcomeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::ForAgainst => "for_against",
            OutcomeType::Player => "player",
            OutcomeType::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OutcomeType::ForAgainst => "For/Against",
            OutcomeType::Player => "Player",
            OutcomeType::Other => "Other",
        }
    }
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for OutcomeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '/'], "_").as_str() {
            "for_against" => Ok(OutcomeType::ForAgainst),
            "player" | "elect_player" => Ok(OutcomeType::Player),
            "other" => Ok(OutcomeType::Other),
            _ => Err(format!("unknown outcome type: {s}")),
        }
    }
}

/// Ordered outcome names for one agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCatalog {
    outcome_type: OutcomeType,
    names: Vec<String>,
}

impl OutcomeCatalog {
    /// Default names for an outcome type
    ///
    /// `other_slots` placeholder names seed an `Other` catalog; the other
    /// types ignore it.
    pub fn new(outcome_type: OutcomeType, seats: &[Seat], other_slots: usize) -> Self {
        let names = match outcome_type {
            OutcomeType::ForAgainst => vec!["For".to_string(), "Against".to_string()],
            OutcomeType::Player => seats.iter().map(Seat::display_name).collect(),
            OutcomeType::Other => (1..=other_slots).map(|i| format!("Outcome {i}")).collect(),
        };
        Self {
            outcome_type,
            names,
        }
    }

    pub fn outcome_type(&self) -> OutcomeType {
        self.outcome_type
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn is_editable(&self) -> bool {
        self.outcome_type == OutcomeType::Other
    }

    /// Rename an outcome of an editable catalog
    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> Result<(), DomainError> {
        self.ensure_editable()?;
        let len = self.names.len();
        let slot = self
            .names
            .get_mut(index)
            .ok_or(DomainError::OutcomeOutOfRange { index, len })?;
        *slot = name.into();
        Ok(())
    }

    /// Append an outcome to an editable catalog, returning its index
    pub fn push(&mut self, name: impl Into<String>) -> Result<usize, DomainError> {
        self.ensure_editable()?;
        self.names.push(name.into());
        Ok(self.names.len() - 1)
    }

    fn ensure_editable(&self) -> Result<(), DomainError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(DomainError::CatalogNotEditable(
                self.outcome_type.display_name().to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats() -> Vec<Seat> {
        vec![
            Seat::new(0, 10, "red"),
            Seat::new(1, 11, "blue"),
            Seat::new(2, 12, "green"),
        ]
    }

    #[test]
    fn test_for_against() {
        let catalog = OutcomeCatalog::new(OutcomeType::ForAgainst, &seats(), 4);
        assert_eq!(catalog.names(), ["For", "Against"]);
        assert!(!catalog.is_editable());
    }

    #[test]
    fn test_player_outcomes_follow_roster() {
        let catalog = OutcomeCatalog::new(OutcomeType::Player, &seats(), 4);
        assert_eq!(catalog.names(), ["Red", "Blue", "Green"]);
    }

    #[test]
    fn test_other_is_editable() {
        let mut catalog = OutcomeCatalog::new(OutcomeType::Other, &seats(), 2);
        assert_eq!(catalog.names(), ["Outcome 1", "Outcome 2"]);

        catalog.rename(1, "Mecatol Rex").unwrap();
        assert_eq!(catalog.push("Lodor").unwrap(), 2);
        assert_eq!(catalog.names(), ["Outcome 1", "Mecatol Rex", "Lodor"]);

        assert_eq!(
            catalog.rename(9, "x"),
            Err(DomainError::OutcomeOutOfRange { index: 9, len: 3 })
        );
    }

    #[test]
    fn test_fixed_catalogs_reject_edits() {
        let mut catalog = OutcomeCatalog::new(OutcomeType::ForAgainst, &seats(), 2);
        assert!(matches!(
            catalog.rename(0, "Yes"),
            Err(DomainError::CatalogNotEditable(_))
        ));
        assert!(catalog.push("Abstain").is_err());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_outcome_type_from_str() {
        assert_eq!("for_against".parse(), Ok(OutcomeType::ForAgainst));
        assert_eq!("For/Against".parse(), Ok(OutcomeType::ForAgainst));
        assert_eq!("player".parse(), Ok(OutcomeType::Player));
        assert_eq!("OTHER".parse(), Ok(OutcomeType::Other));
        assert!("nope".parse::<OutcomeType>().is_err());
    }
}
