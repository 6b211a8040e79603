//! Domain error types

use crate::board::CardId;
use crate::seat::SeatIndex;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown seat: {0}")]
    UnknownSeat(SeatIndex),

    #[error("Outcome index {index} out of range ({len} outcomes)")]
    OutcomeOutOfRange { index: usize, len: usize },

    #[error("Outcome list for {0} cannot be edited")]
    CatalogNotEditable(String),

    #[error("Unknown card: {0}")]
    UnknownCard(CardId),
}

impl DomainError {
    /// Check if this error was caused by input naming something that does not exist
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownSeat(_) | DomainError::UnknownCard(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let error = DomainError::OutcomeOutOfRange { index: 4, len: 2 };
        assert_eq!(error.to_string(), "Outcome index 4 out of range (2 outcomes)");
    }

    #[test]
    fn test_is_lookup_failure() {
        assert!(DomainError::UnknownSeat(SeatIndex(3)).is_lookup_failure());
        assert!(DomainError::UnknownCard(CardId::new("x")).is_lookup_failure());
        assert!(!DomainError::CatalogNotEditable("For/Against".into()).is_lookup_failure());
    }
}
