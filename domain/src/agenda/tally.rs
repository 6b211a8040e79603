//! Vote tally
//!
//! Votes available to a seat come from the influence of the planet cards in
//! front of it, plus two conditional bonuses:
//!
//! - **per-planet bonus**: +1 per planet for the seat holding the unlocked
//!   commander, mirrored to the alliance holder when it is a different seat
//! - **resource conversion**: a seat holding the hero also counts each
//!   planet's resources

use crate::board::{BoardSnapshot, CardKind, PlanetValues};
use crate::seat::{Seat, SeatIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Votes available per seat for one agenda
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally(BTreeMap<SeatIndex, u32>);

impl VoteTally {
    /// Zero votes for every seat in the roster
    pub fn zeroed(seats: &[Seat]) -> Self {
        Self(seats.iter().map(|s| (s.index, 0)).collect())
    }

    /// Available votes for a seat (0 for seats outside the roster)
    pub fn votes(&self, seat: SeatIndex) -> u32 {
        self.0.get(&seat).copied().unwrap_or(0)
    }

    pub fn contains(&self, seat: SeatIndex) -> bool {
        self.0.contains_key(&seat)
    }

    pub fn total(&self) -> u32 {
        self.0.values().fold(0, |acc, v| acc.saturating_add(*v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatIndex, u32)> + '_ {
        self.0.iter().map(|(seat, votes)| (*seat, *votes))
    }

    fn add(&mut self, seat: SeatIndex, votes: u32) {
        if let Some(entry) = self.0.get_mut(&seat) {
            *entry = entry.saturating_add(votes);
        }
    }
}

/// Bonus holders detected on the board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyBonuses {
    pub commander: Option<SeatIndex>,
    pub alliance: Option<SeatIndex>,
    pub heroes: BTreeSet<SeatIndex>,
}

impl TallyBonuses {
    /// Scan loose face-up cards for the bonus markers
    ///
    /// A marker near several seats resolves to the lowest seat index.
    pub fn detect(board: &BoardSnapshot) -> Self {
        let mut bonuses = Self::default();
        for card in board.loose_cards(false) {
            let Some(seat) = card.nearest_seat else {
                continue;
            };
            match card.kind() {
                CardKind::PerPlanetCommander => {
                    bonuses.commander = Some(bonuses.commander.map_or(seat, |s| s.min(seat)));
                }
                CardKind::CommanderAlliance => {
                    bonuses.alliance = Some(bonuses.alliance.map_or(seat, |s| s.min(seat)));
                }
                CardKind::ResourceConversionHero => {
                    bonuses.heroes.insert(seat);
                }
                CardKind::Planet(_) | CardKind::Other => {}
            }
        }
        bonuses
    }

    /// Extra votes per planet for a seat (0 or 1)
    ///
    /// The alliance only shares an unlocked commander, and never stacks with
    /// it on the same seat.
    pub fn per_planet_bonus(&self, seat: SeatIndex) -> u32 {
        match self.commander {
            Some(commander) if commander == seat => 1,
            Some(commander) if self.alliance == Some(seat) && commander != seat => 1,
            _ => 0,
        }
    }

    pub fn converts_resources(&self, seat: SeatIndex) -> bool {
        self.heroes.contains(&seat)
    }

    /// Votes one planet contributes to a seat
    pub fn planet_value(&self, seat: SeatIndex, planet: PlanetValues) -> u32 {
        let mut value = planet.influence.saturating_add(self.per_planet_bonus(seat));
        if self.converts_resources(seat) {
            value = value.saturating_add(planet.resources);
        }
        value
    }
}

/// Computes a [`VoteTally`] from a board snapshot
pub struct VoteTallyCalculator;

impl VoteTallyCalculator {
    /// Votes available per roster seat
    ///
    /// Planet cards with no nearest seat, or whose seat is not in the
    /// roster, are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use agenda_domain::agenda::VoteTallyCalculator;
    /// use agenda_domain::board::{BoardCard, BoardSnapshot};
    /// use agenda_domain::seat::{Seat, SeatIndex};
    ///
    /// let seats = vec![Seat::new(0, 1, "red"), Seat::new(1, 2, "blue")];
    /// let board = BoardSnapshot::new(vec![
    ///     BoardCard::planet("abyz", 3, 0).near(0),
    ///     BoardCard::planet("fria", 2, 0).near(0),
    ///     BoardCard::planet("mecatol_rex", 1, 6).near(1),
    /// ]);
    ///
    /// let tally = VoteTallyCalculator::compute(&seats, &board);
    /// assert_eq!(tally.votes(SeatIndex(0)), 0);
    /// assert_eq!(tally.votes(SeatIndex(1)), 6);
    /// ```
    pub fn compute(seats: &[Seat], board: &BoardSnapshot) -> VoteTally {
        let bonuses = TallyBonuses::detect(board);
        let mut tally = VoteTally::zeroed(seats);

        for card in board.loose_cards(false) {
            let CardKind::Planet(planet) = card.kind() else {
                continue;
            };
            let Some(seat) = card.nearest_seat else {
                continue;
            };
            if !tally.contains(seat) {
                continue;
            }
            tally.add(seat, bonuses.planet_value(seat, planet));
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        BoardCard, COMMANDER_ALLIANCE_NSID, PER_PLANET_COMMANDER_NSID,
        RESOURCE_CONVERSION_HERO_NSID,
    };

    fn seats() -> Vec<Seat> {
        vec![
            Seat::new(0, 10, "red"),
            Seat::new(1, 11, "blue"),
            Seat::new(2, 12, "green"),
        ]
    }

    fn commander(seat: usize) -> BoardCard {
        BoardCard::new("commander", PER_PLANET_COMMANDER_NSID).near(seat)
    }

    fn alliance(seat: usize) -> BoardCard {
        BoardCard::new("alliance", COMMANDER_ALLIANCE_NSID).near(seat)
    }

    fn hero(seat: usize) -> BoardCard {
        BoardCard::new("hero", RESOURCE_CONVERSION_HERO_NSID).near(seat)
    }

    #[test]
    fn test_empty_board_yields_zero_for_every_seat() {
        let tally = VoteTallyCalculator::compute(&seats(), &BoardSnapshot::default());
        assert_eq!(tally.iter().count(), 3);
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.votes(SeatIndex(2)), 0);
    }

    #[test]
    fn test_sums_influence_per_seat() {
        let board = BoardSnapshot::new(vec![
            BoardCard::planet("a", 1, 2).near(0),
            BoardCard::planet("b", 0, 3).near(0),
            BoardCard::planet("c", 4, 1).near(2),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(0)), 5);
        assert_eq!(tally.votes(SeatIndex(1)), 0);
        assert_eq!(tally.votes(SeatIndex(2)), 1);
    }

    #[test]
    fn test_skips_exhausted_contained_and_unowned_cards() {
        let board = BoardSnapshot::new(vec![
            BoardCard::planet("down", 1, 2).near(0).face_down(),
            BoardCard::planet("boxed", 1, 2).near(0).contained(),
            BoardCard::planet("nobody", 1, 2),
            BoardCard::planet("elsewhere", 1, 2).near(9),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_commander_bonus_is_one_per_planet() {
        let board = BoardSnapshot::new(vec![
            commander(1),
            BoardCard::planet("a", 0, 2).near(1),
            BoardCard::planet("b", 0, 0).near(1),
            BoardCard::planet("c", 0, 3).near(0),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(1)), 4);
        assert_eq!(tally.votes(SeatIndex(0)), 3);
    }

    #[test]
    fn test_alliance_mirrors_commander_to_other_seat() {
        let board = BoardSnapshot::new(vec![
            commander(0),
            alliance(2),
            BoardCard::planet("a", 0, 1).near(0),
            BoardCard::planet("b", 0, 1).near(2),
            BoardCard::planet("c", 0, 1).near(2),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(0)), 2);
        assert_eq!(tally.votes(SeatIndex(2)), 4);
    }

    #[test]
    fn test_alliance_without_commander_grants_nothing() {
        let board = BoardSnapshot::new(vec![alliance(2), BoardCard::planet("a", 0, 1).near(2)]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(2)), 1);
    }

    #[test]
    fn test_alliance_on_commander_seat_does_not_stack() {
        let board = BoardSnapshot::new(vec![
            commander(1),
            alliance(1),
            BoardCard::planet("a", 0, 1).near(1),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(1)), 2);
    }

    #[test]
    fn test_hero_adds_resources() {
        let board = BoardSnapshot::new(vec![
            hero(0),
            BoardCard::planet("a", 3, 1).near(0),
            BoardCard::planet("b", 3, 1).near(1),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(0)), 4);
        assert_eq!(tally.votes(SeatIndex(1)), 1);
    }

    #[test]
    fn test_face_down_markers_are_ignored() {
        let board = BoardSnapshot::new(vec![
            commander(0).face_down(),
            BoardCard::planet("a", 0, 1).near(0),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(0)), 1);
    }

    #[test]
    fn test_deterministic_regardless_of_card_order() {
        let mut cards = vec![
            commander(2),
            commander(1),
            alliance(0),
            hero(1),
            BoardCard::planet("a", 2, 1).near(0),
            BoardCard::planet("b", 2, 1).near(1),
            BoardCard::planet("c", 2, 1).near(2),
        ];
        let forward = VoteTallyCalculator::compute(&seats(), &BoardSnapshot::new(cards.clone()));
        cards.reverse();
        let backward = VoteTallyCalculator::compute(&seats(), &BoardSnapshot::new(cards));
        assert_eq!(forward, backward);
        // Lowest seat holding a commander wins
        assert_eq!(forward.votes(SeatIndex(1)), 1 + 1 + 2);
        assert_eq!(forward.votes(SeatIndex(2)), 1);
        assert_eq!(forward.votes(SeatIndex(0)), 2);
    }

    #[test]
    fn test_planet_value() {
        let bonuses = TallyBonuses {
            commander: Some(SeatIndex(0)),
            alliance: None,
            heroes: [SeatIndex(0)].into_iter().collect(),
        };
        let planet = PlanetValues {
            resources: 2,
            influence: 3,
        };
        assert_eq!(bonuses.planet_value(SeatIndex(0), planet), 6);
        assert_eq!(bonuses.planet_value(SeatIndex(1), planet), 3);
    }

    #[test]
    fn test_huge_influence_saturates() {
        let board = BoardSnapshot::new(vec![
            BoardCard::planet("a", 0, u32::MAX).near(0),
            BoardCard::planet("b", 0, 1).near(0),
            BoardCard::planet("c", 0, 4).near(1),
        ]);
        let tally = VoteTallyCalculator::compute(&seats(), &board);
        assert_eq!(tally.votes(SeatIndex(0)), u32::MAX);
        assert_eq!(tally.votes(SeatIndex(1)), 4);
        assert_eq!(tally.total(), u32::MAX);
    }

    #[test]
    fn test_planet_value_saturates_with_bonuses() {
        let board = BoardSnapshot::new(vec![commander(0), hero(0)]);
        let bonuses = TallyBonuses::detect(&board);
        let planet = PlanetValues {
            resources: u32::MAX,
            influence: u32::MAX,
        };
        assert_eq!(bonuses.planet_value(SeatIndex(0), planet), u32::MAX);
    }
}
