//! Board snapshot types
//!
//! A [`BoardSnapshot`] is a read-only view of the cards lying on the table,
//! already resolved against the seat roster by the host (each card carries
//! the seat it is closest to, if any).

use crate::seat::SeatIndex;
use serde::{Deserialize, Serialize};

/// Commander whose unlocked ability grants +1 vote per planet
pub const PER_PLANET_COMMANDER_NSID: &str = "card.leader.commander.xxcha:pok/elder_qanoj";
/// Alliance card sharing the per-planet commander ability
pub const COMMANDER_ALLIANCE_NSID: &str = "card.alliance:pok/xxcha";
/// Hero whose ability lets planet resources count as votes
pub const RESOURCE_CONVERSION_HERO_NSID: &str =
    "card.leader.hero.xxcha:codex.vigil/xxekir_grom.omega";

const PLANET_NSID_PREFIXES: [&str; 2] = ["card.planet", "card.legendary_planet"];

/// Host identifier of a physical card
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Printed values of a planet card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanetValues {
    pub resources: u32,
    pub influence: u32,
}

/// What a card means to the vote tally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Planet(PlanetValues),
    PerPlanetCommander,
    CommanderAlliance,
    ResourceConversionHero,
    Other,
}

/// A single card on the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCard {
    pub id: CardId,
    /// Namespace id, e.g. `card.planet:base/mecatol_rex`
    pub nsid: String,
    #[serde(default = "default_true")]
    pub face_up: bool,
    /// Inside a deck, bag or other container
    #[serde(default)]
    pub in_container: bool,
    /// Lying on a system tile rather than in front of a player
    #[serde(default)]
    pub on_system_tile: bool,
    /// Closest seat as resolved by the host, `None` when unresolvable
    #[serde(default)]
    pub nearest_seat: Option<SeatIndex>,
    /// Printed values, present for planet cards the host recognizes
    #[serde(default)]
    pub planet: Option<PlanetValues>,
}

fn default_true() -> bool {
    true
}

impl BoardCard {
    pub fn new(id: impl Into<String>, nsid: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            nsid: nsid.into(),
            face_up: true,
            in_container: false,
            on_system_tile: false,
            nearest_seat: None,
            planet: None,
        }
    }

    /// Planet card with the given values
    pub fn planet(id: impl Into<String>, resources: u32, influence: u32) -> Self {
        let id = id.into();
        let nsid = format!("card.planet:base/{id}");
        Self {
            planet: Some(PlanetValues {
                resources,
                influence,
            }),
            ..Self::new(id, nsid)
        }
    }

    pub fn near(mut self, seat: usize) -> Self {
        self.nearest_seat = Some(SeatIndex(seat));
        self
    }

    pub fn face_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    pub fn contained(mut self) -> Self {
        self.in_container = true;
        self
    }

    pub fn on_system_tile(mut self) -> Self {
        self.on_system_tile = true;
        self
    }

    pub fn is_planet_nsid(&self) -> bool {
        PLANET_NSID_PREFIXES
            .iter()
            .any(|prefix| self.nsid.starts_with(prefix))
    }

    /// Classify the card for tally purposes
    ///
    /// Planet cards the host could not resolve to printed values are `Other`.
    pub fn kind(&self) -> CardKind {
        match self.nsid.as_str() {
            PER_PLANET_COMMANDER_NSID => CardKind::PerPlanetCommander,
            COMMANDER_ALLIANCE_NSID => CardKind::CommanderAlliance,
            RESOURCE_CONVERSION_HERO_NSID => CardKind::ResourceConversionHero,
            _ => match self.planet {
                Some(values) if self.is_planet_nsid() => CardKind::Planet(values),
                _ => CardKind::Other,
            },
        }
    }

    /// Not held by any container
    pub fn is_loose(&self) -> bool {
        !self.in_container
    }
}

/// The agenda card that opened a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaCard {
    pub id: CardId,
    #[serde(default)]
    pub name: String,
}

impl AgendaCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
        }
    }
}

/// Cards on the table at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cards: Vec<BoardCard>,
}

impl BoardSnapshot {
    pub fn new(cards: Vec<BoardCard>) -> Self {
        Self { cards }
    }

    /// Loose cards, optionally including face-down ones
    pub fn loose_cards(&self, allow_face_down: bool) -> impl Iterator<Item = &BoardCard> {
        self.cards
            .iter()
            .filter(move |c| c.is_loose() && (allow_face_down || c.face_up))
    }

    pub fn find(&self, id: &CardId) -> Option<&BoardCard> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Face-down loose planet cards that are not sitting on a system tile
    ///
    /// These are the cards a "reset cards" action turns face up again.
    pub fn planet_cards_to_reset(&self) -> Vec<CardId> {
        self.loose_cards(true)
            .filter(|c| c.is_planet_nsid() && !c.face_up && !c.on_system_tile)
            .map(|c| c.id.clone())
            .collect()
    }
}
