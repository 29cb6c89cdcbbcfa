//! Card definitions - immutable catalogue entries.
//!
//! A `Card` is never created or destroyed during play, only moved between
//! hands, the deck, the trash and the theaters. Its identity is its `CardId`.

use serde::{Deserialize, Deserializer, Serialize};

use super::registry;

/// Unique identifier for a catalogue card (1..=18).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three contested zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TheaterType {
    Air,
    Land,
    Sea,
}

impl TheaterType {
    /// All theaters in canonical order.
    pub const ALL: [TheaterType; 3] = [TheaterType::Air, TheaterType::Land, TheaterType::Sea];

    /// Array index of this theater (canonical order).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            TheaterType::Air => 0,
            TheaterType::Land => 1,
            TheaterType::Sea => 2,
        }
    }
}

impl std::fmt::Display for TheaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TheaterType::Air => "air",
            TheaterType::Land => "land",
            TheaterType::Sea => "sea",
        };
        f.write_str(name)
    }
}

/// Static card definition.
///
/// Deserialization goes through the catalogue: a serialized card is only
/// accepted if it matches the catalogue entry with the same id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    pub id: CardId,
    pub theater: TheaterType,
    pub strength: u8,
    pub name: &'static str,
}

impl Card {
    pub(crate) const fn new(
        id: u8,
        theater: TheaterType,
        strength: u8,
        name: &'static str,
    ) -> Self {
        Self {
            id: CardId(id),
            theater,
            strength,
            name,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.name, self.theater, self.strength)
    }
}

/// Owned wire shape of a card, validated against the catalogue.
#[derive(Deserialize)]
struct CardRecord {
    id: CardId,
    theater: TheaterType,
    strength: u8,
    name: String,
}

impl TryFrom<CardRecord> for Card {
    type Error = String;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let card = registry::card(record.id).ok_or_else(|| format!("unknown {}", record.id))?;
        if card.theater != record.theater
            || card.strength != record.strength
            || card.name != record.name
        {
            return Err(format!("{} does not match the catalogue", record.id));
        }
        Ok(card)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = CardRecord::deserialize(deserializer)?;
        Card::try_from(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Card(7)");
    }

    #[test]
    fn test_theater_index_matches_all() {
        for (i, theater) in TheaterType::ALL.iter().enumerate() {
            assert_eq!(theater.index(), i);
        }
    }

    #[test]
    fn test_theater_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&TheaterType::Sea).unwrap(), "\"sea\"");
        let land: TheaterType = serde_json::from_str("\"land\"").unwrap();
        assert_eq!(land, TheaterType::Land);
    }

    #[test]
    fn test_card_serde_through_catalogue() {
        let card = registry::card(CardId::new(12)).unwrap();
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_card_deserialize_rejects_forgery() {
        let forged = r#"{"id":12,"theater":"land","strength":9,"name":"Heavy Tanks"}"#;
        assert!(serde_json::from_str::<Card>(forged).is_err());

        let unknown = r#"{"id":40,"theater":"air","strength":1,"name":"Nope"}"#;
        assert!(serde_json::from_str::<Card>(unknown).is_err());
    }

    #[test]
    fn test_cards_nested_in_owned_containers() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Pile {
            cards: Vec<Card>,
            top: Option<Card>,
        }

        let cards = registry::all_cards();
        let pile = Pile {
            top: cards.last().copied(),
            cards,
        };
        let json = serde_json::to_string(&pile).unwrap();
        let back: Pile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pile);

        let err = serde_json::from_str::<Pile>(r#"{"cards":[{"id":0}],"top":null}"#).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
