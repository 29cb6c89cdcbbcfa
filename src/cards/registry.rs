//! The fixed card catalogue.
//!
//! Three theaters, six strengths each. Ids run 1..=18: Air 1-6, Land 7-12,
//! Sea 13-18, strength rising with the id inside each theater.

use super::definition::{Card, CardId, TheaterType};

/// Number of cards in the catalogue.
pub const CATALOGUE_SIZE: usize = 18;

/// The catalogue in id order.
pub const CATALOGUE: [Card; CATALOGUE_SIZE] = [
    Card::new(1, TheaterType::Air, 1, "Air Drop"),
    Card::new(2, TheaterType::Air, 2, "Air Superiority"),
    Card::new(3, TheaterType::Air, 3, "Aerodrome"),
    Card::new(4, TheaterType::Air, 4, "Maneuver"),
    Card::new(5, TheaterType::Air, 5, "Transport"),
    Card::new(6, TheaterType::Air, 6, "Heavy Bombers"),
    Card::new(7, TheaterType::Land, 1, "Ambush"),
    Card::new(8, TheaterType::Land, 2, "Reconnaissance"),
    Card::new(9, TheaterType::Land, 3, "Support"),
    Card::new(10, TheaterType::Land, 4, "Reinforce"),
    Card::new(11, TheaterType::Land, 5, "Armor"),
    Card::new(12, TheaterType::Land, 6, "Heavy Tanks"),
    Card::new(13, TheaterType::Sea, 1, "Disrupt"),
    Card::new(14, TheaterType::Sea, 2, "Naval Superiority"),
    Card::new(15, TheaterType::Sea, 3, "Redeploy"),
    Card::new(16, TheaterType::Sea, 4, "Escalation"),
    Card::new(17, TheaterType::Sea, 5, "Containment"),
    Card::new(18, TheaterType::Sea, 6, "Blockade"),
];

/// The full catalogue, in id order.
#[must_use]
pub fn all_cards() -> Vec<Card> {
    CATALOGUE.to_vec()
}

/// Look up a card by id.
#[must_use]
pub fn card(id: CardId) -> Option<Card> {
    CATALOGUE.iter().find(|c| c.id == id).copied()
}

/// Cards belonging to one theater, in strength order.
pub fn cards_for(theater: TheaterType) -> impl Iterator<Item = Card> {
    CATALOGUE.into_iter().filter(move |c| c.theater == theater)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_size_and_ids() {
        let cards = all_cards();
        assert_eq!(cards.len(), CATALOGUE_SIZE);

        let ids: HashSet<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATALOGUE_SIZE);
        assert!(cards.iter().all(|c| (1..=18).contains(&c.id.raw())));
    }

    #[test]
    fn test_six_per_theater() {
        for theater in TheaterType::ALL {
            let strengths: Vec<u8> = cards_for(theater).map(|c| c.strength).collect();
            assert_eq!(strengths, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_all_cards_is_deterministic() {
        assert_eq!(all_cards(), all_cards());
    }

    #[test]
    fn test_lookup() {
        let card = card(CardId::new(6)).unwrap();
        assert_eq!(card.name, "Heavy Bombers");
        assert_eq!(card.theater, TheaterType::Air);
        assert_eq!(card.strength, 6);

        assert!(super::card(CardId::new(0)).is_none());
        assert!(super::card(CardId::new(19)).is_none());
    }
}
