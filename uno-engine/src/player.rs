use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::card::Card;
use crate::constants::PLAYER_COUNT;
use crate::hand::Hand;

/// Seats at the table, in clockwise order.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Human,
    #[strum(serialize = "AI")]
    Ai,
}

impl PlayerId {
    pub const ALL: [PlayerId; PLAYER_COUNT] = [PlayerId::Human, PlayerId::Ai];

    pub fn index(self) -> usize {
        match self {
            PlayerId::Human => 0,
            PlayerId::Ai => 1,
        }
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self::ALL[index % PLAYER_COUNT]
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::Ai,
            PlayerId::Ai => PlayerId::Human,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub hand: Hand,
}

impl Player {
    pub fn new(id: PlayerId, cards: Vec<Card>) -> Self {
        Self {
            id,
            hand: Hand::from(cards),
        }
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn add_card(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub fn remove_card(&mut self, card: &Card) -> Option<Card> {
        self.hand.remove(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_alternate() {
        assert_eq!(PlayerId::Human.opponent(), PlayerId::Ai);
        assert_eq!(PlayerId::Ai.opponent(), PlayerId::Human);
        for id in PlayerId::ALL {
            assert_eq!(PlayerId::from_index(id.index()), id);
        }
        assert_eq!(PlayerId::from_index(2), PlayerId::Human);
    }

    #[test]
    fn display_names() {
        assert_eq!(PlayerId::Human.to_string(), "Human");
        assert_eq!(PlayerId::Ai.to_string(), "AI");
    }
}
