use crate::card::{Card, PlayedCard};

/// The face-up pile. Only the top card carries a color; the cards beneath
/// it are kept as plain cards, ready to be recycled into the deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscardPile {
    top: PlayedCard,
    below: Vec<Card>,
}

impl DiscardPile {
    pub fn new(top: PlayedCard) -> Self {
        Self { top, below: vec![] }
    }

    pub(crate) fn from_parts(top: PlayedCard, below: Vec<Card>) -> Self {
        Self { top, below }
    }

    pub fn top(&self) -> &PlayedCard {
        &self.top
    }

    pub fn push(&mut self, played: PlayedCard) {
        let previous = std::mem::replace(&mut self.top, played);
        self.below.push(previous.card());
    }

    pub fn len(&self) -> usize {
        self.below.len() + 1
    }

    /// Number of cards that could be recycled into the deck.
    pub fn recyclable(&self) -> usize {
        self.below.len()
    }

    pub(crate) fn take_below_top(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.below)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    #[test]
    fn pushing_buries_the_old_top_without_its_color() {
        let blue_5: Card = "blue_5".parse().unwrap();
        let mut pile = DiscardPile::new(PlayedCard::new(Card::wild(), Some(CardColor::Red)).unwrap());
        pile.push(PlayedCard::new(blue_5, None).unwrap());

        assert_eq!(pile.len(), 2);
        assert_eq!(pile.top().card(), blue_5);
        assert_eq!(pile.recyclable(), 1);
        assert_eq!(pile.take_below_top(), vec![Card::wild()]);
        assert_eq!(pile.len(), 1);
    }
}
