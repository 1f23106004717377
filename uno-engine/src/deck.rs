use rand::{seq::SliceRandom, Rng};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::{
    card::{Card, CardColor, Rank},
    constants::*,
    discard::DiscardPile,
    error::{Result, UnoError},
};

/// The face-down draw pile. The top of the pile is the end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck(pub(crate) Vec<Card>);

impl Deck {
    /// The 108-card standard set in a fixed order, unshuffled.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK);

        // Colored Cards
        for color in CardColor::iter().filter(|color| color.is_concrete()) {
            // Number Cards
            for number in NUMBER_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Number(*number)));
            }

            // Skip Cards
            for _ in 0..SKIP_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Skip));
            }

            // Reverse Cards
            for _ in 0..REVERSE_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::Reverse));
            }

            // Draw Two Cards
            for _ in 0..DRAW_TWO_CARDS_PER_COLOR {
                cards.push(Card::colored(color, Rank::DrawTwo));
            }
        }

        for _ in 0..WILD_CARDS_IN_DECK {
            cards.push(Card::wild());
        }

        for _ in 0..WILD_DRAW_FOUR_CARDS_IN_DECK {
            cards.push(Card::wild_draw_four());
        }

        Self(cards)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cards from bottom to top.
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Takes the top card without touching the discard pile.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Takes the top card, first recycling the discard pile when the deck
    /// has run out.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, discard: &mut DiscardPile, rng: &mut R) -> Result<Card> {
        if self.is_empty() {
            self.replenish(discard, rng)?;
        }
        self.draw().ok_or(UnoError::EmptyPile)
    }

    /// Moves every discard except the top card under the deck and shuffles.
    ///
    /// The recycled cards are sorted first, so the outcome depends only on
    /// which cards were recycled and on `rng`, never on the order they were
    /// discarded in.
    pub fn replenish<R: Rng + ?Sized>(&mut self, discard: &mut DiscardPile, rng: &mut R) -> Result<usize> {
        let mut recycled = discard.take_below_top();
        if recycled.is_empty() {
            return Err(UnoError::EmptyPile);
        }
        recycled.sort_unstable();

        let count = recycled.len();
        recycled.append(&mut self.0);
        self.0 = recycled;
        self.shuffle(rng);

        debug!(recycled = count, deck = self.len(), "reshuffled discard pile into deck");
        Ok(count)
    }

    /// Puts a card back on top, used when the opening flip is not a number.
    pub(crate) fn put_back(&mut self, card: Card) {
        self.0.push(card);
    }
}

/// Builds the standard deck, unshuffled.
pub fn build_standard_deck() -> Deck {
    Deck::standard()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::card::PlayedCard;

    fn counts(deck: &Deck) -> BTreeMap<Card, usize> {
        let mut counts = BTreeMap::new();
        for card in deck.cards() {
            *counts.entry(*card).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn correct_card_count_new_deck() {
        assert_eq!(Deck::standard().len(), TOTAL_CARDS_IN_DECK);
    }

    #[test]
    fn standard_deck_matches_canonical_table() {
        let counts = counts(&build_standard_deck());

        for color in CardColor::CONCRETE {
            let colored = |rank| counts[&Card::new(color, rank).unwrap()];

            assert_eq!(colored(Rank::Number(0)), 1);
            for number in 1..=9 {
                assert_eq!(colored(Rank::Number(number)), 2);
            }
            assert_eq!(colored(Rank::Skip), 2);
            assert_eq!(colored(Rank::Reverse), 2);
            assert_eq!(colored(Rank::DrawTwo), 2);
        }
        assert_eq!(counts[&Card::wild()], 4);
        assert_eq!(counts[&Card::wild_draw_four()], 4);

        // 13 distinct faces per color, plus the wild family
        assert_eq!(counts.len(), 4 * 13 + 2);
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let mut deck_a = Deck::standard();
        let mut deck_b = Deck::standard();
        deck_a.shuffle(&mut StdRng::seed_from_u64(7));
        deck_b.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(deck_a, deck_b);

        let mut deck_c = Deck::standard();
        deck_c.shuffle(&mut StdRng::seed_from_u64(8));
        assert_ne!(deck_a, deck_c);
        assert_eq!(counts(&deck_a), counts(&deck_c));
    }

    #[test]
    fn draw_one_recycles_all_but_top() {
        let red_1 = Card::new(CardColor::Red, Rank::Number(1)).unwrap();
        let red_2 = Card::new(CardColor::Red, Rank::Number(2)).unwrap();
        let mut discard = DiscardPile::new(PlayedCard::new(red_1, None).unwrap());
        discard.push(PlayedCard::new(Card::wild(), Some(CardColor::Blue)).unwrap());
        discard.push(PlayedCard::new(red_2, None).unwrap());

        let mut deck = Deck::default();
        let mut rng = StdRng::seed_from_u64(1);

        let first = deck.draw_one(&mut discard, &mut rng).unwrap();
        let second = deck.draw_one(&mut discard, &mut rng).unwrap();

        let mut drawn = vec![first, second];
        drawn.sort();
        assert_eq!(drawn, vec![red_1, Card::wild()]);
        assert_eq!(discard.len(), 1);
        assert_eq!(discard.top().card(), red_2);

        assert!(matches!(
            deck.draw_one(&mut discard, &mut rng),
            Err(UnoError::EmptyPile)
        ));
        assert_eq!(discard.len(), 1);
    }

    #[test]
    fn replenish_ignores_discard_order() {
        let cards = [(CardColor::Red, 3), (CardColor::Blue, 8), (CardColor::Green, 0)]
            .map(|(color, number)| Card::new(color, Rank::Number(number)).unwrap());
        let top = PlayedCard::new(Card::new(CardColor::Yellow, Rank::Skip).unwrap(), None).unwrap();

        let mut forward = DiscardPile::new(PlayedCard::new(cards[0], None).unwrap());
        let mut backward = DiscardPile::new(PlayedCard::new(cards[2], None).unwrap());
        for card in &cards[1..] {
            forward.push(PlayedCard::new(*card, None).unwrap());
        }
        for card in cards[..2].iter().rev() {
            backward.push(PlayedCard::new(*card, None).unwrap());
        }
        forward.push(top);
        backward.push(top);

        let mut deck_a = Deck::default();
        let mut deck_b = Deck::default();
        deck_a.replenish(&mut forward, &mut StdRng::seed_from_u64(3)).unwrap();
        deck_b.replenish(&mut backward, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(deck_a, deck_b);
    }
}
