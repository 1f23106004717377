use std::collections::BTreeSet;

use crate::card::{Card, CardColor, PlayedCard, Rank};
use crate::deck::Deck;
use crate::error::{IllegalMove, Result, UnoError};
use crate::player::Player;

/// The cards held by one player. Order carries no meaning beyond display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }

    pub fn add(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Removes one copy of `card`.
    pub fn remove(&mut self, card: &Card) -> Option<Card> {
        self.0
            .iter()
            .position(|x| x == card)
            .map(|pos| self.0.remove(pos))
    }

    pub fn count_color(&self, color: CardColor) -> usize {
        self.0.iter().filter(|card| card.color() == color).count()
    }

    /// Checks whether `card` may be played from this hand onto `top`.
    pub fn check_play(&self, card: &Card, top: &PlayedCard) -> Result<(), IllegalMove> {
        if !self.contains(card) {
            return Err(IllegalMove::CardNotInHand(*card));
        }
        if card.rank() == Rank::WildDrawFour && self.count_color(top.color()) > 0 {
            return Err(IllegalMove::WildDrawFourWithMatchingColor(top.color()));
        }
        if !matches_top(card, top) {
            return Err(IllegalMove::NotPlayable {
                card: *card,
                top: *top,
            });
        }
        Ok(())
    }

    /// Every distinct card of this hand that may be played onto `top`.
    pub fn legal_plays(&self, top: &PlayedCard) -> BTreeSet<Card> {
        self.0
            .iter()
            .filter(|card| self.check_play(card, top).is_ok())
            .copied()
            .collect()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

/// Color, rank or wildness match against the discard top, ignoring the
/// Wild Draw Four restriction that depends on the rest of the hand.
pub fn matches_top(card: &Card, top: &PlayedCard) -> bool {
    card.is_wild() || card.color() == top.color() || card.rank() == top.rank()
}

pub fn legal_plays(hand: &Hand, top: &PlayedCard) -> BTreeSet<Card> {
    hand.legal_plays(top)
}

/// Deals `count` cards to every player from the top of `deck`, one card at a
/// time around the table.
pub fn deal(players: &mut [Player], deck: &mut Deck, count: usize) -> Result<()> {
    if deck.len() < count * players.len() {
        return Err(UnoError::EmptyPile);
    }

    for _ in 0..count {
        for player in players.iter_mut() {
            let card = deck.draw().ok_or(UnoError::EmptyPile)?;
            player.add_card(card);
        }
    }

    Ok(())
}
