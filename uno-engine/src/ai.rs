//! Computer opponent.

use std::cmp::Reverse;

use crate::card::{Card, CardColor, PlayedCard, Rank};
use crate::hand::{legal_plays, Hand};
use crate::rules::Phase;
use crate::turn::TurnAction;

/// Interface for the computer's decisions. Implementations only pick among
/// moves; legality is still enforced by the controller.
pub trait Strategy {
    /// Picks a card to play onto `top`, or `None` to draw instead.
    fn choose_play(&self, hand: &Hand, top: &PlayedCard) -> Option<Card>;

    /// Picks the color for a wild card about to be played from `hand`.
    fn choose_color(&self, hand: &Hand) -> CardColor;

    /// Whether to play a card that was just drawn and turned out playable.
    fn play_drawn(&self, _hand: &Hand, _drawn: Card, _top: &PlayedCard) -> bool {
        true
    }
}

/// Plays to disrupt: action and wild cards first, then the highest number.
///
/// Ties are broken by rank (Skip < Reverse < DrawTwo < Wild < Wild Draw
/// Four) and then by color priority (Red, Yellow, Green, Blue). Wild colors
/// go to the color held most, with the same color priority on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisruptiveStrategy;

impl DisruptiveStrategy {
    fn priority(card: &Card) -> (bool, Rank, Reverse<CardColor>) {
        (!card.rank().is_number(), card.rank(), Reverse(card.color()))
    }
}

impl Strategy for DisruptiveStrategy {
    fn choose_play(&self, hand: &Hand, top: &PlayedCard) -> Option<Card> {
        legal_plays(hand, top).into_iter().max_by_key(Self::priority)
    }

    fn choose_color(&self, hand: &Hand) -> CardColor {
        CardColor::CONCRETE
            .into_iter()
            .max_by_key(|color| (hand.count_color(*color), Reverse(*color)))
            .unwrap_or(CardColor::Red)
    }
}

/// The move `strategy` makes in `phase`, or `None` once the round is over.
pub fn decide(
    strategy: &dyn Strategy,
    phase: &Phase,
    hand: &Hand,
    top: &PlayedCard,
) -> Option<TurnAction> {
    let play = |card: Card| TurnAction::Play {
        card,
        color: card.is_wild().then(|| strategy.choose_color(hand)),
    };

    match *phase {
        Phase::RoundOver { .. } => None,
        Phase::AwaitingDraw { .. } => Some(TurnAction::Draw),
        Phase::AwaitingPlay { .. } => Some(match strategy.choose_play(hand, top) {
            Some(card) => play(card),
            None => TurnAction::Draw,
        }),
        Phase::AwaitingDrawnPlay { card, .. } => Some(if strategy.play_drawn(hand, card, top) {
            play(card)
        } else {
            TurnAction::Pass
        }),
    }
}
