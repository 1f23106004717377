use std::fmt::{self, Display};

use crate::card::{Card, CardColor, PlayedCard};
use crate::player::PlayerId;
use crate::rules::Direction;

/// A single command a player can submit on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Play a card. `color` is required for the wild family and must be
    /// absent for every other card.
    Play {
        card: Card,
        color: Option<CardColor>,
    },
    Draw,
    /// Keep a freshly drawn playable card and end the turn.
    Pass,
}

/// Something that happened while resolving a command, in the order it
/// happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Started { first: PlayedCard, player: PlayerId },
    Played { player: PlayerId, card: PlayedCard },
    Drew { player: PlayerId, count: usize },
    /// The player must draw before doing anything else.
    MustDraw { player: PlayerId, count: u8 },
    Skipped { player: PlayerId },
    Reversed { direction: Direction },
    Passed { player: PlayerId },
    Reshuffled { cards: usize },
    RoundWon { player: PlayerId },
}

impl Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Started { first, player } => {
                write!(f, "{first} starts the discard pile, {player} plays first")
            }
            Event::Played { player, card } => write!(f, "{player} played {card}"),
            Event::Drew { player, count: 1 } => write!(f, "{player} drew a card"),
            Event::Drew { player, count } => write!(f, "{player} drew {count} cards"),
            Event::MustDraw { player, count } => write!(f, "{player} must draw {count} cards"),
            Event::Skipped { player } => write!(f, "{player} is skipped"),
            Event::Reversed { direction } => write!(f, "play now goes {direction}"),
            Event::Passed { player } => write!(f, "{player} passed"),
            Event::Reshuffled { cards } => {
                write!(f, "{cards} cards were shuffled back into the deck")
            }
            Event::RoundWon { player } => write!(f, "{player} won the round"),
        }
    }
}
