use core::fmt;
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{ColorChoiceError, Result, UnoError};

/// Card colors, declared in tie-break priority order.
///
/// `Wild` is the color of the wild family while it sits in a deck or a hand.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumIter,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl CardColor {
    /// The four colors a discard top may carry, in priority order.
    pub const CONCRETE: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];

    pub fn is_concrete(self) -> bool {
        !matches!(self, CardColor::Wild)
    }

    fn key(self) -> &'static str {
        match self {
            CardColor::Red => "red",
            CardColor::Yellow => "yellow",
            CardColor::Green => "green",
            CardColor::Blue => "blue",
            CardColor::Wild => "UNO",
        }
    }
}

/// Card ranks. The derived ordering (numbers ascending, then the action
/// cards, then the wild family) is the one the AI uses to rank candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl Rank {
    pub fn is_number(self) -> bool {
        matches!(self, Rank::Number(_))
    }

    /// Skip, Reverse or DrawTwo.
    pub fn is_action(self) -> bool {
        matches!(self, Rank::Skip | Rank::Reverse | Rank::DrawTwo)
    }

    pub fn is_wild(self) -> bool {
        matches!(self, Rank::Wild | Rank::WildDrawFour)
    }

    fn key(self) -> String {
        match self {
            Rank::Number(number) => number.to_string(),
            Rank::Skip => "skip".to_string(),
            Rank::Reverse => "rev".to_string(),
            Rank::DrawTwo => "+2".to_string(),
            Rank::Wild => "wild".to_string(),
            Rank::WildDrawFour => "+4".to_string(),
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Number(number) => write!(f, "{number}"),
            Rank::Skip => write!(f, "Skip"),
            Rank::Reverse => write!(f, "Reverse"),
            Rank::DrawTwo => write!(f, "Draw Two"),
            Rank::Wild => write!(f, "Wild"),
            Rank::WildDrawFour => write!(f, "Wild Draw Four"),
        }
    }
}

/// A physical card: a `(color, rank)` pair.
///
/// Wild family cards always carry [`CardColor::Wild`]; every other card
/// carries one of the four concrete colors. The constructors enforce this,
/// so a `Card` value is always one that exists in the standard deck.
///
/// At the serialization boundary a card is its asset key (`red_7`,
/// `blue_skip`, `green_rev`, `yellow_+2`, `UNO_wild`, `UNO_+4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    color: CardColor,
    rank: Rank,
}

impl Card {
    pub fn new(color: CardColor, rank: Rank) -> Result<Self> {
        let valid = match rank {
            Rank::Number(number) => color.is_concrete() && number <= 9,
            Rank::Skip | Rank::Reverse | Rank::DrawTwo => color.is_concrete(),
            Rank::Wild | Rank::WildDrawFour => !color.is_concrete(),
        };
        if valid {
            Ok(Self { color, rank })
        } else {
            Err(UnoError::InvalidCard(color, rank))
        }
    }

    pub fn wild() -> Self {
        Self {
            color: CardColor::Wild,
            rank: Rank::Wild,
        }
    }

    pub fn wild_draw_four() -> Self {
        Self {
            color: CardColor::Wild,
            rank: Rank::WildDrawFour,
        }
    }

    /// Only for callers that iterate over the concrete colors.
    pub(crate) fn colored(color: CardColor, rank: Rank) -> Self {
        debug_assert!(color.is_concrete() && !rank.is_wild());
        Self { color, rank }
    }

    pub fn color(&self) -> CardColor {
        self.color
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn is_wild(&self) -> bool {
        self.rank.is_wild()
    }

    /// Asset-style name of the card, e.g. `blue_7` or `UNO_+4`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.color.key(), self.rank.key())
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wild() {
            write!(f, "{}", self.rank)
        } else {
            write!(f, "{} {}", self.color, self.rank)
        }
    }
}

impl FromStr for Card {
    type Err = UnoError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || UnoError::UnknownCard(s.to_string());
        let (color, rank) = s.trim().split_once('_').ok_or_else(unknown)?;

        if color.eq_ignore_ascii_case("uno") || color.eq_ignore_ascii_case("wild") {
            return match rank.to_ascii_lowercase().as_str() {
                "wild" => Ok(Card::wild()),
                "+4" => Ok(Card::wild_draw_four()),
                _ => Err(unknown()),
            };
        }

        let color = CardColor::from_str(color).map_err(|_| unknown())?;
        let rank = match rank.to_ascii_lowercase().as_str() {
            "skip" => Rank::Skip,
            "rev" | "reverse" => Rank::Reverse,
            "+2" => Rank::DrawTwo,
            digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Rank::Number(digits.parse().map_err(|_| unknown())?)
            }
            _ => return Err(unknown()),
        };
        Card::new(color, rank).map_err(|_| unknown())
    }
}

impl TryFrom<String> for Card {
    type Error = UnoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.key()
    }
}

/// The card on top of the discard pile together with the color it imposes.
///
/// For colored cards the two always agree. A wild family card takes the
/// color chosen by whoever played it, so the effective color is always one
/// of [`CardColor::CONCRETE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedCard {
    card: Card,
    color: CardColor,
}

impl PlayedCard {
    /// Attaches the effective color to a card being played.
    ///
    /// Wild family cards require a concrete `chosen` color, every other
    /// card must be played without one.
    pub fn new(card: Card, chosen: Option<CardColor>) -> Result<Self, ColorChoiceError> {
        match (card.is_wild(), chosen) {
            (true, None) => Err(ColorChoiceError::Missing(card)),
            (true, Some(color)) if !color.is_concrete() => {
                Err(ColorChoiceError::NotConcrete(color))
            }
            (true, Some(color)) => Ok(Self { card, color }),
            (false, Some(_)) => Err(ColorChoiceError::NotRequired(card)),
            (false, None) => Ok(Self {
                card,
                color: card.color,
            }),
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn color(&self) -> CardColor {
        self.color
    }

    pub fn rank(&self) -> Rank {
        self.card.rank
    }

    /// False for values that could not have been produced by [`PlayedCard::new`],
    /// which can only come from a hand-edited snapshot.
    pub fn is_consistent(&self) -> bool {
        let chosen = self.card.is_wild().then_some(self.color);
        matches!(PlayedCard::new(self.card, chosen), Ok(played) if played == *self)
    }
}

impl Display for PlayedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.card.is_wild() {
            write!(f, "{} ({})", self.card, self.color)
        } else {
            write!(f, "{}", self.card)
        }
    }
}
