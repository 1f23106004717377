use thiserror::Error;

use crate::card::{Card, CardColor, PlayedCard, Rank};
use crate::player::PlayerId;

#[derive(Error, Debug)]
pub enum UnoError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("both the draw pile and the discard pile are exhausted")]
    EmptyPile,
    #[error("invalid color choice: {0}")]
    InvalidColorChoice(#[from] ColorChoiceError),
    #[error("there is no {0} {1} card")]
    InvalidCard(CardColor, Rank),
    #[error("unknown card {0:?}")]
    UnknownCard(String),
    #[error("invalid match configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid saved match: {0}")]
    InvalidSnapshot(#[from] SnapshotError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl UnoError {
    /// Moving out of turn counts as an illegal move too.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, UnoError::NotYourTurn(_) | UnoError::IllegalMove(_))
    }
}

/// Reasons a play, draw or pass is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("the round is over")]
    RoundOver,

    #[error("{0} is not in hand")]
    CardNotInHand(Card),

    #[error("{card} cannot be played on {top}")]
    NotPlayable { card: Card, top: PlayedCard },

    /// Wild Draw Four is only legal when no card in hand matches the top color.
    #[error("Wild Draw Four cannot be played while holding a {0} card")]
    WildDrawFourWithMatchingColor(CardColor),

    /// A pending DrawTwo or Wild Draw Four must be honored before anything else.
    #[error("must draw {0} cards first")]
    MustDraw(u8),

    /// After drawing, only the card just drawn may still be played.
    #[error("only the drawn {0} may be played")]
    OnlyDrawnCard(Card),

    #[error("already drew a card this turn")]
    AlreadyDrew,

    #[error("passing is only allowed after drawing a playable card, or when nothing can be drawn or played")]
    NothingToPass,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorChoiceError {
    #[error("{0} needs a color")]
    Missing(Card),
    #[error("{0} is not a color a played card can take")]
    NotConcrete(CardColor),
    #[error("{0} does not take a color")]
    NotRequired(Card),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("too many copies of {0}")]
    TooManyCopies(Card),
    #[error("{pile} holds {found} cards but {expected} were recorded")]
    PileSize {
        pile: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("discard top {0} has an impossible color")]
    InconsistentTop(PlayedCard),
    #[error("phase does not agree with the rest of the match state")]
    InconsistentPhase,
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
