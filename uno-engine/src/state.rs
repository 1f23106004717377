use serde::{Deserialize, Serialize};

use crate::card::{Card, PlayedCard};
use crate::error::Result;
use crate::player::PlayerId;
use crate::rules::{Direction, Phase};

/// A read-only picture of a match, rebuilt after every command.
///
/// Both hands are included; hiding the opponent's cards is up to whoever
/// renders the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub seed: u64,
    /// How many times the discard pile has been recycled into the deck.
    pub reshuffles: u32,
    pub draw_pile_size: usize,
    /// Includes the top card.
    pub discard_size: usize,
    pub discard_top: PlayedCard,
    pub human_hand: Vec<Card>,
    pub ai_hand: Vec<Card>,
    pub current_player: PlayerId,
    pub direction: Direction,
    pub pending_draw: u8,
    pub phase: Phase,
    pub winner: Option<PlayerId>,
}

impl MatchState {
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        match player {
            PlayerId::Human => &self.human_hand,
            PlayerId::Ai => &self.ai_hand,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Cards across the deck, the discard pile and both hands.
    pub fn total_cards(&self) -> usize {
        self.draw_pile_size + self.discard_size + self.human_hand.len() + self.ai_hand.len()
    }
}

/// Everything needed to continue a match later: the snapshot plus the
/// order of the face-down deck (bottom to top).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMatch {
    pub state: MatchState,
    pub deck: Vec<Card>,
}

impl SavedMatch {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
