use serde::{Deserialize, Serialize};

use crate::constants::{HAND_SIZE, NUMBER_CARDS_IN_DECK, PLAYER_COUNT};
use crate::error::{Result, UnoError};
use crate::player::PlayerId;

/// Settings fixed when a match is dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seeds every shuffle of the match.
    pub seed: u64,
    pub hand_size: usize,
    /// Receives the first card of the deal and takes the first turn.
    pub first_player: PlayerId,
}

impl MatchConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(UnoError::InvalidConfig("hand size must be at least one card"));
        }
        // Leaves at least one number card in the deck for the opening flip.
        if self.hand_size * PLAYER_COUNT >= NUMBER_CARDS_IN_DECK {
            return Err(UnoError::InvalidConfig("hand size leaves no card to open with"));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            hand_size: HAND_SIZE,
            first_player: PlayerId::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MatchConfig::new(9);
        assert_eq!(config.seed, 9);
        assert_eq!(config.hand_size, 7);
        assert_eq!(config.first_player, PlayerId::Human);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn hand_size_is_bounded() {
        for hand_size in [0, 38, 50] {
            let config = MatchConfig {
                hand_size,
                ..MatchConfig::default()
            };
            assert!(matches!(config.validate(), Err(UnoError::InvalidConfig(_))));
        }

        let largest = MatchConfig {
            hand_size: 37,
            ..MatchConfig::default()
        };
        assert!(largest.validate().is_ok());
    }
}
