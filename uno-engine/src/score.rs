//! End-of-round reporting.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::constants::{ACTION_CARD_POINTS, WILD_CARD_POINTS};
use crate::player::PlayerId;
use crate::state::MatchState;

/// Standard UNO value of a card left in a losing hand.
pub fn card_points(card: &Card) -> u32 {
    match card.rank() {
        Rank::Number(number) => u32::from(number),
        Rank::Skip | Rank::Reverse | Rank::DrawTwo => ACTION_CARD_POINTS,
        Rank::Wild | Rank::WildDrawFour => WILD_CARD_POINTS,
    }
}

pub fn hand_points(cards: &[Card]) -> u32 {
    cards.iter().map(card_points).sum()
}

/// Who won a finished round, and what everyone was left holding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// Points the winner scores from the loser's hand.
    pub points: u32,
    pub winner_hand: Vec<Card>,
    pub loser_hand: Vec<Card>,
}

impl RoundReport {
    /// `None` while the round is still being played.
    pub fn from_state(state: &MatchState) -> Option<Self> {
        let winner = state.winner?;
        let loser = winner.opponent();
        let loser_hand = state.hand(loser).to_vec();

        Some(Self {
            winner,
            loser,
            points: hand_points(&loser_hand),
            winner_hand: state.hand(winner).to_vec(),
            loser_hand,
        })
    }
}

/// Running totals over several rounds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    totals: BTreeMap<PlayerId, u32>,
    rounds: usize,
}

impl Scoreboard {
    pub fn record(&mut self, report: &RoundReport) {
        *self.totals.entry(report.winner).or_insert(0) += report.points;
        self.rounds += 1;
    }

    pub fn total(&self, player: PlayerId) -> u32 {
        self.totals.get(&player).copied().unwrap_or(0)
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }
}
