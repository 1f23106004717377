#![allow(dead_code)]

use uno_engine::{
    card::{Card, CardColor, PlayedCard},
    constants::TOTAL_CARDS_IN_DECK,
    player::PlayerId,
    rules::{Direction, Phase},
    state::{MatchState, SavedMatch},
    MatchController,
};

pub const SEED: u64 = 7;

pub fn card(key: &str) -> Card {
    key.parse().expect("test card keys are valid")
}

pub fn cards(keys: &[&str]) -> Vec<Card> {
    keys.iter().map(|key| card(key)).collect()
}

pub fn top(key: &str) -> PlayedCard {
    PlayedCard::new(card(key), None).expect("top card must not be wild")
}

pub fn wild_top(key: &str, color: CardColor) -> PlayedCard {
    PlayedCard::new(card(key), Some(color)).expect("top card must be wild")
}

pub fn awaiting_play(player: PlayerId) -> Phase {
    Phase::AwaitingPlay { player }
}

/// A snapshot with the given piles. Every card not listed ends up below the
/// top of the discard pile.
pub fn snapshot(
    top: PlayedCard,
    human: Vec<Card>,
    ai: Vec<Card>,
    deck: Vec<Card>,
    phase: Phase,
) -> SavedMatch {
    let discard_size = TOTAL_CARDS_IN_DECK - deck.len() - human.len() - ai.len();

    SavedMatch {
        state: MatchState {
            seed: SEED,
            reshuffles: 0,
            draw_pile_size: deck.len(),
            discard_size,
            discard_top: top,
            human_hand: human,
            ai_hand: ai,
            current_player: phase.player(),
            direction: Direction::Clockwise,
            pending_draw: phase.pending_draw(),
            phase,
            winner: phase.winner(),
        },
        deck,
    }
}

pub fn position(top: PlayedCard, human: &[&str], ai: &[&str], deck: &[&str], phase: Phase) -> MatchController {
    let saved = snapshot(top, cards(human), cards(ai), cards(deck), phase);
    MatchController::resume(saved).expect("test position must be consistent")
}

pub fn drain_events(uno: &mut MatchController) -> Vec<uno_engine::turn::Event> {
    std::iter::from_fn(|| uno.pop_event()).collect()
}
