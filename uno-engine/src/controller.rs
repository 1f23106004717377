use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::iter;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

use crate::ai::{self, DisruptiveStrategy, Strategy};
use crate::card::{Card, CardColor, PlayedCard};
use crate::config::MatchConfig;
use crate::constants::{DRAW_TWO_PENALTY, PLAYER_COUNT, WILD_DRAW_FOUR_PENALTY};
use crate::deck::Deck;
use crate::discard::DiscardPile;
use crate::error::{IllegalMove, Result, SnapshotError, UnoError};
use crate::hand::{deal, Hand};
use crate::player::{Player, PlayerId};
use crate::rules::{self, Direction, Phase, Transition};
use crate::score::RoundReport;
use crate::state::{MatchState, SavedMatch};
use crate::turn::{Event, TurnAction};

const RESHUFFLE_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Randomness for the `reshuffles`-th recycling of the discard pile.
fn reshuffle_rng(seed: u64, reshuffles: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ RESHUFFLE_SALT.wrapping_mul(u64::from(reshuffles) + 1))
}

fn rejected(player: PlayerId, error: UnoError) -> UnoError {
    warn!(player = %player, %error, "command rejected");
    error
}

/// Owns one two-player match and is its only mutator.
///
/// Every command either applies completely and returns the new
/// [`MatchState`], or fails and leaves the match untouched.
#[derive(Debug)]
pub struct MatchController {
    seed: u64,
    deck: Deck,
    discard: DiscardPile,
    players: [Player; PLAYER_COUNT],
    direction: Direction,
    phase: Phase,
    reshuffles: u32,
    events: VecDeque<Event>,
}

impl MatchController {
    /// Shuffles, deals seven cards each and flips the opening card.
    pub fn new_match(seed: u64) -> Result<Self> {
        Self::with_config(MatchConfig::new(seed))
    }

    pub fn with_config(config: MatchConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);

        let first = config.first_player;
        let mut players = PlayerId::ALL.map(|id| Player::new(id, vec![]));
        players.rotate_left(first.index());
        deal(&mut players, &mut deck, config.hand_size)?;
        players.rotate_right(first.index());

        let opening = loop {
            let card = deck.draw().ok_or(UnoError::EmptyPile)?;
            if card.rank().is_number() {
                break card;
            }
            debug!(card = %card, "opening card is not a number, reshuffling");
            deck.put_back(card);
            deck.shuffle(&mut rng);
        };
        let top = PlayedCard::new(opening, None)?;

        info!(seed = config.seed, top = %top, first = %first, "new match dealt");

        Ok(Self {
            seed: config.seed,
            deck,
            discard: DiscardPile::new(top),
            players,
            direction: Direction::default(),
            phase: Phase::AwaitingPlay { player: first },
            reshuffles: 0,
            events: VecDeque::from([Event::Started {
                first: top,
                player: first,
            }]),
        })
    }

    /// Continues a match from [`MatchController::save`].
    ///
    /// The discard pile below the top card is rebuilt from whatever the
    /// snapshot does not account for.
    pub fn resume(saved: SavedMatch) -> Result<Self> {
        let SavedMatch { state, deck } = saved;

        let top = state.discard_top;
        if !top.is_consistent() {
            return Err(SnapshotError::InconsistentTop(top).into());
        }
        if state.draw_pile_size != deck.len() {
            return Err(SnapshotError::PileSize {
                pile: "draw pile",
                expected: state.draw_pile_size,
                found: deck.len(),
            }
            .into());
        }

        let mut unaccounted: BTreeMap<Card, usize> = BTreeMap::new();
        for card in Deck::standard().cards() {
            *unaccounted.entry(*card).or_insert(0) += 1;
        }
        let top_card = top.card();
        let placed = deck
            .iter()
            .chain(&state.human_hand)
            .chain(&state.ai_hand)
            .chain(iter::once(&top_card));
        for card in placed {
            match unaccounted.get_mut(card) {
                Some(count) if *count > 0 => *count -= 1,
                _ => return Err(SnapshotError::TooManyCopies(*card).into()),
            }
        }
        let below: Vec<Card> = unaccounted
            .into_iter()
            .flat_map(|(card, count)| iter::repeat(card).take(count))
            .collect();
        if state.discard_size != below.len() + 1 {
            return Err(SnapshotError::PileSize {
                pile: "discard pile",
                expected: state.discard_size,
                found: below.len() + 1,
            }
            .into());
        }

        Self::check_phase(&state)?;

        info!(seed = state.seed, phase = ?state.phase, "match resumed");

        Ok(Self {
            seed: state.seed,
            deck: Deck::from_cards(deck),
            discard: DiscardPile::from_parts(top, below),
            players: [
                Player::new(PlayerId::Human, state.human_hand),
                Player::new(PlayerId::Ai, state.ai_hand),
            ],
            direction: state.direction,
            phase: state.phase,
            reshuffles: state.reshuffles,
            events: VecDeque::new(),
        })
    }

    fn check_phase(state: &MatchState) -> Result<(), SnapshotError> {
        let phase = &state.phase;
        let top = &state.discard_top;
        let consistent = state.current_player == phase.player()
            && state.pending_draw == phase.pending_draw()
            && state.winner == phase.winner()
            && match *phase {
                Phase::RoundOver { winner } => {
                    state.hand(winner).is_empty() && !state.hand(winner.opponent()).is_empty()
                }
                Phase::AwaitingDrawnPlay { player, card } => {
                    let hand = Hand::from(state.hand(player).to_vec());
                    hand.check_play(&card, top).is_ok()
                        && !state.hand(player.opponent()).is_empty()
                }
                Phase::AwaitingDraw { count, .. }
                    if count != DRAW_TWO_PENALTY && count != WILD_DRAW_FOUR_PENALTY =>
                {
                    false
                }
                Phase::AwaitingPlay { .. } | Phase::AwaitingDraw { .. } => {
                    PlayerId::ALL.iter().all(|id| !state.hand(*id).is_empty())
                }
            };

        if consistent {
            Ok(())
        } else {
            Err(SnapshotError::InconsistentPhase)
        }
    }

    pub fn save(&self) -> SavedMatch {
        SavedMatch {
            state: self.current_state(),
            deck: self.deck.cards().to_vec(),
        }
    }

    pub fn current_state(&self) -> MatchState {
        MatchState {
            seed: self.seed,
            reshuffles: self.reshuffles,
            draw_pile_size: self.deck.len(),
            discard_size: self.discard.len(),
            discard_top: *self.discard.top(),
            human_hand: self.player(PlayerId::Human).hand.cards().to_vec(),
            ai_hand: self.player(PlayerId::Ai).hand.cards().to_vec(),
            current_player: self.phase.player(),
            direction: self.direction,
            pending_draw: self.phase.pending_draw(),
            phase: self.phase,
            winner: self.phase.winner(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The cards `player` could play right now. Empty when it is not their
    /// turn or when they owe a draw.
    pub fn playable(&self, player: PlayerId) -> BTreeSet<Card> {
        match self.phase {
            Phase::AwaitingPlay { player: current } if current == player => self
                .player(player)
                .hand
                .legal_plays(self.discard.top()),
            Phase::AwaitingDrawnPlay {
                player: current,
                card,
            } if current == player => BTreeSet::from([card]),
            _ => BTreeSet::new(),
        }
    }

    /// Final standings, once the round is over.
    pub fn report(&self) -> Option<RoundReport> {
        RoundReport::from_state(&self.current_state())
    }

    /// Oldest event not yet taken by the presentation layer.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn submit(&mut self, player: PlayerId, action: TurnAction) -> Result<MatchState> {
        match action {
            TurnAction::Play { card, color } => self.submit_play(player, card, color),
            TurnAction::Draw => self.submit_draw(player),
            TurnAction::Pass => self.submit_pass(player),
        }
    }

    /// Plays `card` from `player`'s hand. Wild family cards need `color`.
    pub fn submit_play(
        &mut self,
        player: PlayerId,
        card: Card,
        color: Option<CardColor>,
    ) -> Result<MatchState> {
        self.check_turn(player)?;
        let played = rules::check_play(
            &self.phase,
            &self.player(player).hand,
            self.discard.top(),
            card,
            color,
        )
        .map_err(|error| rejected(player, error))?;

        let seat = &mut self.players[player.index()];
        seat.remove_card(&card);
        let remaining = seat.cards_count();
        self.discard.push(played);
        debug!(player = %player, card = %played, remaining, "card played");

        self.apply(rules::resolve_play(player, played, self.direction, remaining));
        if let Some(winner) = self.phase.winner() {
            info!(winner = %winner, "round over");
        }

        Ok(self.current_state())
    }

    /// Draws the cards `player` owes, or a single card on a normal turn.
    pub fn submit_draw(&mut self, player: PlayerId) -> Result<MatchState> {
        self.check_turn(player)?;

        match self.phase {
            Phase::AwaitingDraw { count, .. } => {
                let available = self.available();
                if available == 0 {
                    return Err(rejected(player, UnoError::EmptyPile));
                }
                let count = usize::from(count).min(available);
                for _ in 0..count {
                    let card = self.draw_card()?;
                    self.players[player.index()].add_card(card);
                }
                debug!(player = %player, count, "penalty drawn");
                self.events.push_back(Event::Drew { player, count });
                self.phase = rules::end_turn(player, self.direction);
            }
            Phase::AwaitingPlay { .. } => {
                if self.available() == 0 {
                    return Err(rejected(player, UnoError::EmptyPile));
                }
                let card = self.draw_card()?;
                let hand = &mut self.players[player.index()].hand;
                hand.add(card);
                self.events.push_back(Event::Drew { player, count: 1 });

                let playable = hand.check_play(&card, self.discard.top()).is_ok();
                debug!(player = %player, card = %card, playable, "card drawn");
                self.phase = if playable {
                    Phase::AwaitingDrawnPlay { player, card }
                } else {
                    rules::end_turn(player, self.direction)
                };
            }
            Phase::AwaitingDrawnPlay { .. } => {
                return Err(rejected(player, IllegalMove::AlreadyDrew.into()));
            }
            Phase::RoundOver { .. } => {
                return Err(rejected(player, IllegalMove::RoundOver.into()));
            }
        }

        Ok(self.current_state())
    }

    /// Keeps a freshly drawn playable card and ends the turn. Also ends the
    /// turn of a player who can neither play nor draw.
    pub fn submit_pass(&mut self, player: PlayerId) -> Result<MatchState> {
        self.check_turn(player)?;

        if !self.may_pass(player) {
            return Err(rejected(player, IllegalMove::NothingToPass.into()));
        }
        self.events.push_back(Event::Passed { player });
        self.phase = rules::end_turn(player, self.direction);

        Ok(self.current_state())
    }

    /// Lets the built-in strategy take the AI's turn.
    pub fn ai_take_turn(&mut self) -> Result<MatchState> {
        self.ai_take_turn_with(&DisruptiveStrategy)
    }

    pub fn ai_take_turn_with(&mut self, strategy: &dyn Strategy) -> Result<MatchState> {
        self.check_turn(PlayerId::Ai)?;

        let action = ai::decide(
            strategy,
            &self.phase,
            &self.player(PlayerId::Ai).hand,
            self.discard.top(),
        )
        .ok_or(IllegalMove::RoundOver)?;
        let action = match action {
            TurnAction::Draw if self.may_pass(PlayerId::Ai) => TurnAction::Pass,
            action => action,
        };
        debug!(?action, "AI decided");

        self.submit(PlayerId::Ai, action)
    }

    fn may_pass(&self, player: PlayerId) -> bool {
        match self.phase {
            Phase::AwaitingDrawnPlay { .. } => true,
            Phase::AwaitingDraw { .. } => self.available() == 0,
            Phase::AwaitingPlay { .. } => self.available() == 0 && self.playable(player).is_empty(),
            Phase::RoundOver { .. } => false,
        }
    }

    fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    fn check_turn(&self, player: PlayerId) -> Result<()> {
        rules::check_turn(&self.phase, player).map_err(|error| rejected(player, error))
    }

    /// Cards that can still be drawn, counting the recyclable discards.
    fn available(&self) -> usize {
        self.deck.len() + self.discard.recyclable()
    }

    fn draw_card(&mut self) -> Result<Card> {
        let reshuffling = self.deck.is_empty();
        let recycled = self.discard.recyclable();
        let mut rng = reshuffle_rng(self.seed, self.reshuffles);

        let card = self.deck.draw_one(&mut self.discard, &mut rng)?;
        if reshuffling {
            self.reshuffles += 1;
            self.events.push_back(Event::Reshuffled { cards: recycled });
        }
        Ok(card)
    }

    fn apply(&mut self, transition: Transition) {
        let Transition {
            phase,
            direction,
            events,
        } = transition;
        self.phase = phase;
        self.direction = direction;
        self.events.extend(events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HAND_SIZE, TOTAL_CARDS_IN_DECK};

    #[test]
    fn all_players_start_with_7_cards() {
        let uno = MatchController::new_match(1).unwrap();
        for player in &uno.players {
            assert_eq!(player.cards_count(), HAND_SIZE);
        }
        assert_eq!(uno.deck.len(), TOTAL_CARDS_IN_DECK - 2 * HAND_SIZE - 1);
    }

    #[test]
    fn opening_card_is_always_a_number() {
        for seed in 0..50 {
            let uno = MatchController::new_match(seed).unwrap();
            assert!(uno.discard.top().rank().is_number(), "seed {seed}");
            assert_eq!(uno.current_state().total_cards(), TOTAL_CARDS_IN_DECK);
        }
    }

    #[test]
    fn first_player_is_configurable() {
        let config = MatchConfig {
            first_player: PlayerId::Ai,
            ..MatchConfig::new(5)
        };
        let uno = MatchController::with_config(config).unwrap();
        assert_eq!(uno.phase, Phase::AwaitingPlay { player: PlayerId::Ai });
        assert_eq!(uno.players[0].id, PlayerId::Human);
        assert_eq!(uno.players[1].id, PlayerId::Ai);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = MatchConfig {
            hand_size: 0,
            ..MatchConfig::new(5)
        };
        assert!(matches!(
            MatchController::with_config(config),
            Err(UnoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn reshuffle_rng_differs_per_reshuffle() {
        use rand::Rng;

        let first: u64 = reshuffle_rng(3, 0).gen();
        let again: u64 = reshuffle_rng(3, 0).gen();
        let second: u64 = reshuffle_rng(3, 1).gen();
        assert_eq!(first, again);
        assert_ne!(first, second);
    }

    #[test]
    fn started_event_comes_first() {
        let mut uno = MatchController::new_match(8).unwrap();
        assert!(matches!(
            uno.pop_event(),
            Some(Event::Started {
                player: PlayerId::Human,
                ..
            })
        ));
        assert_eq!(uno.pop_event(), None);
    }
}
