//! Turn-resolution rules.
//!
//! Everything here is pure: functions take the relevant parts of a match and
//! return what should happen next. [`crate::controller::MatchController`]
//! applies the result.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::card::{Card, CardColor, PlayedCard, Rank};
use crate::constants::{DRAW_TWO_PENALTY, PLAYER_COUNT, WILD_DRAW_FOUR_PENALTY};
use crate::error::{IllegalMove, Result, UnoError};
use crate::hand::Hand;
use crate::player::PlayerId;
use crate::turn::Event;

/// Seats a Reverse advances after flipping the direction. With two players
/// the official rule makes Reverse act like Skip, handing the turn straight
/// back to whoever played it.
const REVERSE_STEPS: usize = if PLAYER_COUNT == 2 { 2 } else { 1 };

#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[strum(serialize = "clockwise")]
    Clockwise,
    #[strum(serialize = "counter-clockwise")]
    CounterClockwise,
}

impl Direction {
    /// `1` or `-1`.
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Where a round stands, and who has to act.
///
/// Choosing a color for a wild card is part of the play itself, so there is
/// no separate phase for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingPlay { player: PlayerId },
    /// `player` drew `card` and it is playable; they may play it or pass.
    AwaitingDrawnPlay { player: PlayerId, card: Card },
    /// `player` owes `count` cards from a DrawTwo or Wild Draw Four.
    AwaitingDraw { player: PlayerId, count: u8 },
    RoundOver { winner: PlayerId },
}

impl Phase {
    /// The player expected to act, or the winner once the round is over.
    pub fn player(&self) -> PlayerId {
        match *self {
            Phase::AwaitingPlay { player }
            | Phase::AwaitingDrawnPlay { player, .. }
            | Phase::AwaitingDraw { player, .. } => player,
            Phase::RoundOver { winner } => winner,
        }
    }

    pub fn pending_draw(&self) -> u8 {
        match *self {
            Phase::AwaitingDraw { count, .. } => count,
            _ => 0,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match *self {
            Phase::RoundOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Phase::RoundOver { .. })
    }
}

/// The seat `steps` places after `player` in `direction`.
pub fn seat_after(player: PlayerId, direction: Direction, steps: usize) -> PlayerId {
    let offset = direction.step() * steps as isize;
    let index = (player.index() as isize + offset).rem_euclid(PLAYER_COUNT as isize);
    PlayerId::from_index(index as usize)
}

/// Rejects commands from anyone but the player the phase is waiting on.
pub fn check_turn(phase: &Phase, player: PlayerId) -> Result<()> {
    if phase.is_over() {
        return Err(IllegalMove::RoundOver.into());
    }
    if phase.player() != player {
        return Err(UnoError::NotYourTurn(player));
    }
    Ok(())
}

/// Validates playing `card` from `hand` onto `top` in the current phase and
/// attaches the chosen color. The caller must have checked the turn.
pub fn check_play(
    phase: &Phase,
    hand: &Hand,
    top: &PlayedCard,
    card: Card,
    color: Option<CardColor>,
) -> Result<PlayedCard> {
    match *phase {
        Phase::RoundOver { .. } => return Err(IllegalMove::RoundOver.into()),
        Phase::AwaitingDraw { count, .. } => return Err(IllegalMove::MustDraw(count).into()),
        Phase::AwaitingDrawnPlay { card: drawn, .. } if drawn != card => {
            return Err(IllegalMove::OnlyDrawnCard(drawn).into())
        }
        Phase::AwaitingDrawnPlay { .. } | Phase::AwaitingPlay { .. } => {}
    }

    hand.check_play(&card, top)?;
    Ok(PlayedCard::new(card, color)?)
}

/// The outcome of a resolved command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub phase: Phase,
    pub direction: Direction,
    pub events: Vec<Event>,
}

/// Resolves `player` having discarded `played`, leaving `remaining` cards
/// in their hand.
pub fn resolve_play(
    player: PlayerId,
    played: PlayedCard,
    direction: Direction,
    remaining: usize,
) -> Transition {
    let mut events = vec![Event::Played {
        player,
        card: played,
    }];

    if remaining == 0 {
        events.push(Event::RoundWon { player });
        return Transition {
            phase: Phase::RoundOver { winner: player },
            direction,
            events,
        };
    }

    let next = seat_after(player, direction, 1);
    let (phase, direction) = match played.rank() {
        Rank::Number(_) | Rank::Wild => (Phase::AwaitingPlay { player: next }, direction),
        Rank::Skip => {
            events.push(Event::Skipped { player: next });
            let player = seat_after(player, direction, 2);
            (Phase::AwaitingPlay { player }, direction)
        }
        // Two-player rule: see `REVERSE_STEPS`.
        Rank::Reverse => {
            let direction = direction.reversed();
            events.push(Event::Reversed { direction });
            let player = seat_after(player, direction, REVERSE_STEPS);
            (Phase::AwaitingPlay { player }, direction)
        }
        Rank::DrawTwo => {
            events.push(Event::MustDraw {
                player: next,
                count: DRAW_TWO_PENALTY,
            });
            let phase = Phase::AwaitingDraw {
                player: next,
                count: DRAW_TWO_PENALTY,
            };
            (phase, direction)
        }
        Rank::WildDrawFour => {
            events.push(Event::MustDraw {
                player: next,
                count: WILD_DRAW_FOUR_PENALTY,
            });
            let phase = Phase::AwaitingDraw {
                player: next,
                count: WILD_DRAW_FOUR_PENALTY,
            };
            (phase, direction)
        }
    };

    Transition {
        phase,
        direction,
        events,
    }
}

/// The phase after `player` has finished drawing, either a penalty or a
/// voluntary draw they cannot or will not play.
pub fn end_turn(player: PlayerId, direction: Direction) -> Phase {
    Phase::AwaitingPlay {
        player: seat_after(player, direction, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(key: &str) -> PlayedCard {
        PlayedCard::new(key.parse().unwrap(), None).unwrap()
    }

    #[test]
    fn seat_after_wraps_both_ways() {
        use PlayerId::*;

        assert_eq!(seat_after(Human, Direction::Clockwise, 1), Ai);
        assert_eq!(seat_after(Ai, Direction::Clockwise, 1), Human);
        assert_eq!(seat_after(Human, Direction::CounterClockwise, 1), Ai);
        assert_eq!(seat_after(Human, Direction::Clockwise, 2), Human);
        assert_eq!(seat_after(Ai, Direction::CounterClockwise, 2), Ai);
    }

    #[test]
    fn number_card_passes_turn() {
        let transition = resolve_play(PlayerId::Human, played("red_4"), Direction::Clockwise, 3);
        assert_eq!(
            transition.phase,
            Phase::AwaitingPlay {
                player: PlayerId::Ai
            }
        );
        assert_eq!(transition.direction, Direction::Clockwise);
    }

    #[test]
    fn skip_and_reverse_agree_with_two_players() {
        for direction in [Direction::Clockwise, Direction::CounterClockwise] {
            let skip = resolve_play(PlayerId::Ai, played("blue_skip"), direction, 4);
            let reverse = resolve_play(PlayerId::Ai, played("blue_rev"), direction, 4);

            assert_eq!(skip.phase, reverse.phase);
            assert_eq!(skip.phase.player(), PlayerId::Ai);
            assert_eq!(reverse.direction, direction.reversed());
            assert_eq!(skip.direction, direction);
        }
    }

    #[test]
    fn draw_cards_put_next_player_on_the_hook() {
        let draw_two = resolve_play(PlayerId::Human, played("green_+2"), Direction::Clockwise, 2);
        assert_eq!(
            draw_two.phase,
            Phase::AwaitingDraw {
                player: PlayerId::Ai,
                count: 2
            }
        );

        let wild = PlayedCard::new(Card::wild_draw_four(), Some(CardColor::Green)).unwrap();
        let draw_four = resolve_play(PlayerId::Ai, wild, Direction::CounterClockwise, 2);
        assert_eq!(
            draw_four.phase,
            Phase::AwaitingDraw {
                player: PlayerId::Human,
                count: 4
            }
        );
        assert_eq!(draw_four.phase.pending_draw(), 4);
    }

    #[test]
    fn last_card_ends_the_round_before_effects() {
        let transition = resolve_play(PlayerId::Human, played("red_+2"), Direction::Clockwise, 0);
        assert_eq!(
            transition.phase,
            Phase::RoundOver {
                winner: PlayerId::Human
            }
        );
        assert_eq!(
            transition.events.last(),
            Some(&Event::RoundWon {
                player: PlayerId::Human
            })
        );
        assert!(!transition
            .events
            .iter()
            .any(|event| matches!(event, Event::MustDraw { .. })));
    }

    #[test]
    fn check_turn_rejects_other_player() {
        let phase = Phase::AwaitingPlay {
            player: PlayerId::Human,
        };
        assert!(check_turn(&phase, PlayerId::Human).is_ok());
        assert!(matches!(
            check_turn(&phase, PlayerId::Ai),
            Err(UnoError::NotYourTurn(PlayerId::Ai))
        ));

        let over = Phase::RoundOver {
            winner: PlayerId::Ai,
        };
        assert!(matches!(
            check_turn(&over, PlayerId::Ai),
            Err(UnoError::IllegalMove(IllegalMove::RoundOver))
        ));
    }

    #[test]
    fn check_play_honors_phase() {
        let hand = Hand::from(vec!["red_5".parse().unwrap(), "red_6".parse().unwrap()]);
        let top = played("red_1");

        let owing = Phase::AwaitingDraw {
            player: PlayerId::Human,
            count: 2,
        };
        assert!(matches!(
            check_play(&owing, &hand, &top, "red_5".parse().unwrap(), None),
            Err(UnoError::IllegalMove(IllegalMove::MustDraw(2)))
        ));

        let drew = Phase::AwaitingDrawnPlay {
            player: PlayerId::Human,
            card: "red_6".parse().unwrap(),
        };
        assert!(matches!(
            check_play(&drew, &hand, &top, "red_5".parse().unwrap(), None),
            Err(UnoError::IllegalMove(IllegalMove::OnlyDrawnCard(_)))
        ));
        assert!(check_play(&drew, &hand, &top, "red_6".parse().unwrap(), None).is_ok());
    }

    #[test]
    fn check_play_validates_color_after_legality() {
        let hand = Hand::from(vec![Card::wild(), "blue_2".parse().unwrap()]);
        let top = played("red_1");
        let phase = Phase::AwaitingPlay {
            player: PlayerId::Ai,
        };

        assert!(matches!(
            check_play(&phase, &hand, &top, Card::wild(), None),
            Err(UnoError::InvalidColorChoice(_))
        ));
        assert!(matches!(
            check_play(&phase, &hand, &top, "blue_2".parse().unwrap(), Some(CardColor::Red)),
            Err(UnoError::IllegalMove(IllegalMove::NotPlayable { .. }))
        ));

        let played = check_play(&phase, &hand, &top, Card::wild(), Some(CardColor::Blue)).unwrap();
        assert_eq!(played.color(), CardColor::Blue);
    }
}
