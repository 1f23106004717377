use crate::card::CardColor;

pub const NUMBER_CARDS_PER_COLOR: &[u8] =
    &[0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9];
pub const SKIP_CARDS_PER_COLOR: usize = 2;
pub const REVERSE_CARDS_PER_COLOR: usize = 2;
pub const DRAW_TWO_CARDS_PER_COLOR: usize = 2;

pub const NUMBER_CARDS_IN_DECK: usize = NUMBER_CARDS_PER_COLOR.len() * CardColor::CONCRETE.len();
pub const SKIP_CARDS_IN_DECK: usize = SKIP_CARDS_PER_COLOR * CardColor::CONCRETE.len();
pub const REVERSE_CARDS_IN_DECK: usize = REVERSE_CARDS_PER_COLOR * CardColor::CONCRETE.len();
pub const DRAW_TWO_CARDS_IN_DECK: usize = DRAW_TWO_CARDS_PER_COLOR * CardColor::CONCRETE.len();

pub const WILD_CARDS_IN_DECK: usize = 4;
pub const WILD_DRAW_FOUR_CARDS_IN_DECK: usize = 4;

pub const TOTAL_CARDS_IN_DECK: usize = NUMBER_CARDS_IN_DECK
    + SKIP_CARDS_IN_DECK
    + REVERSE_CARDS_IN_DECK
    + DRAW_TWO_CARDS_IN_DECK
    + WILD_CARDS_IN_DECK
    + WILD_DRAW_FOUR_CARDS_IN_DECK;

pub const HAND_SIZE: usize = 7;
pub const PLAYER_COUNT: usize = 2;

pub const DRAW_TWO_PENALTY: u8 = 2;
pub const WILD_DRAW_FOUR_PENALTY: u8 = 4;

pub const ACTION_CARD_POINTS: u32 = 20;
pub const WILD_CARD_POINTS: u32 = 50;
