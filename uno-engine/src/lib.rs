//! Turn resolution for a two-player game of UNO against the computer.
//!
//! [`controller::MatchController`] owns a match and is the only way to change
//! it. Each command it accepts returns a fresh [`state::MatchState`] and
//! queues [`turn::Event`]s describing what happened.

pub mod ai;
pub mod card;
pub mod config;
pub mod constants;
pub mod controller;
pub mod deck;
pub mod discard;
pub mod error;
pub mod hand;
pub mod player;
pub mod rules;
pub mod score;
pub mod state;
pub mod turn;

pub use controller::MatchController;
pub use error::{Result, UnoError};
