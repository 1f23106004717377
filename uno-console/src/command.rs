//! What the human can type at the table prompt.

use std::{path::PathBuf, str::FromStr};

use color_eyre::eyre::{bail, eyre, Report};
use uno_engine::card::CardColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play the card at a 1-based position in the displayed hand.
    Play {
        index: usize,
        color: Option<CardColor>,
    },
    Draw,
    Pass,
    Save(PathBuf),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  play <n> [color]   play card n from your hand, naming a color for wilds
  draw               draw a card (or the cards you owe)
  pass               keep a card you just drew, or end a turn with nothing to draw
  save <path>        write the match to a file
  help               show this list
  quit               leave the table";

pub fn parse_color(word: &str) -> Result<CardColor, Report> {
    match CardColor::from_str(word) {
        Ok(color) if color.is_concrete() => Ok(color),
        _ => Err(eyre!("{word:?} is not one of red, yellow, green or blue")),
    }
}

impl FromStr for Command {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("type a command, or `help` to list them");
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "play" | "p" => {
                let index = words
                    .next()
                    .ok_or_else(|| eyre!("which card? try `play 2`"))?
                    .parse::<usize>()
                    .map_err(|_| eyre!("card numbers start at 1"))?;
                if index == 0 {
                    bail!("card numbers start at 1");
                }
                let color = words.next().map(parse_color).transpose()?;
                Command::Play { index, color }
            }
            "draw" | "d" => Command::Draw,
            "pass" => Command::Pass,
            "save" => {
                let path = words.next().ok_or_else(|| eyre!("save where? try `save uno.json`"))?;
                Command::Save(PathBuf::from(path))
            }
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, type `help` to list them"),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected {extra:?} after `{verb}`");
        }
        Ok(command)
    }
}
