//! Console table: renders match snapshots and reads the human's commands.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use ansi_term::{ANSIString, ANSIStrings, Colour, Style};
use color_eyre::Result;
use itertools::Itertools;
use tracing::{debug, info};
use uno_engine::{
    card::{Card, CardColor, PlayedCard},
    config::MatchConfig,
    player::PlayerId,
    rules::Phase,
    score::{RoundReport, Scoreboard},
    state::{MatchState, SavedMatch},
    turn::{Event, TurnAction},
    MatchController,
};

use crate::args::Args;
use crate::command::{parse_color, Command, HELP};

const RULES: &str = "\
Match the top card of the discard pile by color or by rank, or play a wild.
Skip and Reverse both give you another turn against a single opponent.
Draw Two and Wild Draw Four make the next player draw before their turn.
Wild Draw Four may only be played when you hold nothing of the top color.
Can't or won't play? Draw one card; if it fits you may play it right away.
With nothing left to draw, a player who cannot play passes.
First to empty their hand wins the round and scores the cards left over.";

enum RoundEnd {
    Finished(RoundReport),
    /// The computer could not move.
    Abandoned(MatchState),
    Quit,
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    print!("{prompt}");
    stdout.flush()?;

    let mut buffer = String::new();
    if io::stdin().lock().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

fn paint(color: CardColor, text: String) -> ANSIString<'static> {
    match color {
        CardColor::Red => Colour::Red.paint(text),
        CardColor::Yellow => Colour::Yellow.paint(text),
        CardColor::Green => Colour::Green.paint(text),
        CardColor::Blue => Colour::Blue.paint(text),
        CardColor::Wild => Style::new().bold().paint(text),
    }
}

pub struct Console {
    color: bool,
    reveal: bool,
    seed: u64,
    dealt: u64,
    scores: Scoreboard,
}

impl Console {
    pub fn new(args: &Args) -> Self {
        Self {
            color: !args.no_color,
            reveal: args.reveal,
            seed: args.seed.unwrap_or_else(rand::random),
            dealt: 0,
            scores: Scoreboard::default(),
        }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_card(&self, card: Card) -> String {
        self.format(&ANSIStrings(&[paint(card.color(), card.to_string())]))
    }

    fn format_top(&self, top: &PlayedCard) -> String {
        self.format(&ANSIStrings(&[paint(top.color(), top.to_string())]))
    }

    fn format_cards(&self, cards: &[Card]) -> String {
        let mut parts: Vec<ANSIString> = vec![];
        for (i, card) in cards.iter().enumerate() {
            if i > 0 {
                parts.push(", ".into());
            }
            parts.push(paint(card.color(), format!("{}:{card}", i + 1)));
        }
        self.format(&ANSIStrings(&parts))
    }

    fn format_event(&self, event: &Event) -> String {
        match event {
            Event::Played { player, card } => format!("{player} played {}", self.format_top(card)),
            Event::Started { first, player } => format!(
                "{} starts the discard pile, {player} plays first",
                self.format_top(first)
            ),
            other => other.to_string(),
        }
    }

    /// The main menu. Returns when the human quits.
    pub fn run(&mut self, resume: Option<&Path>) -> Result<()> {
        println!("UNO");
        let mut pending = match resume {
            Some(path) => Some(Self::load(path)?),
            None => None,
        };

        loop {
            if pending.is_none() {
                let menu = if self.scores.rounds() == 0 {
                    "[s]tart, [r]ules or [q]uit? "
                } else {
                    "[s]tart a rematch, [r]ules or [q]uit? "
                };
                let Some(choice) = read_line(menu)? else {
                    return Ok(());
                };
                match choice.to_ascii_lowercase().as_str() {
                    "s" | "start" => {}
                    "r" | "rules" => {
                        println!("{RULES}");
                        continue;
                    }
                    "q" | "quit" => return Ok(()),
                    _ => continue,
                }
            }

            let mut uno = match pending.take() {
                Some(uno) => uno,
                None => self.deal()?,
            };
            match self.play_round(&mut uno)? {
                RoundEnd::Quit => return Ok(()),
                RoundEnd::Finished(report) => self.show_report(&report),
                RoundEnd::Abandoned(state) => self.show_abandoned(&state),
            }
        }
    }

    fn deal(&mut self) -> Result<MatchController> {
        let round = self.dealt;
        self.dealt += 1;
        let config = MatchConfig {
            first_player: if round % 2 == 0 {
                PlayerId::Human
            } else {
                PlayerId::Ai
            },
            ..MatchConfig::new(self.seed.wrapping_add(round))
        };
        info!(seed = config.seed, round, "dealing");
        Ok(MatchController::with_config(config)?)
    }

    fn load(path: &Path) -> Result<MatchController> {
        let json = fs::read_to_string(path)?;
        let uno = MatchController::resume(SavedMatch::from_json(&json)?)?;
        println!("Resumed the match saved in {}", path.display());
        Ok(uno)
    }

    fn save(&self, uno: &MatchController, path: &Path) -> Result<()> {
        fs::write(path, uno.save().to_json()?)?;
        println!("Saved to {}", path.display());
        Ok(())
    }

    fn show_events(&self, uno: &mut MatchController) {
        while let Some(event) = uno.pop_event() {
            println!("  {}", self.format_event(&event));
        }
    }

    fn show_table(&self, state: &MatchState, hand: &[Card]) {
        println!();
        println!(
            "Top: {}   Deck: {}   Discards: {}   Play goes {}",
            self.format_top(&state.discard_top),
            state.draw_pile_size,
            state.discard_size,
            state.direction,
        );
        if self.reveal {
            let ai_hand = state.ai_hand.iter().copied().sorted().collect_vec();
            println!("AI: {}", self.format_cards(&ai_hand));
        } else {
            println!("AI holds {} cards", state.ai_hand.len());
        }
        println!("You: {}", self.format_cards(hand));

        match state.phase {
            Phase::AwaitingDraw { count, .. } => println!("You must draw {count} cards."),
            Phase::AwaitingDrawnPlay { card, .. } => {
                println!("You drew {}. Play it or pass.", self.format_card(card))
            }
            _ => {}
        }
    }

    fn ask_color(&self) -> Result<Option<CardColor>> {
        loop {
            let Some(answer) = read_line("Color (red, yellow, green, blue)? ")? else {
                return Ok(None);
            };
            match parse_color(&answer) {
                Ok(color) => return Ok(Some(color)),
                Err(error) => println!("{error}"),
            }
        }
    }

    /// Reads commands until one is accepted, or the human leaves.
    fn human_turn(&self, uno: &mut MatchController, state: &MatchState) -> Result<bool> {
        let hand = state.human_hand.iter().copied().sorted().collect_vec();
        self.show_table(state, &hand);

        loop {
            let Some(line) = read_line("> ")? else {
                return Ok(false);
            };
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(error) => {
                    println!("{error}");
                    continue;
                }
            };

            let action = match command {
                Command::Play { index, color } => {
                    let Some(&card) = hand.get(index - 1) else {
                        println!("You only have {} cards", hand.len());
                        continue;
                    };
                    let color = match color {
                        None if card.is_wild() => match self.ask_color()? {
                            Some(color) => Some(color),
                            None => return Ok(false),
                        },
                        color => color,
                    };
                    TurnAction::Play { card, color }
                }
                Command::Draw => TurnAction::Draw,
                Command::Pass => TurnAction::Pass,
                Command::Save(path) => {
                    if let Err(error) = self.save(uno, &path) {
                        println!("Could not save: {error}");
                    }
                    continue;
                }
                Command::Help => {
                    println!("{HELP}");
                    continue;
                }
                Command::Quit => return Ok(false),
            };

            match uno.submit(PlayerId::Human, action) {
                Ok(_) => return Ok(true),
                Err(error) => println!("{error}"),
            }
        }
    }

    fn play_round(&mut self, uno: &mut MatchController) -> Result<RoundEnd> {
        loop {
            self.show_events(uno);
            if let Some(report) = uno.report() {
                return Ok(RoundEnd::Finished(report));
            }

            let state = uno.current_state();
            match state.current_player {
                PlayerId::Ai => match uno.ai_take_turn() {
                    Ok(state) => debug!(phase = ?state.phase, "AI moved"),
                    Err(error) => {
                        println!("The computer cannot move: {error}");
                        return Ok(RoundEnd::Abandoned(uno.current_state()));
                    }
                },
                PlayerId::Human => {
                    if !self.human_turn(uno, &state)? {
                        return Ok(RoundEnd::Quit);
                    }
                }
            }
        }
    }

    fn show_abandoned(&self, state: &MatchState) {
        println!("The round is void.");
        for player in PlayerId::ALL {
            let hand = state.hand(player).iter().copied().sorted().collect_vec();
            println!("{player} holds: {}", self.format_cards(&hand));
        }
    }

    fn show_report(&mut self, report: &RoundReport) {
        self.scores.record(report);

        println!();
        match report.winner {
            PlayerId::Human => println!("You win! +{} points", report.points),
            PlayerId::Ai => println!("The computer wins. +{} points for the AI", report.points),
        }
        let loser_hand = report.loser_hand.iter().copied().sorted().collect_vec();
        println!("{} was left holding: {}", report.loser, self.format_cards(&loser_hand));
        println!(
            "Score after {} rounds: you {}, AI {}",
            self.scores.rounds(),
            self.scores.total(PlayerId::Human),
            self.scores.total(PlayerId::Ai),
        );
    }
}
