//! Printing for the console game
//!
//! Everything writes to a caller-supplied writer so the console flows can be
//! driven from tests.

use super::formatters::{error_text, feedback_code, stats_text};
use crate::core::{Feedback, Word, win_message};
use crate::players::PlayerInfo;
use colored::Colorize;
use std::io::{self, Write};

/// Explain the color codes before the first guess
pub fn print_rules<W: Write + ?Sized>(out: &mut W, max_guesses: usize) -> io::Result<()> {
    writeln!(out, "Guess the 5-letter word in {max_guesses} or fewer guesses.")?;
    writeln!(out, "After each guess, each letter will be given a color:")?;
    writeln!(out, "G = Green:\tletter is in that position in the word")?;
    writeln!(out, "Y = Yellow:\tletter is in the word, but not that position")?;
    writeln!(out, "X = Black:\tthere are no more instances of the letter in the word")?;
    writeln!(out)
}

pub fn print_feedback<W: Write + ?Sized>(
    out: &mut W,
    feedback: &Feedback,
    color: bool,
) -> io::Result<()> {
    writeln!(out, "    {}", feedback_code(feedback, color))
}

pub fn print_error<W: Write + ?Sized>(out: &mut W, message: &str, color: bool) -> io::Result<()> {
    writeln!(out, "{}", error_text(message, color))
}

/// Announce the end of a game
///
/// `won_in` is the number of guesses taken, or `None` for a loss.
pub fn print_game_result<W: Write + ?Sized>(
    out: &mut W,
    won_in: Option<usize>,
    answer: &Word,
    color: bool,
) -> io::Result<()> {
    let headline = match won_in.and_then(win_message) {
        Some(message) => format!("{message}!"),
        None => "Too bad!".to_string(),
    };
    if color {
        let headline = if won_in.is_some() {
            headline.green().bold()
        } else {
            headline.red().bold()
        };
        writeln!(out, "{headline} The word was: {}", answer.text().bold())?;
    } else {
        writeln!(out, "{headline} The word was: {answer}")?;
    }
    writeln!(out)
}

pub fn print_stats<W: Write + ?Sized>(
    out: &mut W,
    player: &PlayerInfo,
    color: bool,
) -> io::Result<()> {
    writeln!(out, "{}", stats_text(&player.stats(), color))
}
