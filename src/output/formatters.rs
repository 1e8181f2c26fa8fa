//! Formatting utilities for terminal output

use crate::core::{Feedback, LetterColor};
use colored::Colorize;

/// Bar of `=` for a distribution row, `width` long at `max`
#[must_use]
pub fn distribution_bar(count: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (f64::from(count) * width as f64 / f64::from(max)).round() as usize;
    "=".repeat(filled.min(width))
}

/// Color codes for a guess, e.g. `XXGXG`
#[must_use]
pub fn feedback_code(feedback: &Feedback, color: bool) -> String {
    if !color {
        return feedback.code();
    }
    feedback
        .colors()
        .iter()
        .map(|&c| {
            let code = c.code().to_string();
            match c {
                LetterColor::Correct => code.black().on_green().to_string(),
                LetterColor::Present => code.black().on_yellow().to_string(),
                LetterColor::Incorrect => code.bright_black().to_string(),
            }
        })
        .collect()
}

/// `Error: <message>`, red when colored
#[must_use]
pub fn error_text(message: &str, color: bool) -> String {
    let text = format!("Error: {message}");
    if color { text.red().to_string() } else { text }
}

/// Color the bars of a stats summary
#[must_use]
pub fn stats_text(stats: &str, color: bool) -> String {
    if !color {
        return stats.to_string();
    }
    stats
        .lines()
        .map(|line| match line.split_once(": ") {
            Some((row, rest)) if rest.starts_with('=') => {
                let (bar, count) = rest.split_at(rest.find(' ').unwrap_or(rest.len()));
                format!("{row}: {}{count}", bar.green())
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Answer, Word};

    fn feedback(guess: &str, answer: &str) -> Feedback {
        Answer::new(Word::new(answer).unwrap()).check_guess(&Word::new(guess).unwrap())
    }

    #[test]
    fn bar_empty_when_nothing_played() {
        assert_eq!(distribution_bar(0, 0, 12), "");
        assert_eq!(distribution_bar(0, 5, 12), "");
    }

    #[test]
    fn bar_full_at_max() {
        assert_eq!(distribution_bar(7, 7, 12), "============");
    }

    #[test]
    fn bar_rounds_to_nearest() {
        // 12 * 1 / 8 = 1.5
        assert_eq!(distribution_bar(1, 8, 12), "==");
        assert_eq!(distribution_bar(1, 3, 12), "====");
    }

    #[test]
    fn plain_feedback_code() {
        assert_eq!(feedback_code(&feedback("crane", "slate"), false), "XXGXG");
    }

    #[test]
    fn colored_feedback_keeps_letters() {
        let text = feedback_code(&feedback("crane", "slate"), true);
        let letters: String = text.chars().filter(|c| matches!(c, 'G' | 'Y' | 'X')).collect();
        assert_eq!(letters, "XXGXG");
    }

    #[test]
    fn plain_error_text() {
        assert_eq!(error_text("invalid selection", false), "Error: invalid selection");
    }

    #[test]
    fn plain_stats_unchanged() {
        let stats = "Win Rate: 50%\n1: == 1";
        assert_eq!(stats_text(stats, false), stats);
    }

    #[test]
    fn colored_stats_keep_counts() {
        let text = stats_text("Guess Distribution:\n1:  0\n2: ==== 4", true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Guess Distribution:");
        assert_eq!(lines[1], "1:  0");
        assert!(lines[2].starts_with("2: "));
        assert!(lines[2].ends_with(" 4"));
    }
}
