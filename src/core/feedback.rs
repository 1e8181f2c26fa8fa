//! Guess coloring
//!
//! Each letter of a guess is colored against the answer:
//! - `G` Correct: letter is in that position in the word
//! - `Y` Present: letter is in the word, but not that position
//! - `X` Incorrect: there are no more instances of the letter in the word

use super::word::{WORD_LEN, Word};
use std::fmt;

/// Message printed after a win, indexed by number of guesses minus one
pub const WIN_MESSAGES: [&str; 6] = [
    "Genius",
    "Magnificent",
    "Impressive",
    "Splendid",
    "Great",
    "Phew",
];

/// Win message for a game won in `guesses` turns
#[must_use]
pub fn win_message(guesses: usize) -> Option<&'static str> {
    guesses.checked_sub(1).and_then(|i| WIN_MESSAGES.get(i)).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterColor {
    Correct,
    Present,
    Incorrect,
}

impl LetterColor {
    /// Single-letter code shown to the player
    #[inline]
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Incorrect => 'X',
        }
    }
}

/// Colors for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback([LetterColor; WORD_LEN]);

impl Feedback {
    #[inline]
    #[must_use]
    pub const fn colors(&self) -> &[LetterColor; WORD_LEN] {
        &self.0
    }

    /// All five letters correct
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.0.iter().all(|&c| c == LetterColor::Correct)
    }

    /// Color codes, e.g. `"XXGXG"`
    #[must_use]
    pub fn code(&self) -> String {
        self.0.iter().map(|c| c.code()).collect()
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// The word being guessed, with its letter counts precomputed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    word: Word,
    letter_counts: [u8; 26],
}

impl Answer {
    #[must_use]
    pub fn new(word: Word) -> Self {
        let letter_counts = word.letter_counts();
        Self { word, letter_counts }
    }

    #[inline]
    #[must_use]
    pub const fn word(&self) -> &Word {
        &self.word
    }

    /// Color `guess` against this answer
    ///
    /// Greens are assigned first and use up their letter, so a repeated
    /// guess letter is only yellow while unmatched copies remain.
    ///
    /// # Examples
    /// ```
    /// use wordle_stats::core::{Answer, Word};
    ///
    /// let answer = Answer::new(Word::new("slate").unwrap());
    /// let feedback = answer.check_guess(&Word::new("crane").unwrap());
    /// assert_eq!(feedback.code(), "XXGXG");
    /// ```
    #[must_use]
    pub fn check_guess(&self, guess: &Word) -> Feedback {
        let mut colors = [LetterColor::Incorrect; WORD_LEN];
        let mut remaining = self.letter_counts;
        let target = self.word.chars();

        for (i, &letter) in guess.chars().iter().enumerate() {
            if letter == target[i] {
                remaining[usize::from(letter - b'A')] -= 1;
                colors[i] = LetterColor::Correct;
            }
        }

        for (i, &letter) in guess.chars().iter().enumerate() {
            let count = &mut remaining[usize::from(letter - b'A')];
            if colors[i] == LetterColor::Incorrect && *count > 0 {
                colors[i] = LetterColor::Present;
                *count -= 1;
            }
        }

        Feedback(colors)
    }
}
