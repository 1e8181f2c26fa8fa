//! Core game types
//!
//! Guess validation and letter coloring. Nothing here touches I/O.

mod feedback;
mod word;

pub use feedback::{Answer, Feedback, LetterColor, WIN_MESSAGES, win_message};
pub use word::{WORD_LEN, Word, WordError};
