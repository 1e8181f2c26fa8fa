//! Five-letter word representation
//!
//! Words are stored uppercased, the same way dictionary entries are.

use crate::collections::DynamicString;
use std::fmt;

/// Number of letters in every guess and answer
pub const WORD_LEN: usize = 5;

/// A validated, uppercased five-letter word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    chars: [u8; WORD_LEN],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("Word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),

    #[error("Word must contain only ASCII letters")]
    NonAscii,

    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from user or file input
    ///
    /// Surrounding whitespace is ignored and letters are uppercased.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_stats::core::Word;
    ///
    /// let word = Word::new(" crane\n").unwrap();
    /// assert_eq!(word.text(), "CRANE");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        let text = text.trim().to_ascii_uppercase();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let chars: [u8; WORD_LEN] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(text.len()))?;

        if !chars.iter().all(u8::is_ascii_uppercase) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text, chars })
    }

    /// Validate a word held in a `DynamicString`
    ///
    /// # Errors
    /// Same conditions as [`Word::new`].
    pub fn from_dynamic(text: &DynamicString) -> Result<Self, WordError> {
        Self::new(&text.to_str_lossy())
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LEN] {
        &self.chars
    }

    /// Occurrences of each letter, indexed `A` = 0 through `Z` = 25
    #[must_use]
    pub fn letter_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &ch in &self.chars {
            counts[usize::from(ch - b'A')] += 1;
        }
        counts
    }

    /// Copy into a `DynamicString` for storage in the collections
    #[must_use]
    pub fn to_dynamic(&self) -> DynamicString {
        DynamicString::from(self.text.as_str())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
