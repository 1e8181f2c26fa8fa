//! Runtime configuration
//!
//! Built by the binary from its command line; the console app reads it for
//! file locations, the guess limit and output styling.

use crate::error::ConfigError;
use crate::players::MAX_NUM_GUESSES;
use std::path::PathBuf;

/// Default name of the username list inside the data directory
pub const USERNAMES_FILENAME: &str = "users.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Dictionary of valid five-letter words
    pub dictionary: PathBuf,
    /// Directory holding the player records
    pub data_dir: PathBuf,
    /// Username list; `<data_dir>/users.txt` when not set explicitly
    pub usernames_file: PathBuf,
    /// Guesses allowed per game
    pub max_guesses: usize,
    /// Seed for answer selection; random when `None`
    pub seed: Option<u64>,
    /// Whether to color terminal output
    pub color: bool,
}

impl AppConfig {
    /// Defaults for a dictionary, storing data in the working directory
    #[must_use]
    pub fn new(dictionary: impl Into<PathBuf>) -> Self {
        let data_dir = PathBuf::from(".");
        Self {
            dictionary: dictionary.into(),
            usernames_file: data_dir.join(USERNAMES_FILENAME),
            data_dir,
            max_guesses: MAX_NUM_GUESSES,
            seed: None,
            color: true,
        }
    }

    /// Where the record for `username` is stored
    #[must_use]
    pub fn player_file(&self, username: &str) -> PathBuf {
        self.data_dir.join(format!("{username}.txt"))
    }

    /// Check the settings before starting
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] for an empty dictionary path or a
    /// guess limit outside `1..=6`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dictionary.as_os_str().is_empty() {
            return Err(ConfigError::Validation("no dictionary file specified".to_string()));
        }
        if !(1..=MAX_NUM_GUESSES).contains(&self.max_guesses) {
            return Err(ConfigError::Validation(format!(
                "max guesses must be between 1 and {MAX_NUM_GUESSES}, got {}",
                self.max_guesses
            )));
        }
        Ok(())
    }
}
