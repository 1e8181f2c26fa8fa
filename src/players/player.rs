//! Per-player statistics and their on-disk record

use super::database::{DatabaseEntry, parse_token};
use crate::collections::{DynamicArray, DynamicString, HashSet};
use crate::error::{DatabaseError, PlayerError};
use crate::output::formatters::distribution_bar;
use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Number of guesses a game allows, and the length of the guess distribution
pub const MAX_NUM_GUESSES: usize = 6;

/// Width of the longest bar in the guess distribution
const BAR_WIDTH: usize = 12;

const USERNAME: &str = "Username";
const WORDS_PLAYED: &str = "Words Played";
const NUM_GUESSES: &str = "Number of Guesses";
const MAX_WIN_STREAK: &str = "Maximum Win Streak";
const CUR_WIN_STREAK: &str = "Current Win Streak";

/// A player's history: words played, guess distribution and win streaks
#[derive(Debug, Clone)]
pub struct PlayerInfo {
    username: DynamicString,
    words_played: HashSet<DynamicString>,
    num_guesses: [u32; MAX_NUM_GUESSES],
    max_win_streak: u32,
    cur_win_streak: u32,
}

impl PlayerInfo {
    /// A player with no games played
    #[must_use]
    pub fn new(username: DynamicString) -> Self {
        Self::load(username, HashSet::new(), [0; MAX_NUM_GUESSES], 0, 0)
    }

    #[must_use]
    pub const fn load(
        username: DynamicString,
        words_played: HashSet<DynamicString>,
        num_guesses: [u32; MAX_NUM_GUESSES],
        max_win_streak: u32,
        cur_win_streak: u32,
    ) -> Self {
        Self {
            username,
            words_played,
            num_guesses,
            max_win_streak,
            cur_win_streak,
        }
    }

    #[inline]
    #[must_use]
    pub const fn username(&self) -> &DynamicString {
        &self.username
    }

    #[inline]
    #[must_use]
    pub const fn words_played(&self) -> &HashSet<DynamicString> {
        &self.words_played
    }

    #[inline]
    #[must_use]
    pub const fn num_guesses(&self) -> &[u32; MAX_NUM_GUESSES] {
        &self.num_guesses
    }

    #[inline]
    #[must_use]
    pub const fn max_win_streak(&self) -> u32 {
        self.max_win_streak
    }

    #[inline]
    #[must_use]
    pub const fn cur_win_streak(&self) -> u32 {
        self.cur_win_streak
    }

    /// Pick a dictionary word this player has not played yet
    ///
    /// Every unplayed word is equally likely. Returns `None` once the
    /// player has played the whole dictionary.
    pub fn random_word<'a, R: Rng + ?Sized>(
        &self,
        dictionary: &'a HashSet<DynamicString>,
        rng: &mut R,
    ) -> Option<&'a DynamicString> {
        let unplayed: DynamicArray<usize> = dictionary
            .iter()
            .enumerate()
            .filter(|(_, word)| !self.words_played.contains(word))
            .map(|(position, _)| position)
            .collect();
        if unplayed.is_empty() {
            return None;
        }

        let pick = rng.random_range(0..unplayed.len());
        let position = *unplayed.get(pick)?;
        dictionary.nth(position)
    }

    /// Record a word guessed correctly in `guesses` turns
    ///
    /// Extends the current win streak and the maximum with it.
    pub fn add_won_word(&mut self, word: DynamicString, guesses: usize) {
        self.record_word(word);
        match self.num_guesses.get_mut(guesses.wrapping_sub(1)) {
            Some(count) => *count += 1,
            None => tracing::warn!(guesses, "guess count outside the distribution"),
        }
        self.cur_win_streak += 1;
        self.max_win_streak = self.max_win_streak.max(self.cur_win_streak);
    }

    /// Record a word the player failed to guess, ending the win streak
    pub fn add_lost_word(&mut self, word: DynamicString) {
        self.record_word(word);
        self.cur_win_streak = 0;
    }

    fn record_word(&mut self, word: DynamicString) {
        if !self.words_played.contains(&word) {
            self.words_played.insert(word);
        }
    }

    /// Games won as a rounded percentage of games played
    #[must_use]
    pub fn win_rate(&self) -> u32 {
        let played = self.words_played.len();
        if played == 0 {
            return 0;
        }
        let wins: u32 = self.num_guesses.iter().sum();
        (100.0 * f64::from(wins) / played as f64).round() as u32
    }

    /// Multi-line statistics summary with a guess distribution chart
    ///
    /// ```text
    /// Number of Words Played: 3
    /// Win Rate: 67%
    /// Current Win Streak: 0
    /// Maximum Win Streak: 2
    /// Guess Distribution:
    /// 1:  0
    /// 2:  0
    /// 3: ============ 2
    /// ...
    /// ```
    #[must_use]
    pub fn stats(&self) -> String {
        let mut lines = vec![
            format!("Number of Words Played: {}", self.words_played.len()),
            format!("Win Rate: {}%", self.win_rate()),
            format!("{CUR_WIN_STREAK}: {}", self.cur_win_streak),
            format!("{MAX_WIN_STREAK}: {}", self.max_win_streak),
            "Guess Distribution:".to_string(),
        ];

        let max = self.num_guesses.iter().copied().max().unwrap_or(0);
        for (i, &count) in self.num_guesses.iter().enumerate() {
            let bar = distribution_bar(count, max, BAR_WIDTH);
            lines.push(format!("{}: {bar} {count}", i + 1));
        }

        lines.join("\n")
    }

    /// Parse a player record
    ///
    /// The record is the five lines written by [`write_to`](Self::write_to),
    /// in order. Extra guess counts are ignored and missing ones are zero.
    ///
    /// # Errors
    /// - [`PlayerError::Read`] if the stream ends early or fails
    /// - [`PlayerError::Database`] if a line is malformed or out of order
    pub fn read_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<Self, PlayerError> {
        let mut line = DynamicString::with_capacity(64);

        let username = read_field(reader, &mut line, USERNAME, |entry| {
            Ok(DynamicString::from(entry.value()))
        })?;

        let words_played = read_field(reader, &mut line, WORDS_PLAYED, |entry| {
            let mut words = HashSet::new();
            entry.parse_list(
                |token| Ok(DynamicString::from(token)),
                |word| {
                    if !words.contains(&word) {
                        words.insert(word);
                    }
                },
            )?;
            Ok(words)
        })?;

        let staged = read_field(reader, &mut line, NUM_GUESSES, |entry| {
            let mut staged = DynamicArray::with_capacity(MAX_NUM_GUESSES);
            entry.parse_list(|token| parse_token::<u32>(entry.name(), token), |n| staged.push(n))?;
            Ok(staged)
        })?;
        let mut num_guesses = [0; MAX_NUM_GUESSES];
        for (slot, &count) in num_guesses.iter_mut().zip(staged.iter()) {
            *slot = count;
        }

        let max_win_streak =
            read_field(reader, &mut line, MAX_WIN_STREAK, |entry| entry.parse_value())?;
        let cur_win_streak =
            read_field(reader, &mut line, CUR_WIN_STREAK, |entry| entry.parse_value())?;

        Ok(Self::load(
            username,
            words_played,
            num_guesses,
            max_win_streak,
            cur_win_streak,
        ))
    }

    /// Write the player record
    ///
    /// # Errors
    /// Returns any error from `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }

    /// Load the record at `path`
    ///
    /// Returns `Ok(None)` if the file does not exist, which means the player
    /// is new.
    ///
    /// # Errors
    /// - [`PlayerError::Open`] if the file exists but cannot be opened
    /// - any error from [`read_from`](Self::read_from)
    pub fn from_file(path: &Path) -> Result<Option<Self>, PlayerError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no player record");
                return Ok(None);
            }
            Err(source) => {
                return Err(PlayerError::Open {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let player = Self::read_from(&mut BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            username = %player.username,
            words_played = player.words_played.len(),
            "loaded player record"
        );
        Ok(Some(player))
    }

    /// Save the record to `path`, replacing any previous contents
    ///
    /// # Errors
    /// Returns [`PlayerError::Write`] if the file cannot be created or written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), PlayerError> {
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(path)?);
            self.write_to(&mut writer)?;
            writer.flush()
        };
        write().map_err(|source| PlayerError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), username = %self.username, "saved player record");
        Ok(())
    }
}

/// Read the next line and parse it as field `name`
fn read_field<R: BufRead + ?Sized, T>(
    reader: &mut R,
    line: &mut DynamicString,
    name: &'static str,
    parse: impl FnOnce(DatabaseEntry<'_>) -> Result<T, DatabaseError>,
) -> Result<T, PlayerError> {
    line.read_line_into(reader)?;
    let text = line.to_str_lossy();
    let entry = DatabaseEntry::from_line(&text)?.expect_name(name)?;
    Ok(parse(entry)?)
}

impl fmt::Display for PlayerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{USERNAME}: {}", self.username)?;

        write!(f, "{WORDS_PLAYED}: ")?;
        for (i, word) in self.words_played.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{word}")?;
        }
        writeln!(f)?;

        write!(f, "{NUM_GUESSES}: ")?;
        for (i, count) in self.num_guesses.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{count}")?;
        }
        writeln!(f)?;

        writeln!(f, "{MAX_WIN_STREAK}: {}", self.max_win_streak)?;
        writeln!(f, "{CUR_WIN_STREAK}: {}", self.cur_win_streak)
    }
}
