//! Console front end
//!
//! The player logs in by picking an existing username or typing a new one,
//! then plays games, views statistics, logs off or deletes their account
//! from the main menu. Player records and the username list are saved as
//! they change.
//!
//! Input and output are generic so whole sessions can be scripted.

pub mod game;
pub mod main_menu;

use crate::collections::{DynamicString, HashSet, OrderedSet};
use crate::config::AppConfig;
use crate::error::ReadError;
use crate::output::print_error;
use crate::players::PlayerInfo;
use crate::wordlists::save_usernames_file;
use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::io::{self, BufRead, Write};

pub use main_menu::ProgramState;

/// Line-oriented terminal: prompts on `output`, replies from `input`
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
    line: DynamicString,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
            line: DynamicString::with_capacity(64),
        }
    }

    /// Print `prompt` and read the reply line
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    /// Returns an error if writing the prompt or reading the reply fails.
    pub fn prompt(&mut self, prompt: &str) -> Result<Option<DynamicString>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        match self.line.read_line_into(&mut self.input) {
            Ok(()) => Ok(Some(self.line.clone())),
            Err(ReadError::EndOfStream) => Ok(None),
            Err(e) => Err(e).context("failed to read input"),
        }
    }

    /// Print an `Error: ...` line
    ///
    /// # Errors
    /// Returns any error from the output.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        print_error(&mut self.output, message, self.color)
    }

    #[inline]
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[inline]
    #[must_use]
    pub const fn color(&self) -> bool {
        self.color
    }
}

/// One console session
pub struct ConsoleApp<'a, R, W, G> {
    console: Console<R, W>,
    config: &'a AppConfig,
    dictionary: &'a HashSet<DynamicString>,
    usernames: &'a mut OrderedSet<DynamicString>,
    rng: G,
    player: Option<PlayerInfo>,
}

impl<'a, R: BufRead, W: Write, G: Rng> ConsoleApp<'a, R, W, G> {
    pub fn new(
        console: Console<R, W>,
        config: &'a AppConfig,
        dictionary: &'a HashSet<DynamicString>,
        usernames: &'a mut OrderedSet<DynamicString>,
        rng: G,
    ) -> Self {
        Self {
            console,
            config,
            dictionary,
            usernames,
            rng,
            player: None,
        }
    }

    /// Run the state machine until the user exits or input ends
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails. Failures to save player data
    /// are reported to the user instead.
    pub fn run(&mut self) -> Result<()> {
        let mut state = ProgramState::LogIn;
        loop {
            tracing::debug!(?state, "entering state");
            state = match state {
                ProgramState::LogIn => {
                    self.player = None;
                    self.log_in()?
                }
                ProgramState::MainMenu => self.main_menu()?,
                ProgramState::DeleteUser => self.delete_user()?,
                ProgramState::Exit => break,
            };
        }
        Ok(())
    }

    /// Remove the current player and return to the login screen
    fn delete_user(&mut self) -> Result<ProgramState> {
        let Some(player) = self.player.take() else {
            return Ok(ProgramState::LogIn);
        };
        let username = player.username();

        let remaining: OrderedSet<DynamicString> = self
            .usernames
            .iter()
            .filter(|&name| name != username)
            .cloned()
            .collect();
        *self.usernames = remaining;

        let path = self.config.player_file(&username.to_str_lossy());
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "could not remove player record"
                );
            }
        }
        tracing::info!(username = %username, "deleted user");

        if self.save_usernames()? {
            Ok(ProgramState::LogIn)
        } else {
            Ok(ProgramState::Exit)
        }
    }

    /// Save the username list, telling the user if that fails
    ///
    /// Returns whether the list was saved.
    fn save_usernames(&mut self) -> io::Result<bool> {
        match save_usernames_file(self.usernames, &self.config.usernames_file) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::warn!(
                    path = %self.config.usernames_file.display(),
                    error = %e,
                    "could not save usernames"
                );
                self.console.error("could not write to the user database")?;
                Ok(false)
            }
        }
    }
}
