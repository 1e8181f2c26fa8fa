//! Login screen and main menu

use super::ConsoleApp;
use super::game::{self, GameResult};
use crate::core::{Answer, Word};
use crate::output::print_stats;
use crate::players::PlayerInfo;
use anyhow::{Context, Result};
use rand::Rng;
use std::io::{BufRead, Write};

/// States of the console program
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProgramState {
    /// Ask who is playing
    LogIn,
    /// Show the menu for the logged-in player
    MainMenu,
    /// Remove the logged-in player
    DeleteUser,
    Exit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum UserSelection {
    PlayGame,
    ViewStats,
    LogOff,
    DeleteUser,
}

impl UserSelection {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::PlayGame),
            2 => Some(Self::ViewStats),
            3 => Some(Self::LogOff),
            4 => Some(Self::DeleteUser),
            _ => None,
        }
    }
}

impl<R: BufRead, W: Write, G: Rng> ConsoleApp<'_, R, W, G> {
    /// Ask for a username and load or create that player
    pub(super) fn log_in(&mut self) -> Result<ProgramState> {
        let out = self.console.output();
        if !self.usernames.is_empty() {
            writeln!(out, "List of existing users:")?;
            for username in self.usernames.iter() {
                writeln!(out, "{username}")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "Note: usernames are case-insensitive")?;
        writeln!(out, "Type \":q\" to exit")?;

        let Some(mut username) = self.console.prompt("Username: ")? else {
            return Ok(ProgramState::Exit);
        };
        username.trim();
        username.make_ascii_lowercase();

        if username == ":q" {
            return Ok(ProgramState::Exit);
        }
        if username.is_empty() {
            self.console.error("username cannot be empty")?;
            return Ok(ProgramState::LogIn);
        }
        if username.as_bytes().iter().any(|b| matches!(b, b'/' | b'\\')) {
            self.console.error("username cannot contain '/' or '\\'")?;
            return Ok(ProgramState::LogIn);
        }

        let path = self.config.player_file(&username.to_str_lossy());
        if path == self.config.usernames_file {
            self.console.error(&format!("username {username} is reserved"))?;
            return Ok(ProgramState::LogIn);
        }

        self.usernames.insert(username.clone());

        let player = match PlayerInfo::from_file(&path) {
            Ok(Some(player)) => player,
            Ok(None) => PlayerInfo::new(username.clone()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt player record");
                self.console
                    .error(&format!("corrupt player database file: {}", path.display()))?;
                return Ok(ProgramState::Exit);
            }
        };

        writeln!(self.console.output(), "Hello, {username}")?;
        tracing::info!(username = %username, "logged in");
        self.player = Some(player);

        if self.save_usernames()? {
            Ok(ProgramState::MainMenu)
        } else {
            Ok(ProgramState::Exit)
        }
    }

    /// Show the menu once and act on the selection
    pub(super) fn main_menu(&mut self) -> Result<ProgramState> {
        let Some(selection) = self.request_selection()? else {
            return Ok(ProgramState::Exit);
        };

        match selection {
            UserSelection::PlayGame => self.play(),
            UserSelection::ViewStats => {
                if let Some(player) = &self.player {
                    let color = self.console.color();
                    print_stats(self.console.output(), player, color)?;
                }
                Ok(ProgramState::MainMenu)
            }
            UserSelection::LogOff => Ok(ProgramState::LogIn),
            UserSelection::DeleteUser => self.confirm_delete(),
        }
    }

    fn request_selection(&mut self) -> Result<Option<UserSelection>> {
        let out = self.console.output();
        writeln!(out)?;
        writeln!(out, "[1] Play a game of Wordle")?;
        writeln!(out, "[2] View player statistics")?;
        writeln!(out, "[3] Log off")?;
        writeln!(out, "[4] Delete user")?;

        let selection = loop {
            let Some(input) = self.console.prompt("Selection: ")? else {
                return Ok(None);
            };
            match UserSelection::parse(&input.to_str_lossy()) {
                Some(selection) => break selection,
                None => self.console.error("invalid selection")?,
            }
        };
        writeln!(self.console.output())?;
        Ok(Some(selection))
    }

    /// Play one game, then show and save the player's statistics
    fn play(&mut self) -> Result<ProgramState> {
        let Some(player) = self.player.as_mut() else {
            return Ok(ProgramState::LogIn);
        };

        let Some(word) = player.random_word(self.dictionary, &mut self.rng) else {
            writeln!(
                self.console.output(),
                "You have played every word in the dictionary!"
            )?;
            return Ok(ProgramState::MainMenu);
        };
        let word = Word::from_dynamic(word).context("dictionary holds an invalid word")?;
        tracing::debug!(answer = %word, "starting game");

        let answer = Answer::new(word);
        let result = game::run(
            &mut self.console,
            &answer,
            player,
            self.dictionary,
            self.config.max_guesses,
        )?;
        if result == GameResult::Abandoned {
            return Ok(ProgramState::Exit);
        }

        let color = self.console.color();
        print_stats(self.console.output(), player, color)?;

        let path = self.config.player_file(&player.username().to_str_lossy());
        if let Err(e) = player.write_to_file(&path) {
            tracing::warn!(error = %e, "could not save player record");
            self.console
                .error("could not write to user database file, progress has not been saved")?;
        }
        Ok(ProgramState::MainMenu)
    }

    fn confirm_delete(&mut self) -> Result<ProgramState> {
        let Some(player) = &self.player else {
            return Ok(ProgramState::LogIn);
        };
        let prompt = format!(
            "Are you sure you would like to delete user: {} [y/N] ",
            player.username()
        );

        let Some(mut confirmation) = self.console.prompt(&prompt)? else {
            return Ok(ProgramState::Exit);
        };
        confirmation.trim();
        confirmation.make_ascii_lowercase();

        if confirmation == "y" {
            Ok(ProgramState::DeleteUser)
        } else {
            writeln!(self.console.output(), "Action aborted")?;
            Ok(ProgramState::MainMenu)
        }
    }
}
