//! One game of Wordle at the console

use super::Console;
use crate::collections::{DynamicString, HashSet};
use crate::core::{Answer, WORD_LEN, Word};
use crate::output::{print_feedback, print_game_result, print_rules};
use crate::players::PlayerInfo;
use anyhow::Result;
use std::io::{BufRead, Write};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// Guessed on this turn, counting from 1
    Won(usize),
    Lost,
    /// Input ended before the game finished; nothing is recorded
    Abandoned,
}

/// Prompt for guesses until the answer is found or `max_guesses` run out
///
/// Guesses that are not five letters or not in the dictionary are rejected
/// without using up a turn. The outcome is recorded on `player`.
///
/// # Errors
/// Returns an error if terminal I/O fails.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    answer: &Answer,
    player: &mut PlayerInfo,
    dictionary: &HashSet<DynamicString>,
    max_guesses: usize,
) -> Result<GameResult> {
    let color = console.color();
    print_rules(console.output(), max_guesses)?;

    let mut turn = 1;
    while turn <= max_guesses {
        let Some(mut guess) = console.prompt(&format!("[{turn}] "))? else {
            tracing::debug!(turn, "input ended mid-game");
            return Ok(GameResult::Abandoned);
        };
        guess.trim();
        guess.make_ascii_uppercase();

        if guess.len() != WORD_LEN {
            console.error("guess must be 5 letters")?;
            continue;
        }
        let guess = match Word::from_dynamic(&guess) {
            Ok(word) if dictionary.contains(&guess) => word,
            _ => {
                console.error("guess must be a word in the dictionary")?;
                continue;
            }
        };

        let feedback = answer.check_guess(&guess);
        print_feedback(console.output(), &feedback, color)?;

        if feedback.is_win() {
            player.add_won_word(answer.word().to_dynamic(), turn);
            print_game_result(console.output(), Some(turn), answer.word(), color)?;
            tracing::info!(turn, "game won");
            return Ok(GameResult::Won(turn));
        }
        turn += 1;
    }

    player.add_lost_word(answer.word().to_dynamic());
    print_game_result(console.output(), None, answer.word(), color)?;
    tracing::info!("game lost");
    Ok(GameResult::Lost)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{Sandbox, dictionary, session};
    use super::*;
    use crate::collections::OrderedSet;
    use std::io::Cursor;

    fn play(
        answer: &str,
        words: &[&str],
        max_guesses: usize,
        input: &str,
    ) -> (GameResult, PlayerInfo, String) {
        let mut out = Vec::new();
        let mut player = PlayerInfo::new(DynamicString::from("ben"));
        let answer = Answer::new(Word::new(answer).unwrap());
        let result = {
            let mut console = Console::new(Cursor::new(input.as_bytes()), &mut out, false);
            run(&mut console, &answer, &mut player, &dictionary(words), max_guesses).unwrap()
        };
        (result, player, String::from_utf8(out).unwrap())
    }

    #[test]
    fn win_on_third_guess() {
        let words = ["CRANE", "SLATE", "TRACE"];
        let (result, player, out) = play("TRACE", &words, 6, "crane\nslate\ntrace\n");
        assert_eq!(result, GameResult::Won(3));
        assert!(out.contains("    YGGXG\n"));
        assert!(out.contains("[3] "));
        assert!(out.contains("Impressive! The word was: TRACE"));
        assert_eq!(player.num_guesses(), &[0, 0, 1, 0, 0, 0]);
        assert_eq!(player.cur_win_streak(), 1);
        assert!(player.words_played().contains(&DynamicString::from("TRACE")));
    }

    #[test]
    fn loss_after_max_guesses() {
        let (result, player, out) = play("TRACE", &["CRANE", "TRACE"], 2, "crane\ncrane\n");
        assert_eq!(result, GameResult::Lost);
        assert!(out.contains("Guess the 5-letter word in 2 or fewer guesses."));
        assert!(out.contains("Too bad! The word was: TRACE"));
        assert!(!out.contains("[3] "));
        assert_eq!(player.num_guesses(), &[0; 6]);
        assert_eq!(player.words_played().len(), 1);
        assert_eq!(player.cur_win_streak(), 0);
    }

    #[test]
    fn invalid_guesses_do_not_use_turns() {
        let (result, _, out) = play("TRACE", &["TRACE"], 1, "tra\ntracer\nabcde\n\ntrace\n");
        assert_eq!(result, GameResult::Won(1));
        assert_eq!(out.matches("Error: guess must be 5 letters").count(), 3);
        assert_eq!(out.matches("Error: guess must be a word in the dictionary").count(), 1);
        assert!(out.contains("Genius! The word was: TRACE"));
    }

    #[test]
    fn end_of_input_abandons_game() {
        let (result, player, out) = play("TRACE", &["CRANE", "TRACE"], 6, "crane\n");
        assert_eq!(result, GameResult::Abandoned);
        assert!(out.ends_with("[2] "));
        assert!(player.words_played().is_empty());
        assert_eq!(player.cur_win_streak(), 0);
    }

    #[test]
    fn finished_game_is_saved() {
        let sandbox = Sandbox::new("game_saved");
        let mut users = OrderedSet::new();
        let out = session(&sandbox, &dictionary(&["TRACE"]), &mut users, "ben\n1\ntrace\n3\n:q\n");
        assert!(out.contains("Genius! The word was: TRACE"));
        assert!(out.contains("Number of Words Played: 1\nWin Rate: 100%\n"));

        let saved = PlayerInfo::from_file(&sandbox.player_path("ben")).unwrap().unwrap();
        assert_eq!(saved.num_guesses(), &[1, 0, 0, 0, 0, 0]);
        assert_eq!(saved.max_win_streak(), 1);
    }

    #[test]
    fn abandoned_game_is_not_saved() {
        let sandbox = Sandbox::new("game_abandoned");
        let mut users = OrderedSet::new();
        let out = session(&sandbox, &dictionary(&["TRACE"]), &mut users, "ben\n1\n");
        assert!(out.ends_with("[1] "));
        assert!(!sandbox.player_path("ben").exists());
    }
}
