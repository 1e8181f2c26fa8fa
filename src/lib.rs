//! Wordle Stats
//!
//! Terminal Wordle that keeps per-player statistics, built on a small set of
//! hand-rolled collections.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_stats::core::{Answer, Word};
//!
//! let answer = Answer::new(Word::new("slate").unwrap());
//! let feedback = answer.check_guess(&Word::new("crane").unwrap());
//! assert_eq!(feedback.code(), "XXGXG");
//! ```

// Growable array, byte string, hash set and red-black tree
pub mod collections;

// Words and guess coloring
pub mod core;

// Player records and statistics
pub mod players;

// Dictionary and username list files
pub mod wordlists;

// Login, menu and game flow
pub mod console_app;

// Terminal output formatting
pub mod output;

pub mod config;
pub mod error;
