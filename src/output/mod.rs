//! Terminal output formatting
//!
//! Colored and plain renderings of feedback, errors and statistics.

pub mod display;
pub mod formatters;

pub use display::{print_error, print_feedback, print_game_result, print_rules, print_stats};
