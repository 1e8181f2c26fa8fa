//! Player records
//!
//! Each player is saved to its own file as five `name: value` lines:
//!
//! ```text
//! Username: ben
//! Words Played: TRACE,CRANE
//! Number of Guesses: 0,0,2,0,0,0
//! Maximum Win Streak: 2
//! Current Win Streak: 2
//! ```

mod database;
mod player;

pub use database::{DatabaseEntry, parse_token};
pub use player::{MAX_NUM_GUESSES, PlayerInfo};
