//! Word and username lists
//!
//! The dictionary and the username list are plain text, one entry per line.

pub mod loader;

pub use loader::{
    load_dictionary, load_dictionary_file, load_usernames, load_usernames_file, save_usernames,
    save_usernames_file,
};
