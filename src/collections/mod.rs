//! Owning containers used by the game and player layers
//!
//! - [`DynamicString`]: growable byte string with line and whole-stream reads
//! - [`DynamicArray`]: growable array with doubling growth
//! - [`HashSet`]: open-addressing set, duplicates allowed
//! - [`OrderedSet`]: red-black tree set, duplicates rejected
//!
//! Each container records a [`TypeDescriptor`] for its element type.

mod descriptor;
pub mod dynamic_array;
pub mod dynamic_string;
pub mod hash_set;
pub mod ordered_set;

pub use descriptor::TypeDescriptor;
pub use dynamic_array::DynamicArray;
pub use dynamic_string::DynamicString;
pub use hash_set::{Cursor, HashSet};
pub use ordered_set::OrderedSet;
