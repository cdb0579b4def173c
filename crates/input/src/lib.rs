//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::PuzzleAction`]. Mouse
//! drag-and-drop needs the board layout and is resolved by the terminal view.

pub mod map;

pub use tile_swap_types as types;

pub use map::{handle_key_event, should_quit};
