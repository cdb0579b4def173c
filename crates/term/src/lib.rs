//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer
//! that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Diff frames so a one-second countdown only repaints the clock
//! - Map pointer coordinates back to board slots for drag-and-drop

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tile_swap_core as core;
pub use tile_swap_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{image_palette, tile_color, AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
