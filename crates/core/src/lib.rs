//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules, run state management and scoring. It has
//! **no dependencies** on terminal, storage or clock APIs, making it:
//!
//! - **Deterministic**: the same seed deals the same sequence of boards
//! - **Testable**: every rule is covered by unit tests
//! - **Portable**: runs in any host (terminal, GUI, headless)
//! - **Allocation-free on the hot path**: boards and moves live in fixed-capacity storage
//!
//! # Module Structure
//!
//! - [`pieces`]: tiles and the piece set generator
//! - [`shuffle`]: Fisher-Yates shuffling with a solvability fix-up
//! - [`solvability`]: inversion counting and the solvability policies
//! - [`board`]: board occupancy and move validation
//! - [`scoring`]: ratings, score deltas, level scores and time budgets
//! - [`game_state`]: the run state machine (drag phases, countdown, progression)
//! - [`catalog`]: the cyclic image catalog
//! - [`persist`]: the storage seam for saved runs
//!
//! # Game Rules
//!
//! - A level is one shuffled `grid x grid` board cut from a catalog image
//! - Dropping a piece swaps it with the occupant of the target slot
//! - A piece dropped anywhere but its home slot is a mistake and costs 10 seconds
//! - Solving the board rates the level; a passing rating advances to the next
//!   level with a 30 second smaller budget (never below 60 seconds)
//! - A timeout or a "Please Try Again" completion fails the level; three
//!   failures in a row restart the run from level 1
//! - Three preview points per run each show the solved image for five seconds
//!
//! # Example
//!
//! ```
//! use tile_swap_core::{GameConfig, GameState};
//! use tile_swap_types::{PuzzleAction, Status};
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345)).unwrap();
//! game.start();
//!
//! // Move every piece to its home slot.
//! for id in 0..game.board().len() as u16 {
//!     let home = game.board().piece(id).unwrap().correct_position;
//!     game.apply_move(id, home);
//! }
//! assert_eq!(game.run().status, Status::Completed);
//!
//! // The next tick scores the level and deals level 2.
//! game.tick(16);
//! assert_eq!(game.run().level, 2);
//! assert!(game.apply_action(PuzzleAction::Continue));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds. Whole seconds are taken off the clock; the remainder carries
//! over until the next level transition, pause or restore.

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod game_state;
pub mod persist;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shuffle;
pub mod snapshot;
pub mod solvability;

pub use tile_swap_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MoveResult};
pub use catalog::{Catalog, CatalogEntry, ImageProvider, PUZZLE_CATALOG};
pub use config::GameConfig;
pub use error::PuzzleError;
pub use game_state::{DragPhase, GameState, RunState};
pub use persist::{MemoryStore, RestoreOutcome, RunStore, SavedRun};
pub use pieces::{generate, GridSize, Piece, PieceSet};
pub use rng::SimpleRng;
pub use scoring::{evaluate, time_budget_for_level, ScoreResult};
pub use shuffle::{shuffle_pieces, ShuffleOutcome};
pub use snapshot::{GameSnapshot, TileSnapshot};
pub use solvability::{count_inversions, is_solvable};
