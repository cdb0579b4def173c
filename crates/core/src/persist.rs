//! Persistence seam
//!
//! The core never touches storage. Hosts implement [`RunStore`] and hand it to
//! [`GameState::load_from`](crate::GameState::load_from) /
//! [`GameState::save_to`](crate::GameState::save_to).

use std::convert::Infallible;
use std::fmt;

use crate::error::PuzzleError;
use crate::game_state::RunState;
use crate::pieces::Piece;

/// Everything needed to resume a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRun {
    pub grid_size: u8,
    pub run: RunState,
    /// Current board, any order.
    pub pieces: Vec<Piece>,
}

/// Storage backend for runs
pub trait RunStore {
    type Error: fmt::Display;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<SavedRun>, Self::Error>;

    fn save(&mut self, run: &SavedRun) -> Result<(), Self::Error>;
}

/// How a restore went
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    /// Nothing was saved, a new run started.
    Fresh,
    /// The saved run was adopted. `board_kept` is false when the saved board
    /// did not match the configured grid and a fresh board was dealt instead.
    Restored { board_kept: bool },
    /// The saved run was invalid and thrown away.
    Discarded(PuzzleError),
    /// The store failed to load; treated as no saved state.
    LoadFailed(String),
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, RestoreOutcome::Restored { .. })
    }
}

/// In-memory store, mostly for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<SavedRun>,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(run: SavedRun) -> Self {
        Self {
            saved: Some(run),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&SavedRun> {
        self.saved.as_ref()
    }

    /// Number of successful `save` calls.
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl RunStore for MemoryStore {
    type Error = Infallible;

    fn load(&mut self) -> Result<Option<SavedRun>, Self::Error> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, run: &SavedRun) -> Result<(), Self::Error> {
        self.saved = Some(run.clone());
        self.saves += 1;
        Ok(())
    }
}
