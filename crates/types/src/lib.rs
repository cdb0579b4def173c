//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, persistence).
//!
//! # Grid Dimensions
//!
//! A puzzle is a square grid of `grid_size x grid_size` tiles cut from one image:
//!
//! - **Minimum playable grid**: 2x2 (4 pieces)
//! - **Maximum grid**: 12x12 (144 pieces)
//! - **Positions**: row-major, `position = row * grid_size + col`
//!
//! # Timing Constants
//!
//! Times are whole seconds unless suffixed `_MS`:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TIME_SECS` | 300 | Time budget of level 1 |
//! | `TIME_REDUCTION_PER_LEVEL_SECS` | 30 | Budget shrink per level |
//! | `MIN_TIME_BUDGET_SECS` | 60 | Budget floor |
//! | `TIME_PENALTY_SECS` | 10 | Charged per incorrect move |
//! | `TICK_MS` | 1000 | Countdown resolution |
//! | `PREVIEW_DURATION_MS` | 5000 | How long an image preview stays open |
//!
//! # Examples
//!
//! ```
//! use tile_swap_types::{Difficulty, PuzzleAction, Rating, MAX_GRID_SIZE};
//!
//! assert_eq!(Difficulty::Hard.grid_size(), 6);
//! assert_eq!(PuzzleAction::from_str("preview"), Some(PuzzleAction::Preview));
//! assert_eq!(Rating::GoodJob.as_str(), "Good Job");
//! assert_eq!(MAX_GRID_SIZE, 12);
//! ```

/// Smallest grid the game can be configured with.
pub const MIN_GRID_SIZE: u8 = 2;

/// Largest grid (12x12).
pub const MAX_GRID_SIZE: u8 = 12;

/// Upper bound on pieces in any board (`MAX_GRID_SIZE²`).
pub const MAX_PIECES: usize = (MAX_GRID_SIZE as usize) * (MAX_GRID_SIZE as usize);

/// Grid sizes offered by the grid selector.
pub const GRID_SIZES: [u8; 7] = [2, 3, 4, 6, 8, 10, 12];

/// Time budget of the first level.
pub const INITIAL_TIME_SECS: u32 = 300;

/// How much the budget shrinks for every level gained.
pub const TIME_REDUCTION_PER_LEVEL_SECS: u32 = 30;

/// Budget floor, no level gets less than a minute.
pub const MIN_TIME_BUDGET_SECS: u32 = 60;

/// Seconds taken off the clock for each incorrect move.
pub const TIME_PENALTY_SECS: u32 = 10;

/// Incorrect moves still tolerated by the lowest passing rating.
pub const MAX_INCORRECT_MOVES: u32 = 6;

/// Preview points granted at the start of a run.
pub const INITIAL_PREVIEW_POINTS: u32 = 3;

/// Preview window length.
pub const PREVIEW_DURATION_MS: u32 = 5000;

/// Consecutive failed levels that wipe all progress.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

/// Countdown resolution (one decrement per second).
pub const TICK_MS: u32 = 1000;

/// Base of the per-level leaderboard score before mistakes are deducted.
pub const BASE_LEVEL_SCORE: u32 = 1000;

/// Deducted from the base level score per incorrect move.
pub const MISTAKE_SCORE_PENALTY: u32 = 50;

/// Deducted from the level score when the level was rated "Please Try Again".
pub const TRY_AGAIN_SCORE_PENALTY: u32 = 200;


/// Opaque reference to the source image of a puzzle.
///
/// The core only stores and compares it; the image catalog resolves it to
/// something displayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ImageRef(pub u32);

impl ImageRef {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Rating awarded when a board is completed
///
/// Variants are ordered best first, so `a < b` means `a` is the better rating.
/// - **Excellent**: at most 30% of the budget used, no mistakes
/// - **GoodJob**: at most 50% used, up to 3 mistakes
/// - **CanDoBetter**: at most 99% used, up to 6 mistakes
/// - **TryAgain**: anything worse (counts as a failed level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rating {
    Excellent,
    GoodJob,
    CanDoBetter,
    TryAgain,
}

impl Rating {
    /// Player-facing label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::GoodJob => "Good Job",
            Rating::CanDoBetter => "You Can Do Better",
            Rating::TryAgain => "Please Try Again",
        }
    }

    /// Stable lowercase key, used by persistence.
    pub fn key(&self) -> &'static str {
        match self {
            Rating::Excellent => "excellent",
            Rating::GoodJob => "good",
            Rating::CanDoBetter => "average",
            Rating::TryAgain => "failed",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "excellent" => Some(Rating::Excellent),
            "good" => Some(Rating::GoodJob),
            "average" => Some(Rating::CanDoBetter),
            "failed" => Some(Rating::TryAgain),
            _ => None,
        }
    }

    /// Whether the rating advances the run to the next level.
    pub fn is_pass(&self) -> bool {
        !matches!(self, Rating::TryAgain)
    }
}

/// Run status as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Board active, countdown running.
    Playing,
    /// Previous level passed with an Excellent rating.
    Excellent,
    /// Previous level passed with a Good Job rating.
    Good,
    /// Previous level passed with a You Can Do Better rating.
    CanDoBetter,
    /// Previous board was completed too slowly or with too many mistakes.
    TryAgain,
    /// Previous level ran out of time.
    Failed,
    /// Board solved, result not yet resolved.
    Completed,
}

impl Status {
    /// Only a playing run accepts moves and runs the countdown.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Playing)
    }

    /// Result statuses wait for [`PuzzleAction::Continue`].
    pub fn is_result(&self) -> bool {
        matches!(
            self,
            Status::Excellent
                | Status::Good
                | Status::CanDoBetter
                | Status::TryAgain
                | Status::Failed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Excellent => "excellent",
            Status::Good => "good",
            Status::CanDoBetter => "canDoBetter",
            Status::TryAgain => "tryAgain",
            Status::Failed => "failed",
            Status::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "playing" => Some(Status::Playing),
            "excellent" => Some(Status::Excellent),
            "good" => Some(Status::Good),
            "candobetter" => Some(Status::CanDoBetter),
            "tryagain" => Some(Status::TryAgain),
            "failed" => Some(Status::Failed),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

impl From<Rating> for Status {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Excellent => Status::Excellent,
            Rating::GoodJob => Status::Good,
            Rating::CanDoBetter => Status::CanDoBetter,
            Rating::TryAgain => Status::TryAgain,
        }
    }
}

/// Which arrangements count as solvable
///
/// - **FreeSwap**: any two pieces may be swapped directly, so every permutation
///   is reachable.
/// - **SlideConstrained**: 15-puzzle inversion parity rule, for boards where moves
///   are restricted to a single empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolvabilityPolicy {
    #[default]
    FreeSwap,
    SlideConstrained,
}

impl SolvabilityPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" | "freeswap" | "free-swap" => Some(SolvabilityPolicy::FreeSwap),
            "slide" | "slideconstrained" | "slide-constrained" => {
                Some(SolvabilityPolicy::SlideConstrained)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SolvabilityPolicy::FreeSwap => "free-swap",
            SolvabilityPolicy::SlideConstrained => "slide-constrained",
        }
    }
}

/// Named grid presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    pub fn grid_size(&self) -> u8 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 8,
            Difficulty::Master => 12,
        }
    }

    pub fn from_grid_size(grid_size: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.grid_size() == grid_size)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            "master" => Some(Difficulty::Master),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
            Difficulty::Master => "master",
        }
    }
}

/// Actions that can be applied to the running game
///
/// These are the discrete events the presentation layer forwards to the core.
/// Cursor actions move the keyboard selection; `Select` picks up the piece under
/// the cursor or drops the held piece there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleAction {
    /// Move the selection cursor one column left
    CursorLeft,
    /// Move the selection cursor one column right
    CursorRight,
    /// Move the selection cursor one row up
    CursorUp,
    /// Move the selection cursor one row down
    CursorDown,
    /// Pick up the piece under the cursor, or drop the held piece there
    Select,
    /// Put the held piece back without moving it
    CancelDrag,
    /// Spend one preview point to show the solved image
    Preview,
    /// Toggle pause
    Pause,
    /// Leave a result screen and start the prepared board
    Continue,
    /// Throw away all progress and start a new run
    Restart,
}

impl PuzzleAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tile_swap_types::PuzzleAction;
    ///
    /// assert_eq!(PuzzleAction::from_str("cursorLeft"), Some(PuzzleAction::CursorLeft));
    /// assert_eq!(PuzzleAction::from_str("select"), Some(PuzzleAction::Select));
    /// assert_eq!(PuzzleAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(PuzzleAction::CursorLeft),
            "cursorright" => Some(PuzzleAction::CursorRight),
            "cursorup" => Some(PuzzleAction::CursorUp),
            "cursordown" => Some(PuzzleAction::CursorDown),
            "select" => Some(PuzzleAction::Select),
            "canceldrag" => Some(PuzzleAction::CancelDrag),
            "preview" => Some(PuzzleAction::Preview),
            "pause" => Some(PuzzleAction::Pause),
            "continue" => Some(PuzzleAction::Continue),
            "restart" => Some(PuzzleAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PuzzleAction::CursorLeft => "cursorLeft",
            PuzzleAction::CursorRight => "cursorRight",
            PuzzleAction::CursorUp => "cursorUp",
            PuzzleAction::CursorDown => "cursorDown",
            PuzzleAction::Select => "select",
            PuzzleAction::CancelDrag => "cancelDrag",
            PuzzleAction::Preview => "preview",
            PuzzleAction::Pause => "pause",
            PuzzleAction::Continue => "continue",
            PuzzleAction::Restart => "restart",
        }
    }
}

/// Core-side event emitted on level transitions.
///
/// Drained by the host and forwarded to the leaderboard and the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// Every piece reached its correct position.
    PuzzleCompleted { level: u32, moves: u32 },
    /// A completed board was scored.
    LevelCompleted {
        score: u32,
        level: u32,
        completion_time: u32,
        rating: Rating,
    },
    /// The level was failed (poor rating or time out).
    LevelFailed {
        level: u32,
        consecutive_failures: u32,
        timed_out: bool,
    },
    /// Too many consecutive failures, the run starts over.
    ProgressReset { reached_level: u32 },
}

impl CoreEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            CoreEvent::PuzzleCompleted { .. } => "puzzleCompleted",
            CoreEvent::LevelCompleted { .. } => "levelCompleted",
            CoreEvent::LevelFailed { .. } => "levelFailed",
            CoreEvent::ProgressReset { .. } => "progressReset",
        }
    }
}
