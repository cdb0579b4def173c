//! Persistence for tile-swap runs
//!
//! - [`JsonFileStore`]: a [`RunStore`](tile_swap_core::RunStore) over one JSON file
//! - [`Leaderboard`]: scores of completed levels, best first, capped at 100
//! - [`EventLog`]: append-only JSON-lines log of core events
//!
//! Everything here reports failures as `anyhow::Error`; the game treats them as
//! recoverable and carries on with in-memory state.

pub mod event_log;
pub mod file_store;
pub mod leaderboard;
pub mod record;

pub use event_log::{EventLog, EventRecord};
pub use file_store::JsonFileStore;
pub use leaderboard::{Leaderboard, LeaderboardEntry, DEFAULT_TOP, MAX_ENTRIES};
pub use record::{PersistedPiece, PersistedRun, SAVE_FORMAT_VERSION};
