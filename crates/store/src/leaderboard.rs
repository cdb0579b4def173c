//! Local leaderboard
//!
//! Entries are kept sorted by score (highest first) and capped at
//! [`MAX_ENTRIES`]. Equal scores keep submission order.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use tile_swap_types::CoreEvent;

/// Entries retained; lower scores fall off the end.
pub const MAX_ENTRIES: usize = 100;

/// Default size of a `top` query.
pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub score: u32,
    pub level: u32,
    /// Seconds spent on the level.
    pub completion_time: u32,
    /// Rating key (`excellent`, `good`, `average`, `failed`).
    pub rating: String,
    /// Unix time in milliseconds.
    pub timestamp_ms: u64,
}

impl LeaderboardEntry {
    /// Build an entry from a `LevelCompleted` event; other events yield `None`.
    pub fn from_event(player: &str, event: &CoreEvent, timestamp_ms: u64) -> Option<Self> {
        match *event {
            CoreEvent::LevelCompleted {
                score,
                level,
                completion_time,
                rating,
            } => Some(Self {
                player: player.to_string(),
                score,
                level,
                completion_time,
                rating: rating.key().to_string(),
                timestamp_ms,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    path: Option<PathBuf>,
}

impl Leaderboard {
    /// In-memory leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaderboard persisted at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let mut entries: Vec<LeaderboardEntry> = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed leaderboard {}", path.display()))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(anyhow!("failed to read {}: {}", path.display(), e)),
        };
        // Stable sort keeps the file's order for equal scores.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry. Returns its 0-based rank, or `None` when it did not
    /// make the cut.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        if rank >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Highest `limit` entries.
    pub fn top(&self, limit: usize) -> &[LeaderboardEntry] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Highest [`DEFAULT_TOP`] entries.
    pub fn top_default(&self) -> &[LeaderboardEntry] {
        self.top(DEFAULT_TOP)
    }

    /// Entries of one player, best first.
    pub fn by_player<'a, 'b>(
        &'a self,
        player: &'b str,
    ) -> impl Iterator<Item = &'a LeaderboardEntry> + 'b
    where
        'a: 'b,
    {
        self.entries.iter().filter(move |e| e.player == player)
    }

    pub fn best_for(&self, player: &str) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.player == player)
    }

    /// Write to the backing file, if any.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let json = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
