//! JSON-lines log of core events.
//!
//! One object per line, appended as events are drained from the game. The log is
//! best effort: once a write fails the log disables itself and says so once.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use tile_swap_types::CoreEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventRecord {
    #[serde(rename_all = "camelCase")]
    PuzzleCompleted { ts: u64, level: u32, moves: u32 },
    #[serde(rename_all = "camelCase")]
    LevelCompleted {
        ts: u64,
        score: u32,
        level: u32,
        completion_time: u32,
        rating: &'static str,
    },
    #[serde(rename_all = "camelCase")]
    LevelFailed {
        ts: u64,
        level: u32,
        consecutive_failures: u32,
        timed_out: bool,
    },
    #[serde(rename_all = "camelCase")]
    ProgressReset { ts: u64, reached_level: u32 },
}

impl EventRecord {
    pub fn new(event: &CoreEvent, ts: u64) -> Self {
        match *event {
            CoreEvent::PuzzleCompleted { level, moves } => Self::PuzzleCompleted { ts, level, moves },
            CoreEvent::LevelCompleted {
                score,
                level,
                completion_time,
                rating,
            } => Self::LevelCompleted {
                ts,
                score,
                level,
                completion_time,
                rating: rating.key(),
            },
            CoreEvent::LevelFailed {
                level,
                consecutive_failures,
                timed_out,
            } => Self::LevelFailed {
                ts,
                level,
                consecutive_failures,
                timed_out,
            },
            CoreEvent::ProgressReset { reached_level } => Self::ProgressReset { ts, reached_level },
        }
    }
}

pub struct EventLog {
    out: Option<BufWriter<File>>,
    buf: Vec<u8>,
}

impl EventLog {
    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            buf: Vec::with_capacity(256),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn append(&mut self, event: &CoreEvent, ts: u64) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &EventRecord::new(event, ts)).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if let Err(e) = out.write_all(&self.buf).and_then(|_| out.flush()) {
            log::warn!("event log disabled after write error: {}", e);
            self.out = None;
        }
    }
}
