//! On-disk shape of a saved run.
//!
//! Kept separate from the core types so the file format can evolve without
//! touching the game rules.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use tile_swap_core::{Piece, RunState, SavedRun};
use tile_swap_types::{ImageRef, Rating, Status};

/// Bumped when the layout changes incompatibly.
pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPiece {
    pub id: u16,
    pub correct_position: u16,
    pub current_position: u16,
    pub image: u32,
}

impl From<&Piece> for PersistedPiece {
    fn from(p: &Piece) -> Self {
        Self {
            id: p.id,
            correct_position: p.correct_position,
            current_position: p.current_position,
            image: p.image.id(),
        }
    }
}

impl From<PersistedPiece> for Piece {
    fn from(p: PersistedPiece) -> Self {
        Self {
            id: p.id,
            correct_position: p.correct_position,
            current_position: p.current_position,
            image: ImageRef(p.image),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRun {
    pub version: u32,
    pub grid_size: u8,
    pub level: u32,
    pub time_budget: u32,
    pub time_remaining: u32,
    pub incorrect_moves: u32,
    #[serde(default)]
    pub moves: u32,
    pub preview_points: u32,
    #[serde(default)]
    pub previews_used: u32,
    #[serde(default)]
    pub level_score: u32,
    pub total_score: u32,
    pub consecutive_failures: u32,
    pub image_index: usize,
    pub status: String,
    #[serde(default)]
    pub last_rating: Option<String>,
    pub pieces: Vec<PersistedPiece>,
}

impl From<&SavedRun> for PersistedRun {
    fn from(saved: &SavedRun) -> Self {
        let run = &saved.run;
        Self {
            version: SAVE_FORMAT_VERSION,
            grid_size: saved.grid_size,
            level: run.level,
            time_budget: run.time_budget,
            time_remaining: run.time_remaining,
            incorrect_moves: run.incorrect_moves,
            moves: run.moves,
            preview_points: run.preview_points,
            previews_used: run.previews_used,
            level_score: run.level_score,
            total_score: run.total_score,
            consecutive_failures: run.consecutive_failures,
            image_index: run.image_index,
            status: run.status.as_str().to_string(),
            last_rating: run.last_rating.map(|r| r.key().to_string()),
            pieces: saved.pieces.iter().map(PersistedPiece::from).collect(),
        }
    }
}

impl TryFrom<PersistedRun> for SavedRun {
    type Error = anyhow::Error;

    fn try_from(p: PersistedRun) -> Result<Self, Self::Error> {
        if p.version != SAVE_FORMAT_VERSION {
            return Err(anyhow!("unsupported save format version {}", p.version));
        }
        let status =
            Status::from_str(&p.status).ok_or_else(|| anyhow!("unknown status {:?}", p.status))?;
        let last_rating = match p.last_rating.as_deref() {
            Some(key) => {
                Some(Rating::from_key(key).ok_or_else(|| anyhow!("unknown rating {:?}", key))?)
            }
            None => None,
        };

        Ok(SavedRun {
            grid_size: p.grid_size,
            run: RunState {
                level: p.level,
                time_budget: p.time_budget,
                time_remaining: p.time_remaining,
                incorrect_moves: p.incorrect_moves,
                moves: p.moves,
                preview_points: p.preview_points,
                previews_used: p.previews_used,
                level_score: p.level_score,
                total_score: p.total_score,
                consecutive_failures: p.consecutive_failures,
                image_index: p.image_index,
                status,
                last_rating,
            },
            pieces: p.pieces.into_iter().map(Piece::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SavedRun {
        let mut run = RunState::new(300, 2);
        run.level = 4;
        run.time_remaining = 120;
        run.time_budget = 210;
        run.status = Status::Good;
        run.last_rating = Some(Rating::GoodJob);
        SavedRun {
            grid_size: 2,
            run,
            pieces: tile_swap_core::generate(2, ImageRef(3)).unwrap().to_vec(),
        }
    }

    #[test]
    fn test_persisted_run_converts_back() {
        let saved = sample();
        let restored = SavedRun::try_from(PersistedRun::from(&saved)).unwrap();
        assert_eq!(restored, saved);
    }

    #[test]
    fn test_status_is_stored_as_text() {
        let json = serde_json::to_value(PersistedRun::from(&sample())).unwrap();
        assert_eq!(json["status"], "good");
        assert_eq!(json["last_rating"], "good");
        assert_eq!(json["pieces"][0]["image"], 3);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut p = PersistedRun::from(&sample());
        p.status = "winning".to_string();
        assert!(SavedRun::try_from(p).is_err());
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut p = PersistedRun::from(&sample());
        p.version = 99;
        assert!(SavedRun::try_from(p).is_err());
    }
}
