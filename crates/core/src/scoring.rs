//! Scoring module - completion ratings, score deltas and level budgets
//!
//! A completed board is rated by the share of the time budget it consumed and the
//! number of incorrect moves made. Thresholds are checked best first:
//!
//! | Rating | Time used | Mistakes | `score_delta` | `bonus_points` |
//! |--------|-----------|----------|---------------|----------------|
//! | Excellent | ≤ 30% | 0 | 100 | 500 |
//! | Good Job | ≤ 50% | ≤ 3 | 75 | 250 |
//! | You Can Do Better | ≤ 99% | ≤ 6 | 50 | 0 |
//! | Please Try Again | otherwise | | 0 | 0 |

use crate::types::{
    Rating, BASE_LEVEL_SCORE, MAX_INCORRECT_MOVES, MIN_TIME_BUDGET_SECS, MISTAKE_SCORE_PENALTY,
    TIME_REDUCTION_PER_LEVEL_SECS, TRY_AGAIN_SCORE_PENALTY,
};

/// (max percent of budget used, max incorrect moves, rating, score delta, bonus)
const RATING_TABLE: [(u32, u32, Rating, u32, u32); 3] = [
    (30, 0, Rating::Excellent, 100, 500),
    (50, 3, Rating::GoodJob, 75, 250),
    (99, MAX_INCORRECT_MOVES, Rating::CanDoBetter, 50, 0),
];

/// Score evaluation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub rating: Rating,
    /// Added to the run's running score.
    pub score_delta: u32,
    /// Added on top of the level score.
    pub bonus_points: u32,
    /// Score submitted to the leaderboard for this level.
    pub level_score: u32,
}

/// Rate a completed board.
///
/// `used_pct <= limit` is compared as `used * 100 <= limit * budget` so no
/// rounding creeps in. A zero budget or zero remaining time counts as 100% used.
pub fn rate(time_remaining: u32, time_budget: u32, incorrect_moves: u32) -> Rating {
    if time_budget == 0 || time_remaining == 0 {
        return Rating::TryAgain;
    }
    let used = time_budget.saturating_sub(time_remaining) as u64;
    let budget = time_budget as u64;

    RATING_TABLE
        .iter()
        .find(|&&(pct, max_mistakes, ..)| {
            used * 100 <= pct as u64 * budget && incorrect_moves <= max_mistakes
        })
        .map(|&(_, _, rating, ..)| rating)
        .unwrap_or(Rating::TryAgain)
}

/// Per-rating `(score_delta, bonus_points)`.
pub fn rating_points(rating: Rating) -> (u32, u32) {
    RATING_TABLE
        .iter()
        .find(|&&(_, _, r, ..)| r == rating)
        .map(|&(_, _, _, delta, bonus)| (delta, bonus))
        .unwrap_or((0, 0))
}

/// Leaderboard score of a level.
///
/// `max(0, 1000 - 50 * incorrect) + bonus`; a "Please Try Again" completion
/// instead loses a further 200 and gets no bonus.
pub fn calculate_level_score(incorrect_moves: u32, rating: Rating) -> u32 {
    let base = BASE_LEVEL_SCORE.saturating_sub(MISTAKE_SCORE_PENALTY.saturating_mul(incorrect_moves));
    match rating {
        Rating::TryAgain => base.saturating_sub(TRY_AGAIN_SCORE_PENALTY),
        other => base + rating_points(other).1,
    }
}

/// Evaluate a completed board.
pub fn evaluate(time_remaining: u32, time_budget: u32, incorrect_moves: u32) -> ScoreResult {
    let rating = rate(time_remaining, time_budget, incorrect_moves);
    let (score_delta, bonus_points) = rating_points(rating);
    ScoreResult {
        rating,
        score_delta,
        bonus_points,
        level_score: calculate_level_score(incorrect_moves, rating),
    }
}

/// Share of the budget consumed, in percent (display only).
pub fn used_percent(time_remaining: u32, time_budget: u32) -> f32 {
    if time_budget == 0 {
        return 100.0;
    }
    let used = time_budget.saturating_sub(time_remaining);
    used as f32 / time_budget as f32 * 100.0
}

/// Time budget for `level` (1-based): `max(60, base - 30 * (level - 1))`.
pub fn time_budget_for_level(base_time_secs: u32, level: u32) -> u32 {
    let reduction = TIME_REDUCTION_PER_LEVEL_SECS.saturating_mul(level.saturating_sub(1));
    base_time_secs
        .saturating_sub(reduction)
        .max(MIN_TIME_BUDGET_SECS)
}
