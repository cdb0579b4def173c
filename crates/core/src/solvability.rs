//! Solvability module - inversion parity checks
//!
//! The arrangement is read as a permutation: pieces are ordered by
//! `correct_position` (the identity) and their `current_position` values form
//! the sequence whose inversions are counted.

use crate::pieces::{GridSize, Piece};
use crate::types::SolvabilityPolicy;

/// Count pairs `(i < j)` in correct-position order with `current[i] > current[j]`.
pub fn count_inversions(pieces: &[Piece]) -> u32 {
    let mut ordered: Vec<&Piece> = pieces.iter().collect();
    ordered.sort_by_key(|p| p.correct_position);

    let mut inversions = 0u32;
    for i in 0..ordered.len() {
        let a = ordered[i].current_position;
        for b in &ordered[i + 1..] {
            if a > b.current_position {
                inversions += 1;
            }
        }
    }
    inversions
}

/// The piece that belongs in the last slot (highest correct position).
pub(crate) fn last_piece_index(pieces: &[Piece]) -> Option<usize> {
    pieces
        .iter()
        .enumerate()
        .max_by_key(|(_, p)| p.correct_position)
        .map(|(i, _)| i)
}

/// Check whether the arrangement is reachable under `policy`.
///
/// Under [`SolvabilityPolicy::SlideConstrained`] this is the classic 15-puzzle rule:
/// - odd grid: inversion count is even
/// - even grid: inversions plus the row of the last piece is even
///
/// [`SolvabilityPolicy::FreeSwap`] accepts every arrangement.
pub fn is_solvable(pieces: &[Piece], policy: SolvabilityPolicy) -> bool {
    match policy {
        SolvabilityPolicy::FreeSwap => true,
        SolvabilityPolicy::SlideConstrained => slide_parity_holds(pieces),
    }
}

fn slide_parity_holds(pieces: &[Piece]) -> bool {
    let grid = GridSize::for_piece_count(pieces.len()) as u32;
    if grid == 0 {
        return true;
    }

    let inversions = count_inversions(pieces);
    if grid % 2 == 1 {
        return inversions % 2 == 0;
    }

    let Some(last) = last_piece_index(pieces) else {
        return true;
    };
    let row = pieces[last].current_position as u32 / grid;
    (inversions + row) % 2 == 0
}
