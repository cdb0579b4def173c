//! Shuffle module - Fisher-Yates over current positions
//!
//! Identities and correct positions never move. Only the `current_position`
//! values are permuted, so the result is always a bijection over `[0, n)`.

use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::solvability::{is_solvable, last_piece_index};
use crate::types::SolvabilityPolicy;

/// What the shuffler had to do to reach a solvable arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShuffleOutcome {
    /// A corrective transposition was applied after the random permutation.
    pub corrected: bool,
}

/// Shuffle `pieces` in place and guarantee solvability under `policy`.
///
/// Slices of length 0 or 1 are left untouched. On even grids swapping the last
/// two pieces can also move the last piece to another row, cancelling the parity
/// flip; the fix-up then transposes two other pieces instead. Either way exactly
/// one corrective transposition remains applied.
pub fn shuffle_pieces(
    pieces: &mut [Piece],
    rng: &mut SimpleRng,
    policy: SolvabilityPolicy,
) -> ShuffleOutcome {
    let len = pieces.len();
    if len <= 1 {
        return ShuffleOutcome::default();
    }

    for i in (1..len).rev() {
        let j = rng.next_range(i as u32 + 1) as usize;
        swap_positions(pieces, i, j);
    }

    if is_solvable(pieces, policy) {
        return ShuffleOutcome::default();
    }

    // Any single transposition flips the inversion parity.
    swap_positions(pieces, len - 2, len - 1);
    if !is_solvable(pieces, policy) {
        // The last piece changed rows too, so its row term flipped as well.
        // Undo and transpose two pieces that leave the last piece in place.
        swap_positions(pieces, len - 2, len - 1);
        let last = last_piece_index(pieces).unwrap_or(len - 1);
        let mut others = (0..len).filter(|&i| i != last);
        if let (Some(a), Some(b)) = (others.next(), others.next()) {
            swap_positions(pieces, a, b);
        }
    }

    ShuffleOutcome { corrected: true }
}

fn swap_positions(pieces: &mut [Piece], a: usize, b: usize) {
    if a == b {
        return;
    }
    let tmp = pieces[a].current_position;
    pieces[a].current_position = pieces[b].current_position;
    pieces[b].current_position = tmp;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::generate;
    use crate::types::ImageRef;

    fn is_bijection(pieces: &[Piece]) -> bool {
        let mut seen = vec![false; pieces.len()];
        for p in pieces {
            let pos = p.current_position as usize;
            if pos >= seen.len() || seen[pos] {
                return false;
            }
            seen[pos] = true;
        }
        true
    }

    #[test]
    fn test_shuffle_keeps_identities() {
        let mut pieces = generate(4, ImageRef(0)).unwrap();
        let mut rng = SimpleRng::new(3);
        shuffle_pieces(&mut pieces, &mut rng, SolvabilityPolicy::FreeSwap);
        for (i, p) in pieces.iter().enumerate() {
            assert_eq!(p.id as usize, i);
            assert_eq!(p.correct_position as usize, i);
        }
        assert!(is_bijection(&pieces));
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut a = generate(5, ImageRef(0)).unwrap();
        let mut b = generate(5, ImageRef(0)).unwrap();
        shuffle_pieces(&mut a, &mut SimpleRng::new(11), SolvabilityPolicy::FreeSwap);
        shuffle_pieces(&mut b, &mut SimpleRng::new(11), SolvabilityPolicy::FreeSwap);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_tiny_inputs() {
        let mut rng = SimpleRng::new(1);
        let mut empty: [Piece; 0] = [];
        assert!(!shuffle_pieces(&mut empty, &mut rng, SolvabilityPolicy::SlideConstrained).corrected);

        let mut one = generate(1, ImageRef(0)).unwrap();
        shuffle_pieces(&mut one, &mut rng, SolvabilityPolicy::SlideConstrained);
        assert_eq!(one[0].current_position, 0);
    }

    #[test]
    fn test_correction_is_a_single_transposition() {
        let mut corrected = 0;
        for grid in [2u8, 3, 4] {
            for seed in 1..200u32 {
                let mut raw = generate(grid, ImageRef(0)).unwrap();
                shuffle_pieces(&mut raw, &mut SimpleRng::new(seed), SolvabilityPolicy::FreeSwap);

                let mut fixed = generate(grid, ImageRef(0)).unwrap();
                let outcome = shuffle_pieces(
                    &mut fixed,
                    &mut SimpleRng::new(seed),
                    SolvabilityPolicy::SlideConstrained,
                );

                let moved = raw
                    .iter()
                    .zip(fixed.iter())
                    .filter(|(a, b)| a.current_position != b.current_position)
                    .count();
                if outcome.corrected {
                    corrected += 1;
                    assert_eq!(moved, 2, "grid {grid} seed {seed}");
                } else {
                    assert_eq!(moved, 0, "grid {grid} seed {seed}");
                }
            }
        }
        assert!(corrected > 0);
    }

    #[test]
    fn test_slide_constrained_always_solvable() {
        let mut rng = SimpleRng::new(2024);
        for grid in 2..=6u8 {
            for _ in 0..200 {
                let mut pieces = generate(grid, ImageRef(0)).unwrap();
                shuffle_pieces(&mut pieces, &mut rng, SolvabilityPolicy::SlideConstrained);
                assert!(is_bijection(&pieces));
                assert!(is_solvable(&pieces, SolvabilityPolicy::SlideConstrained));
            }
        }
    }

    #[test]
    fn test_free_swap_never_corrects() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            let mut pieces = generate(3, ImageRef(0)).unwrap();
            let outcome = shuffle_pieces(&mut pieces, &mut rng, SolvabilityPolicy::FreeSwap);
            assert!(!outcome.corrected);
        }
    }
}
