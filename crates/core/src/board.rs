//! Board module - the live arrangement of one level's pieces
//!
//! Pieces are stored by id (`pieces[id].id == id`) next to an occupancy table
//! mapping each position to the id sitting there. Both are fixed-capacity, so a
//! move never allocates. A running count of correctly placed pieces makes
//! `is_complete` O(1).

use arrayvec::ArrayVec;

use crate::error::PuzzleError;
use crate::pieces::{generate_for, GridSize, Piece, PieceSet};
use crate::rng::SimpleRng;
use crate::shuffle::shuffle_pieces;
use crate::types::{ImageRef, SolvabilityPolicy, MAX_PIECES};

/// Result of a successful move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The piece that was dragged.
    pub piece_id: u16,
    /// Where the dragged piece came from.
    pub from: u16,
    /// Where it landed.
    pub to: u16,
    /// The piece that previously occupied `to` (now at `from`).
    pub displaced: u16,
    /// The dragged piece is at its correct position after the swap.
    pub was_correct: bool,
    /// Every piece is correct after the swap.
    pub completed: bool,
}

/// The puzzle board: `grid_size²` pieces over `grid_size²` positions
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    grid: GridSize,
    /// Indexed by piece id.
    pieces: PieceSet,
    /// Indexed by position, holds the occupying piece id.
    occupants: ArrayVec<u16, MAX_PIECES>,
    correct_count: u16,
}

impl Board {
    /// Solved board for `grid_size`.
    pub fn new(grid_size: u8, image: ImageRef) -> Result<Self, PuzzleError> {
        let grid = GridSize::new(grid_size)?;
        Ok(Self::from_valid(grid, generate_for(grid, image)))
    }

    /// Freshly generated and shuffled board.
    pub fn shuffled(
        grid_size: u8,
        image: ImageRef,
        rng: &mut SimpleRng,
        policy: SolvabilityPolicy,
    ) -> Result<Self, PuzzleError> {
        let grid = GridSize::new(grid_size)?;
        let mut pieces = generate_for(grid, image);
        shuffle_pieces(&mut pieces, rng, policy);
        Ok(Self::from_valid(grid, pieces))
    }

    /// Rebuild a board from externally supplied pieces (e.g. a saved run).
    ///
    /// The pieces may come in any order. Fails with `StateCorruption` unless ids,
    /// correct positions and current positions are each a permutation of `[0, n)`.
    pub fn from_pieces(grid_size: u8, pieces: &[Piece]) -> Result<Self, PuzzleError> {
        let grid = GridSize::new(grid_size)?;
        let n = grid.piece_count();
        if pieces.len() != n {
            return Err(PuzzleError::corrupt(format!(
                "expected {} pieces for a {}x{} grid, found {}",
                n,
                grid_size,
                grid_size,
                pieces.len()
            )));
        }

        let mut by_id: ArrayVec<Option<Piece>, MAX_PIECES> = (0..n).map(|_| None).collect();
        let mut correct_seen = [false; MAX_PIECES];
        let mut current_seen = [false; MAX_PIECES];

        for piece in pieces {
            let id = piece.id as usize;
            let correct = piece.correct_position as usize;
            let current = piece.current_position as usize;
            if id >= n || correct >= n || current >= n {
                return Err(PuzzleError::corrupt(format!(
                    "piece {} is out of range for {} positions",
                    piece.id, n
                )));
            }
            if by_id[id].is_some() {
                return Err(PuzzleError::corrupt(format!("duplicate piece id {}", piece.id)));
            }
            if correct_seen[correct] {
                return Err(PuzzleError::corrupt(format!(
                    "correct position {} assigned twice",
                    correct
                )));
            }
            if current_seen[current] {
                return Err(PuzzleError::corrupt(format!(
                    "position {} occupied twice",
                    current
                )));
            }
            by_id[id] = Some(*piece);
            correct_seen[correct] = true;
            current_seen[current] = true;
        }

        let ordered: PieceSet = by_id.into_iter().flatten().collect();
        Ok(Self::from_valid(grid, ordered))
    }

    fn from_valid(grid: GridSize, pieces: PieceSet) -> Self {
        let mut occupants: ArrayVec<u16, MAX_PIECES> = (0..pieces.len()).map(|_| 0).collect();
        let mut correct_count = 0u16;
        for piece in &pieces {
            occupants[piece.current_position as usize] = piece.id;
            if piece.is_correct() {
                correct_count += 1;
            }
        }
        Self {
            grid,
            pieces,
            occupants,
            correct_count,
        }
    }

    pub fn grid_size(&self) -> u8 {
        self.grid.get()
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All pieces, ordered by id.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: u16) -> Option<&Piece> {
        self.pieces.get(id as usize)
    }

    /// The piece currently occupying `position`.
    pub fn piece_at(&self, position: u16) -> Option<&Piece> {
        let id = *self.occupants.get(position as usize)?;
        self.pieces.get(id as usize)
    }

    pub fn correct_count(&self) -> u16 {
        self.correct_count
    }

    pub fn is_complete(&self) -> bool {
        self.correct_count as usize == self.pieces.len()
    }

    pub fn image(&self) -> ImageRef {
        self.pieces.first().map(|p| p.image).unwrap_or_default()
    }

    /// Verify the occupancy table agrees with every piece's `current_position`.
    pub fn check_bijection(&self) -> bool {
        if self.occupants.len() != self.pieces.len() {
            return false;
        }
        self.occupants.iter().enumerate().all(|(pos, &id)| {
            self.pieces
                .get(id as usize)
                .is_some_and(|p| p.current_position as usize == pos)
        })
    }

    /// Swap the dragged piece with whatever occupies `target`.
    ///
    /// Returns `None` (and leaves the board untouched) when the piece does not
    /// exist, the target is off the board, or the target is the piece's own slot.
    pub fn apply_move(&mut self, piece_id: u16, target: u16) -> Option<MoveResult> {
        let from = self.piece(piece_id)?.current_position;
        if target as usize >= self.pieces.len() || target == from {
            return None;
        }
        let displaced = self.occupants[target as usize];

        let before = self.correct_in(&[piece_id, displaced]);
        self.pieces[piece_id as usize].current_position = target;
        self.pieces[displaced as usize].current_position = from;
        self.occupants[target as usize] = piece_id;
        self.occupants[from as usize] = displaced;
        let after = self.correct_in(&[piece_id, displaced]);

        self.correct_count = self.correct_count + after - before;

        Some(MoveResult {
            piece_id,
            from,
            to: target,
            displaced,
            was_correct: self.pieces[piece_id as usize].is_correct(),
            completed: self.is_complete(),
        })
    }

    fn correct_in(&self, ids: &[u16]) -> u16 {
        ids.iter()
            .filter(|&&id| self.pieces[id as usize].is_correct())
            .count() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_positions(grid: u8, positions: &[u16]) -> Board {
        let mut pieces = crate::pieces::generate(grid, ImageRef(1)).unwrap();
        for (p, &pos) in pieces.iter_mut().zip(positions) {
            p.current_position = pos;
        }
        Board::from_pieces(grid, &pieces).unwrap()
    }

    #[test]
    fn test_new_board_is_complete() {
        let board = Board::new(3, ImageRef(0)).unwrap();
        assert!(board.is_complete());
        assert_eq!(board.len(), 9);
        assert!(board.check_bijection());
    }

    #[test]
    fn test_shuffled_board_is_consistent() {
        let mut rng = SimpleRng::new(9);
        let board = Board::shuffled(4, ImageRef(2), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
        assert!(board.check_bijection());
        assert_eq!(board.image(), ImageRef(2));
        let correct = board.pieces().iter().filter(|p| p.is_correct()).count();
        assert_eq!(board.correct_count() as usize, correct);
    }

    #[test]
    fn test_apply_move_swaps_occupants() {
        // piece 0 at 1, piece 1 at 0
        let mut board = board_with_positions(2, &[1, 0, 2, 3]);
        assert!(!board.is_complete());

        let result = board.apply_move(0, 0).unwrap();
        assert_eq!(result.from, 1);
        assert_eq!(result.to, 0);
        assert_eq!(result.displaced, 1);
        assert!(result.was_correct);
        assert!(result.completed);
        assert!(board.is_complete());
        assert!(board.check_bijection());
        assert_eq!(board.piece_at(1).unwrap().id, 1);
    }

    #[test]
    fn test_incorrect_move_reports_false() {
        let mut board = Board::new(2, ImageRef(0)).unwrap();
        let result = board.apply_move(0, 3).unwrap();
        assert!(!result.was_correct);
        assert!(!result.completed);
        assert_eq!(board.correct_count(), 2);
        assert_eq!(board.piece(3).unwrap().current_position, 0);
    }

    #[test]
    fn test_invalid_moves_are_noops() {
        let mut board = board_with_positions(2, &[1, 0, 2, 3]);
        let before = board.clone();
        assert!(board.apply_move(0, 4).is_none());
        assert!(board.apply_move(0, 1).is_none());
        assert!(board.apply_move(9, 0).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_pieces_rejects_duplicates() {
        let mut pieces = crate::pieces::generate(2, ImageRef(0)).unwrap();
        pieces[1].current_position = 0;
        assert!(matches!(
            Board::from_pieces(2, &pieces),
            Err(PuzzleError::StateCorruption(_))
        ));
    }

    #[test]
    fn test_from_pieces_rejects_wrong_count() {
        let pieces = crate::pieces::generate(2, ImageRef(0)).unwrap();
        assert!(matches!(
            Board::from_pieces(3, &pieces),
            Err(PuzzleError::StateCorruption(_))
        ));
    }

    #[test]
    fn test_from_pieces_accepts_any_order() {
        let mut pieces = crate::pieces::generate(2, ImageRef(0)).unwrap();
        pieces.reverse();
        let board = Board::from_pieces(2, &pieces).unwrap();
        assert_eq!(board.piece(0).unwrap().id, 0);
        assert!(board.is_complete());
    }
}
