//! Pieces module - tile definitions and the piece set generator
//!
//! A puzzle of grid size `g` is cut into `g * g` tiles. Positions are row-major
//! (`row * g + col`). Every piece knows where it belongs (`correct_position`) and
//! where it currently sits (`current_position`).

use arrayvec::ArrayVec;

use crate::error::PuzzleError;
use crate::types::{ImageRef, MAX_GRID_SIZE, MAX_PIECES};

/// Fixed-capacity piece storage (at most 12x12 tiles, no heap allocation).
pub type PieceSet = ArrayVec<Piece, MAX_PIECES>;

/// A grid size known to fit the board storage (`1..=12`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSize(u8);

impl GridSize {
    pub fn new(size: u8) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::config("grid size must be at least 1"));
        }
        if size > MAX_GRID_SIZE {
            return Err(PuzzleError::config(format!(
                "grid size {} exceeds the maximum of {}",
                size, MAX_GRID_SIZE
            )));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of pieces on a board of this size.
    pub fn piece_count(self) -> usize {
        (self.0 as usize) * (self.0 as usize)
    }

    /// Largest grid whose piece count does not exceed `len`.
    pub fn for_piece_count(len: usize) -> u8 {
        let mut g = 0usize;
        while (g + 1) * (g + 1) <= len {
            g += 1;
        }
        g.min(u8::MAX as usize) as u8
    }
}

/// A single image tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Stable identity, equal to the index the piece was generated at.
    pub id: u16,
    /// Position that solves the puzzle.
    pub correct_position: u16,
    /// Position the piece currently occupies.
    pub current_position: u16,
    pub image: ImageRef,
}

impl Piece {
    pub fn is_correct(&self) -> bool {
        self.current_position == self.correct_position
    }

    /// Row of the tile inside the source image.
    pub fn correct_row(&self, grid_size: u8) -> u16 {
        self.correct_position / (grid_size.max(1) as u16)
    }

    /// Column of the tile inside the source image.
    pub fn correct_col(&self, grid_size: u8) -> u16 {
        self.correct_position % (grid_size.max(1) as u16)
    }

    /// Background offset of the tile as `(x%, y%)`, matching CSS
    /// `background-position` semantics with a `grid * 100%` background size.
    pub fn background_position(&self, grid_size: u8) -> (f32, f32) {
        if grid_size <= 1 {
            return (0.0, 0.0);
        }
        let step = 100.0 / (grid_size as f32 - 1.0);
        (
            self.correct_col(grid_size) as f32 * step,
            self.correct_row(grid_size) as f32 * step,
        )
    }
}

/// Build the solved piece set for a grid (identity layout).
///
/// Fails with [`PuzzleError::InvalidConfiguration`] when `grid_size` is 0 or does
/// not fit the fixed board capacity.
pub fn generate(grid_size: u8, image: ImageRef) -> Result<PieceSet, PuzzleError> {
    Ok(generate_for(GridSize::new(grid_size)?, image))
}

/// Infallible variant for an already validated grid size.
pub fn generate_for(grid: GridSize, image: ImageRef) -> PieceSet {
    let mut pieces = PieceSet::new();
    for i in 0..grid.piece_count() {
        let pos = i as u16;
        pieces.push(Piece {
            id: pos,
            correct_position: pos,
            current_position: pos,
            image,
        });
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_identity_layout() {
        let pieces = generate(3, ImageRef(7)).unwrap();
        assert_eq!(pieces.len(), 9);
        for (i, p) in pieces.iter().enumerate() {
            assert_eq!(p.id as usize, i);
            assert_eq!(p.correct_position as usize, i);
            assert_eq!(p.current_position as usize, i);
            assert_eq!(p.image, ImageRef(7));
            assert!(p.is_correct());
        }
    }

    #[test]
    fn test_generate_rejects_bad_grid() {
        assert!(matches!(
            generate(0, ImageRef(0)),
            Err(PuzzleError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            generate(13, ImageRef(0)),
            Err(PuzzleError::InvalidConfiguration(_))
        ));
        assert_eq!(generate(12, ImageRef(0)).unwrap().len(), 144);
    }

    #[test]
    fn test_background_positions() {
        let pieces = generate(2, ImageRef(0)).unwrap();
        assert_eq!(pieces[0].background_position(2), (0.0, 0.0));
        assert_eq!(pieces[3].background_position(2), (100.0, 100.0));

        let pieces = generate(3, ImageRef(0)).unwrap();
        assert_eq!(pieces[5].background_position(3), (100.0, 50.0));
        assert_eq!(pieces[0].background_position(1), (0.0, 0.0));
    }

    #[test]
    fn test_row_and_col() {
        let pieces = generate(4, ImageRef(0)).unwrap();
        assert_eq!(pieces[6].correct_row(4), 1);
        assert_eq!(pieces[6].correct_col(4), 2);
    }

    #[test]
    fn test_grid_for_piece_count() {
        assert_eq!(GridSize::for_piece_count(0), 0);
        assert_eq!(GridSize::for_piece_count(4), 2);
        assert_eq!(GridSize::for_piece_count(8), 2);
        assert_eq!(GridSize::for_piece_count(144), 12);
    }
}
