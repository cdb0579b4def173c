//! Board invariants exercised through the public API

use tile_swap::core::{generate, Board, PuzzleError, SimpleRng};
use tile_swap::types::{ImageRef, SolvabilityPolicy};

fn correct_pieces(board: &Board) -> u16 {
    board.pieces().iter().filter(|p| p.is_correct()).count() as u16
}

#[test]
fn test_random_moves_keep_bijection_and_count() {
    let mut rng = SimpleRng::new(2024);
    let mut board = Board::shuffled(6, ImageRef(3), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
    let n = board.len() as u32;

    for _ in 0..2000 {
        let piece = rng.next_range(n) as u16;
        let target = rng.next_range(n) as u16;
        let before = *board.piece(piece).unwrap();
        match board.apply_move(piece, target) {
            Some(result) => {
                assert_eq!(result.from, before.current_position);
                assert_eq!(result.to, target);
                assert_eq!(board.piece(result.displaced).unwrap().current_position, result.from);
                assert_eq!(board.piece_at(target).unwrap().id, piece);
            }
            None => assert_eq!(target, before.current_position),
        }
        assert!(board.check_bijection());
        assert_eq!(board.correct_count(), correct_pieces(&board));
    }
}

#[test]
fn test_placing_every_piece_completes_board() {
    let mut rng = SimpleRng::new(5);
    let mut board = Board::shuffled(4, ImageRef(1), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
    assert!(!board.is_complete());

    let mut completed = 0;
    for id in 0..board.len() as u16 {
        let target = board.piece(id).unwrap().correct_position;
        if let Some(result) = board.apply_move(id, target) {
            assert!(result.was_correct);
            if result.completed {
                completed += 1;
            }
        }
    }
    assert!(board.is_complete());
    assert_eq!(completed, 1);
}

#[test]
fn test_invalid_moves_leave_board_untouched() {
    let mut rng = SimpleRng::new(11);
    let mut board = Board::shuffled(3, ImageRef(1), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
    let before = board.clone();

    assert!(board.apply_move(99, 0).is_none());
    assert!(board.apply_move(0, 9).is_none());
    let own = board.piece(4).unwrap().current_position;
    assert!(board.apply_move(4, own).is_none());
    assert_eq!(board, before);
}

#[test]
fn test_from_pieces_rejects_broken_permutations() {
    let pieces = generate(3, ImageRef(1)).unwrap();

    let mut dup_current = pieces.clone();
    dup_current[1].current_position = dup_current[0].current_position;
    assert!(matches!(
        Board::from_pieces(3, &dup_current),
        Err(PuzzleError::StateCorruption(_))
    ));

    let mut out_of_range = pieces.clone();
    out_of_range[8].current_position = 9;
    assert!(matches!(
        Board::from_pieces(3, &out_of_range),
        Err(PuzzleError::StateCorruption(_))
    ));

    assert!(matches!(
        Board::from_pieces(3, &pieces[..8]),
        Err(PuzzleError::StateCorruption(_))
    ));

    assert!(matches!(
        Board::from_pieces(13, &pieces),
        Err(PuzzleError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_from_pieces_accepts_any_order() {
    let mut rng = SimpleRng::new(77);
    let board = Board::shuffled(5, ImageRef(4), &mut rng, SolvabilityPolicy::FreeSwap).unwrap();
    let mut pieces = board.pieces().to_vec();
    pieces.reverse();

    let rebuilt = Board::from_pieces(5, &pieces).unwrap();
    assert_eq!(rebuilt, board);
}

#[test]
fn test_background_positions_span_image() {
    let pieces = generate(4, ImageRef(1)).unwrap();
    assert_eq!(pieces[0].background_position(4), (0.0, 0.0));
    let (x, y) = pieces[15].background_position(4);
    assert!((x - 100.0).abs() < 1e-3 && (y - 100.0).abs() < 1e-3);
    let (x, y) = pieces[6].background_position(4);
    assert!((x - 200.0 / 3.0).abs() < 1e-3);
    assert!((y - 100.0 / 3.0).abs() < 1e-3);
}
