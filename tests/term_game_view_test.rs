use tile_swap::core::{GameConfig, GameState};
use tile_swap::term::{AnchorY, FrameBuffer, GameView, Viewport};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn game(grid: u8) -> GameState {
    let mut game = GameState::new(GameConfig::default().with_grid_size(grid).with_seed(6)).unwrap();
    game.start();
    game
}

#[test]
fn term_view_renders_border_corners() {
    let snap = game(3).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);
    let layout = view.layout(&snap, vp);

    let right = layout.x + layout.frame_w() - 1;
    let bottom = layout.y + layout.frame_h() - 1;
    assert_eq!(layout.y, 0);
    assert_eq!(fb.get(layout.x, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(right, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(layout.x, bottom).unwrap().ch, '└');
    assert_eq!(fb.get(right, bottom).unwrap().ch, '┘');
}

#[test]
fn term_view_side_panel_shows_run() {
    let snap = game(2).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(80, 40));
    let text = screen_text(&fb);

    assert!(text.contains("LEVEL"));
    assert!(text.contains("5:00 / 5:00"));
    assert!(text.contains("0 / 6"));
    assert!(text.contains("PREVIEWS"));
    assert!(text.contains("Cat"));
}

#[test]
fn term_view_pointer_maps_back_to_slots() {
    let snap = game(4).snapshot();
    let view = GameView::default();
    let layout = view.layout(&snap, Viewport::new(100, 30));

    for position in 0..16u16 {
        let (x, y) = layout.tile_origin(position);
        assert_eq!(layout.position_at(x, y), Some(position));
        assert_eq!(
            layout.position_at(x + layout.tile_w - 1, y + layout.tile_h - 1),
            Some(position)
        );
    }
    // The border itself is not a slot.
    assert_eq!(layout.position_at(layout.x, layout.y + 1), None);
    assert_eq!(layout.position_at(layout.x + layout.frame_w() - 1, layout.y + 1), None);
}

#[test]
fn term_view_preview_shows_solved_order() {
    let mut game = game(2);
    assert!(game.request_preview());
    let snap = game.snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let fb = view.render(&snap, vp);
    let layout = view.layout(&snap, vp);

    for position in 0..4u16 {
        let (x, y) = layout.tile_origin(position);
        let row = fb.row_text(y + layout.tile_h / 2);
        let tile: String = row
            .chars()
            .skip(x as usize)
            .take(layout.tile_w as usize)
            .collect();
        assert_eq!(tile.trim(), (position + 1).to_string());
    }
}

#[test]
fn term_view_overlays_follow_status() {
    let view = GameView::default();
    let vp = Viewport::new(80, 24);

    let mut game = game(2);
    game.toggle_pause();
    assert!(screen_text(&view.render(&game.snapshot(), vp)).contains("PAUSED"));
    game.toggle_pause();

    for id in 0..4u16 {
        let target = game.board().piece(id).unwrap().correct_position;
        game.apply_move(id, target);
    }
    assert!(screen_text(&view.render(&game.snapshot(), vp)).contains("SOLVED!"));

    game.tick(16);
    let text = screen_text(&view.render(&game.snapshot(), vp));
    assert!(text.contains("Excellent"));
    assert!(text.contains("press n to continue"));
}
