//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Terminals cannot show the puzzle photo, so every image gets a two-colour
//! palette and each tile is painted with the blend at its home offset inside
//! the picture. A solved board therefore shows one smooth gradient, and each
//! tile also carries its home number.

use crate::core::{Catalog, GameSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ImageRef, Rating, Status, MAX_INCORRECT_MOVES};

/// Columns reserved for the side panel.
const PANEL_W: u16 = 24;

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board landed on screen, for mapping pointer events back to slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left of the frame (border included).
    pub x: u16,
    pub y: u16,
    pub tile_w: u16,
    pub tile_h: u16,
    pub grid: u16,
}

impl BoardLayout {
    pub fn frame_w(&self) -> u16 {
        self.grid * self.tile_w + 2
    }

    pub fn frame_h(&self) -> u16 {
        self.grid * self.tile_h + 2
    }

    /// Screen origin of the tile at `position`.
    pub fn tile_origin(&self, position: u16) -> (u16, u16) {
        let col = position % self.grid.max(1);
        let row = position / self.grid.max(1);
        (
            self.x + 1 + col * self.tile_w,
            self.y + 1 + row * self.tile_h,
        )
    }

    /// Board position under terminal cell `(col, row)`, if any.
    pub fn position_at(&self, col: u16, row: u16) -> Option<u16> {
        if self.grid == 0 || col <= self.x || row <= self.y {
            return None;
        }
        let bx = (col - self.x - 1) / self.tile_w.max(1);
        let by = (row - self.y - 1) / self.tile_h.max(1);
        if bx >= self.grid || by >= self.grid {
            return None;
        }
        Some(by * self.grid + bx)
    }
}

/// A lightweight terminal renderer for the puzzle board.
pub struct GameView {
    catalog: Catalog,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Fit the board into the viewport, leaving room for the side panel.
    ///
    /// Tiles are roughly twice as wide as tall to compensate for the glyph
    /// aspect ratio.
    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardLayout {
        let grid = (snap.grid_size as u16).max(1);
        let avail_w = viewport.width.saturating_sub(PANEL_W + 2 + 2);
        let avail_h = viewport.height.saturating_sub(2);

        let tile_h = (avail_h / grid).clamp(1, 5);
        let tile_w = (avail_w / grid).min(tile_h * 2 + 1).max(2);

        let frame_w = grid * tile_w + 2;
        let frame_h = grid * tile_h + 2;
        let total_w = frame_w + 2 + PANEL_W;

        BoardLayout {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            tile_w,
            tile_h,
            grid,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap, viewport);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w() - 2,
            layout.frame_h() - 2,
            ' ',
            CellStyle::plain(BOARD_BG, BOARD_BG),
        );
        fb.draw_box(layout.x, layout.y, layout.frame_w(), layout.frame_h(), border);

        let palette = image_palette(snap.image);
        if snap.preview_active() {
            // The solved picture: every slot shows the tile that belongs there.
            for position in 0..snap.tile_count {
                let tile = TileSnapshot {
                    piece_id: position,
                    correct_position: position,
                    correct: true,
                };
                self.draw_tile(fb, &layout, position, &tile, palette, TileMark::None);
            }
        } else {
            for (position, tile) in snap.tiles().iter().enumerate() {
                let position = position as u16;
                let mark = if snap.held == Some(tile.piece_id) {
                    TileMark::Held
                } else if snap.playable() && position == snap.cursor {
                    TileMark::Cursor
                } else {
                    TileMark::None
                };
                self.draw_tile(fb, &layout, position, tile, palette, mark);
            }
            if snap.held.is_some() && snap.playable() {
                self.draw_drop_target(fb, &layout, snap.cursor);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if let Some(lines) = overlay_lines(snap) {
            self.draw_overlay(fb, &layout, lines);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        position: u16,
        tile: &TileSnapshot,
        palette: (Rgb, Rgb),
        mark: TileMark,
    ) {
        let (px, py) = layout.tile_origin(position);
        let color = tile_color(palette, tile.correct_position, layout.grid);
        let fg = if color.luma() > 140 {
            Rgb::new(20, 20, 20)
        } else {
            Rgb::new(240, 240, 240)
        };
        let style = CellStyle {
            fg,
            bg: color,
            bold: tile.correct,
            dim: mark == TileMark::Held,
        };

        let fill = if mark == TileMark::Held { '░' } else { ' ' };
        fb.fill_rect(px, py, layout.tile_w, layout.tile_h, fill, style);

        let mid = py + layout.tile_h / 2;
        let mut label_buf = [0u8; 3];
        let label = number_label(tile.correct_position as u32 + 1, &mut label_buf);
        if layout.tile_w >= 3 {
            fb.put_centered(px, mid, layout.tile_w, label, style);
        }

        if mark == TileMark::Cursor && layout.tile_w >= 2 {
            let cursor = CellStyle { bold: true, ..style };
            fb.put_char(px, mid, '[', cursor);
            fb.put_char(px + layout.tile_w - 1, mid, ']', cursor);
        }
    }

    fn draw_drop_target(&self, fb: &mut FrameBuffer, layout: &BoardLayout, position: u16) {
        let (px, py) = layout.tile_origin(position);
        let mid = py + layout.tile_h / 2;
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(200, 60, 60),
            bold: true,
            dim: false,
        };
        fb.put_char(px, mid, '>', style);
        fb.put_char(px + layout.tile_w - 1, mid, '<', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.frame_w()).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: PANEL_BG,
            bold: true,
            dim: false,
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let warn = CellStyle::plain(Rgb::new(240, 90, 90), PANEL_BG);

        let mut y = layout.y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.level, value);
        y += 2;

        fb.put_str(panel_x, y, "TIME", label);
        y += 1;
        let time_style = if snap.time_remaining <= 10 { warn } else { value };
        let x = fb.put_clock(panel_x, y, snap.time_remaining, time_style);
        let x = fb.put_str(x, y, " / ", value);
        fb.put_clock(x, y, snap.time_budget, value);
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.total_score, value);
        if snap.level_score > 0 {
            let x = fb.put_str(panel_x + 8, y, "last ", value);
            fb.put_u32(x, y, snap.level_score, value);
        }
        y += 2;

        fb.put_str(panel_x, y, "MISTAKES", label);
        y += 1;
        let mistakes_style = if snap.incorrect_moves > MAX_INCORRECT_MOVES {
            warn
        } else {
            value
        };
        let x = fb.put_u32(panel_x, y, snap.incorrect_moves, mistakes_style);
        let x = fb.put_str(x, y, " / ", value);
        fb.put_u32(x, y, MAX_INCORRECT_MOVES, value);
        y += 2;

        fb.put_str(panel_x, y, "PREVIEWS", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.preview_points, value);
        y += 2;

        fb.put_str(panel_x, y, "PLACED", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.correct_count as u32, value);
        let x = fb.put_str(x, y, " / ", value);
        fb.put_u32(x, y, snap.tile_count as u32, value);
        y += 2;

        fb.put_str(panel_x, y, "IMAGE", label);
        y += 1;
        let name = self
            .catalog
            .by_image(snap.image)
            .map(|e| e.label)
            .unwrap_or("-");
        fb.put_str(panel_x, y, name, value);
        y += 2;

        if snap.consecutive_failures > 0 {
            fb.put_str(panel_x, y, "FAILED IN A ROW", label);
            y += 1;
            fb.put_u32(panel_x, y, snap.consecutive_failures, warn);
            y += 2;
        }

        if y < viewport.height {
            let dim = CellStyle { dim: true, ..value };
            fb.put_str(panel_x, y, "enter pick/drop  v preview", dim);
            fb.put_str(panel_x, y + 1, "p pause  r restart  q quit", dim);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &BoardLayout, lines: OverlayLines) {
        let text = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let hint = CellStyle {
            bold: false,
            ..text
        };

        let mid_y = layout.y.saturating_add(layout.frame_h() / 2);
        fb.put_centered(layout.x, mid_y.saturating_sub(1), layout.frame_w(), lines.title, text);
        if let Some(detail) = lines.detail {
            fb.put_centered(layout.x, mid_y, layout.frame_w(), detail, hint);
        }
        if let Some(action) = lines.action {
            fb.put_centered(layout.x, mid_y.saturating_add(1), layout.frame_w(), action, hint);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileMark {
    None,
    Cursor,
    Held,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OverlayLines {
    title: &'static str,
    detail: Option<&'static str>,
    action: Option<&'static str>,
}

fn overlay_lines(snap: &GameSnapshot) -> Option<OverlayLines> {
    if snap.paused {
        return Some(OverlayLines {
            title: "PAUSED",
            detail: None,
            action: Some("press p to resume"),
        });
    }
    if snap.resolving || snap.status == Status::Completed {
        return Some(OverlayLines {
            title: "SOLVED!",
            detail: None,
            action: None,
        });
    }
    if snap.preview_active() {
        return None;
    }

    let progress_reset = snap.level == 1 && snap.consecutive_failures == 0;
    let lines = match snap.status {
        Status::Playing | Status::Completed => return None,
        Status::Failed => OverlayLines {
            title: "TIME'S UP",
            detail: Some(if progress_reset {
                "three failures, back to level 1"
            } else {
                "the level starts over"
            }),
            action: Some("press n to continue"),
        },
        Status::TryAgain => OverlayLines {
            title: Rating::TryAgain.as_str(),
            detail: Some(if progress_reset {
                "three failures, back to level 1"
            } else {
                "the level starts over"
            }),
            action: Some("press n to continue"),
        },
        Status::Excellent | Status::Good | Status::CanDoBetter => OverlayLines {
            title: snap.last_rating.map(|r| r.as_str()).unwrap_or("Level complete"),
            detail: Some("on to the next level"),
            action: Some("press n to continue"),
        },
    };
    Some(lines)
}

/// Colours the top-left and bottom-right corners of each catalog image blend
/// between.
pub fn image_palette(image: ImageRef) -> (Rgb, Rgb) {
    match image.id() {
        1 => (Rgb::new(240, 180, 110), Rgb::new(90, 60, 40)),
        2 => (Rgb::new(150, 210, 120), Rgb::new(20, 70, 35)),
        3 => (Rgb::new(200, 230, 255), Rgb::new(30, 80, 170)),
        4 => (Rgb::new(250, 200, 90), Rgb::new(110, 40, 110)),
        5 => (Rgb::new(180, 240, 240), Rgb::new(20, 90, 100)),
        _ => (Rgb::new(220, 220, 220), Rgb::new(60, 60, 60)),
    }
}

/// Blend for the tile whose home is `correct_position`, using the same offsets
/// as a CSS `background-position` of `col / (grid - 1)`.
pub fn tile_color(palette: (Rgb, Rgb), correct_position: u16, grid: u16) -> Rgb {
    if grid <= 1 {
        return palette.0;
    }
    let col = (correct_position % grid) as f32;
    let row = (correct_position / grid) as f32;
    let span = (grid - 1) as f32;
    // Diagonal gradient: weight rows and columns equally.
    palette.0.lerp(palette.1, (col + row) / (2.0 * span))
}

fn number_label(n: u32, buf: &mut [u8; 3]) -> &str {
    let n = n.min(999);
    let mut len = 0;
    if n >= 100 {
        buf[len] = b'0' + (n / 100) as u8;
        len += 1;
    }
    if n >= 10 {
        buf[len] = b'0' + (n / 10 % 10) as u8;
        len += 1;
    }
    buf[len] = b'0' + (n % 10) as u8;
    len += 1;
    std::str::from_utf8(&buf[..len]).unwrap_or("?")
}
