//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layout is unit-tested directly. Board size comes from the
//! snapshot, so non-default widths and heights render without changes here.

use crate::core::{spawn_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{PieceKind, Rgb};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_W: u16 = 12;

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

/// Loop state that is not part of the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlay {
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up typical terminal glyphs.
        Self::new(2, 1)
    }
}

/// Top-left of the bordered board frame plus its size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let w = board_px_w.saturating_add(2);
        let h = board_px_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)));

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match PieceKind::from_color_id(id) {
                    Some(kind) => self.draw_block(fb, frame, x, y, kind),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                        self.fill_cell_rect(fb, frame, x, y, '·', dot);
                    }
                }
            }
        }

        if let Some(kind) = snap.piece_kind {
            for (x, y) in snap.active_cells() {
                if x >= 0 && y >= 0 && x < snap.width as i32 && y < snap.height as i32 {
                    self.draw_block(fb, frame, x as u16, y as u16, kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if overlay.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(kind.color(), BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        // Wide boards put cells past u16 range; those are off-screen anyway.
        let px = u32::from(frame.x) + 1 + u32::from(cell_x) * u32::from(self.cell_w);
        let py = u32::from(frame.y) + 1 + u32::from(cell_y) * u32::from(self.cell_h);
        let (Ok(px), Ok(py)) = (u16::try_from(px), u16::try_from(py)) else {
            return;
        };
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next_piece {
            Some(kind) => {
                let style = CellStyle::new(kind.color(), Rgb::new(0, 0, 0)).bold();
                for (dx, dy) in spawn_shape(kind) {
                    let px = panel_x.saturating_add(dx as u16 * 2);
                    let py = y.saturating_add(dy as u16);
                    fb.put_str(px, py, "██", style);
                }
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y = y.saturating_add(3);

        let hint = value.dim();
        fb.put_str(panel_x, y, "p pause", hint);
        fb.put_str(panel_x, y.saturating_add(1), "r restart", hint);
        fb.put_str(panel_x, y.saturating_add(2), "q quit", hint);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;

    fn snapshot(width: u16, height: u16) -> GameSnapshot {
        GameEngine::with_seed(width, height, 99)
            .unwrap()
            .snapshot(false)
    }

    fn count(fb: &FrameBuffer, ch: char) -> usize {
        fb.to_lines()
            .iter()
            .map(|line| line.chars().filter(|&c| c == ch).count())
            .sum()
    }

    #[test]
    fn frame_matches_board_size() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = snapshot(6, 8);
        let fb = view.render(&snap, Overlay::default(), Viewport::new(40, 12));

        // Frame is centered horizontally: (40 - 14) / 2 = 13.
        assert_eq!(fb.get(13, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(26, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(13, 9).unwrap().ch, '└');
    }

    #[test]
    fn active_piece_and_locked_cells_are_drawn() {
        let view = GameView::new(1, 1).with_anchor_y(AnchorY::Top);
        let mut snap = snapshot(10, 20);
        snap.next_piece = None;
        snap.board[19][0] = PieceKind::Z.color_id();

        let fb = view.render(&snap, Overlay::default(), Viewport::new(12, 22));
        // Four active cells plus one locked cell; the side panel does not fit.
        assert_eq!(count(&fb, '█'), 5);
        let locked = fb.get(1, 20).unwrap();
        assert_eq!(locked.ch, '█');
        assert_eq!(locked.style.fg, PieceKind::Z.color());
    }

    #[test]
    fn side_panel_shows_stats_and_next() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let mut snap = snapshot(10, 20);
        snap.score = 1200;
        let fb = view.render(&snap, Overlay::default(), Viewport::new(60, 22));
        let text = fb.to_lines().join("\n");

        assert!(text.contains("SCORE"));
        assert!(text.contains("1200"));
        assert!(text.contains("NEXT"));
        assert!(text.contains("LINES"));
    }

    #[test]
    fn overlays() {
        let view = GameView::default();
        let mut snap = snapshot(10, 20);
        let paused = view.render(&snap, Overlay { paused: true }, Viewport::new(40, 24));
        assert!(paused.to_lines().join("").contains("PAUSED"));

        snap.game_over = true;
        let over = view.render(&snap, Overlay::default(), Viewport::new(40, 24));
        let text = over.to_lines().join("");
        assert!(text.contains("GAME OVER"));
        assert!(!text.contains("PAUSED"));
    }

    #[test]
    fn very_wide_board_renders_clipped() {
        let view = GameView::default();
        let snap = GameEngine::with_seed(40_000, 20, 1)
            .unwrap()
            .snapshot(false);
        let fb = view.render(&snap, Overlay::default(), Viewport::new(120, 40));
        assert_eq!((fb.width(), fb.height()), (120, 40));

        let tall = GameEngine::with_seed(4, 40_000, 1).unwrap().snapshot(false);
        let fb = GameView::new(2, 2).render(&tall, Overlay::default(), Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let snap = snapshot(10, 20);
        let fb = view.render(&snap, Overlay::default(), Viewport::new(3, 2));
        assert_eq!((fb.width(), fb.height()), (3, 2));
    }
}
