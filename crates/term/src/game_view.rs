//! GameView: draws a [`GameSnapshot`] into a [`FrameBuffer`].
//!
//! Pure and allocation-free once the framebuffer has its size. Layout:
//!
//! ```text
//! ┌────────────────────────┐  TOP
//! │· · · · · · · · · · · · │  000120
//! │                        │
//! │       playfield        │  SCORE ...
//! │     12 x 24 cells      │
//! │                        │  NEXT
//! │                        │  ┌────────────┐
//! └────────────────────────┘  └────────────┘
//! ```

use crate::core::{GameSnapshot, PreviewSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{COUNTER_DIGITS, GRID_HEIGHT, GRID_WIDTH};

/// Inner size of the next-piece box, in grid cells.
const PREVIEW_COLS: u16 = 6;
const PREVIEW_ROWS: u16 = 4;
/// Narrowest side panel worth drawing.
const MIN_PANEL_WIDTH: u16 = 12;

const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);
const FRAME: CellStyle = CellStyle::new(WHITE, BLACK);
const LABEL: CellStyle = CellStyle::new(WHITE, BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
const HINT: CellStyle = CellStyle::new(Rgb::new(140, 140, 140), BLACK).dim();
const EMPTY: CellStyle = CellStyle::new(Rgb::new(70, 70, 70), BLACK).dim();

const HINTS: [&str; 5] = [
    "A/D   MOVE",
    "SPACE ROTATE",
    "S     DROP",
    "R     RESTART",
    "Q     QUIT",
];

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

/// Vertical placement of the playfield inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per grid cell.
    cell_w: u16,
    /// Terminal rows per grid cell.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keeps blocks roughly square in most terminal fonts.
        Self::new(2, 1)
    }
}

/// Where the parts of the screen go for one frame.
struct Layout {
    /// Top-left corner of the playfield border.
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
    /// Left edge of the side panel, when it fits.
    panel_x: Option<u16>,
}

fn on_grid(&(x, y): &(i16, i16)) -> bool {
    (0..GRID_WIDTH as i16).contains(&x) && (0..GRID_HEIGHT as i16).contains(&y)
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered playfield in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let (frame_w, frame_h) = self.frame_size();
        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let panel_x = frame_x.saturating_add(frame_w).saturating_add(2);
        let panel_fits = viewport.width.saturating_sub(panel_x) >= MIN_PANEL_WIDTH;
        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel_x: panel_fits.then_some(panel_x),
        }
    }

    /// Render into a reused framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        fb.draw_box(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            FRAME,
        );

        let origin = (layout.frame_x + 1, layout.frame_y + 1);
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let pos = (x as u16, y as u16);
                match cell {
                    Some(color) => self.block(fb, origin, pos, *color),
                    None => self.cell_rect(fb, origin, pos, '·', EMPTY),
                }
            }
        }

        if let Some(active) = &snap.active {
            for &(x, y) in active.cells.iter().filter(|c| on_grid(c)) {
                self.block(fb, origin, (x as u16, y as u16), active.color);
            }
        }

        if let Some(panel_x) = layout.panel_x {
            self.side_panel(fb, snap, panel_x, layout.frame_y, viewport.height);
        }

        if snap.game_over {
            let mid = layout.frame_y + layout.frame_h / 2;
            for (dy, text) in [(0, "GAME OVER"), (2, "R TO RESTART")] {
                let w = text.chars().count() as u16;
                let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
                fb.put_str(x, mid + dy, text, LABEL);
            }
        }
    }

    /// Allocate a framebuffer and render into it.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn block(&self, fb: &mut FrameBuffer, origin: (u16, u16), pos: (u16, u16), color: Rgb) {
        self.cell_rect(fb, origin, pos, '█', CellStyle::new(color, BLACK).bold());
    }

    fn cell_rect(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        pos: (u16, u16),
        ch: char,
        style: CellStyle,
    ) {
        let x = origin.0 + pos.0 * self.cell_w;
        let y = origin.1 + pos.1 * self.cell_h;
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ch, style);
    }

    fn side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16, bottom: u16) {
        let mut y = top;
        for (label, value) in [
            ("TOP", snap.high_score),
            ("SCORE", snap.score),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_counter(x, y + 1, value, COUNTER_DIGITS as u16, VALUE);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", LABEL);
        let box_w = PREVIEW_COLS * self.cell_w + 2;
        let box_h = PREVIEW_ROWS * self.cell_h + 2;
        fb.draw_box(x, y + 1, box_w, box_h, FRAME);
        if let Some(next) = &snap.next {
            self.preview(fb, (x + 1, y + 2), next);
        }
        y += box_h + 2;

        for line in HINTS {
            if y >= bottom {
                break;
            }
            fb.put_str(x, y, line, HINT);
            y += 1;
        }
    }

    /// Next piece, centered in the preview box.
    fn preview(&self, fb: &mut FrameBuffer, origin: (u16, u16), next: &PreviewSnapshot) {
        let pad_x = PREVIEW_COLS.saturating_sub(next.size.0 as u16) / 2;
        let pad_y = PREVIEW_ROWS.saturating_sub(next.size.1 as u16) / 2;
        for &(cx, cy) in &next.cells {
            let pos = (pad_x + cx as u16, pad_y + cy as u16);
            self.block(fb, origin, pos, next.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    #[test]
    fn frame_size_accounts_for_border() {
        assert_eq!(GameView::default().frame_size(), (26, 26));
        assert_eq!(GameView::new(1, 1).frame_size(), (14, 26));
    }

    #[test]
    fn narrow_viewport_skips_side_panel() {
        let view = GameView::default();
        assert!(view.layout(Viewport::new(26, 26)).panel_x.is_none());
        assert_eq!(view.layout(Viewport::new(60, 26)).panel_x, Some(45));
    }

    #[test]
    fn preview_is_centered() {
        let snap = GameSnapshot {
            next: Some(PreviewSnapshot {
                kind: ShapeKind::O,
                color: Rgb::new(1, 2, 3),
                cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
                size: (2, 2),
            }),
            ..GameSnapshot::default()
        };
        let fb = GameView::default().render(&snap, Viewport::new(60, 26));
        // Panel at x=45; the box interior starts at (46, 11).
        // A 2x2 piece in a 6x4 box is padded by (2, 1) cells.
        let cell = fb.get(46 + 2 * 2, 11 + 1).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::new(1, 2, 3));
    }
}
