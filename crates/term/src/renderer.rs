//! Terminal output.
//!
//! [`TerminalRenderer`] owns the terminal modes (raw mode, alternate screen, hidden
//! cursor, key event types where the terminal supports them) and restores them on
//! [`exit`](TerminalRenderer::exit) or on drop. Frames are
//! encoded into a byte buffer and written with a single flush: a full repaint for the
//! first frame or after a size change, otherwise only the cells that differ.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// The frame currently on screen.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
    active: bool,
    /// Release and repeat events were requested from the terminal.
    key_event_types: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
            active: false,
            key_event_types: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    ///
    /// Terminals with the keyboard enhancement protocol are also asked for release and
    /// repeat events, so held keys can be tracked exactly.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        // Pushed after switching screens: the alternate screen keeps its own flag stack.
        self.key_event_types = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.key_event_types {
            self.out.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.out.queue(terminal::SetTitle("FALLING BLOCKS"))?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.out.queue(cursor::Hide)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Does nothing when the terminal is not in game mode.
    pub fn exit(&mut self) -> Result<()> {
        if !std::mem::replace(&mut self.active, false) {
            return Ok(());
        }
        self.out.clear();
        if std::mem::replace(&mut self.key_event_types, false) {
            self.out.queue(PopKeyboardEnhancementFlags)?;
        }
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// True while the terminal reports key releases and repeats.
    pub fn reports_key_releases(&self) -> bool {
        self.key_event_types
    }

    /// Repaint everything on the next frame (after a resize, for example).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen.
    ///
    /// `fb` is swapped with the previously shown frame, so the caller keeps a buffer to
    /// render the next frame into and nothing is cloned.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let previous = self
            .shown
            .take()
            .filter(|prev| (prev.width(), prev.height()) == (fb.width(), fb.height()));
        match &previous {
            Some(prev) => encode_diff_into(prev, fb, &mut self.out)?,
            None => encode_full_into(fb, &mut self.out)?,
        }
        self.flush()?;

        let mut spare = previous.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encodes cells, skipping cursor moves and style changes that would be no-ops.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            cursor: None,
        }
    }

    fn paint(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            set_style(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full repaint of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for (x, cell) in fb.row(y).iter().enumerate() {
            painter.paint(x as u16, y, *cell)?;
        }
    }
    painter.finish()
}

/// Encode the cells of `next` that differ from `prev`. Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let changed = prev.row(y).iter().zip(next.row(y)).enumerate();
        for (x, (old, new)) in changed {
            if old != new {
                painter.paint(x as u16, y, *new)?;
            }
        }
    }
    painter.finish()
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn diff_moves_the_cursor_once_per_run() {
        let style = CellStyle::default();
        let prev = FrameBuffer::new(6, 2);
        let mut next = prev.clone();
        for x in 1..=3 {
            next.put_char(x, 0, '█', style);
        }
        next.put_char(5, 1, '0', style);

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let out = text(&out);

        // MoveTo is 1-based: row;column.
        assert!(out.contains("\x1b[1;2H"));
        assert!(out.contains("\x1b[2;6H"));
        assert_eq!(out.matches('H').count(), 2);
        assert_eq!(out.matches('█').count(), 3);
    }

    #[test]
    fn identical_frames_only_reset_style() {
        let fb = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();

        let mut expected = Vec::new();
        Painter::new(&mut expected).finish().unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn full_repaint_draws_every_cell() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 1, "abc", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let out = text(&out);
        assert!(out.contains("abc"));
        // One move per row: the cursor wraps are explicit.
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[2;1H"));
    }
}
