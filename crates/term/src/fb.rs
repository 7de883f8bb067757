//! Framebuffer of styled character cells.

pub use crate::types::Rgb;

/// Colors and attributes of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Row-major grid of cells. Writes outside the buffer are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the dimensions. Contents are unspecified afterwards; callers clear.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) != (width, height) {
            self.width = width;
            self.height = height;
            self.cells
                .resize(width as usize * height as usize, Cell::default());
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`; empty when `y` is outside the buffer.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    /// Write `s` left to right; returns the column after the last character.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            self.put_char(cx, y, ch, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Write `value` zero-padded to at least `digits` characters without allocating.
    /// Returns the number of characters written.
    pub fn put_counter(&mut self, x: u16, y: u16, value: u32, digits: u16, style: CellStyle) -> u16 {
        let mut width = 1u16;
        let mut rest = value / 10;
        while rest > 0 {
            width += 1;
            rest /= 10;
        }
        let width = width.max(digits);

        let mut rest = value;
        for i in (0..width).rev() {
            let digit = char::from(b'0' + (rest % 10) as u8);
            self.put_char(x.saturating_add(i), y, digit, style);
            rest /= 10;
        }
        width
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for cy in y..y.saturating_add(h) {
            for cx in x..x.saturating_add(w) {
                self.put_char(cx, cy, ch, style);
            }
        }
    }

    /// Single-line box outline covering `w` x `h` cells.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));
        for cx in x + 1..right {
            self.put_char(cx, y, '─', style);
            self.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            self.put_char(x, cy, '│', style);
            self.put_char(right, cy, '│', style);
        }
        self.put_char(x, y, '┌', style);
        self.put_char(right, y, '┐', style);
        self.put_char(x, bottom, '└', style);
        self.put_char(right, bottom, '┘', style);
    }

    /// Row `y` as plain text, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_zero_padded() {
        let mut fb = FrameBuffer::new(10, 1);
        assert_eq!(fb.put_counter(0, 0, 555, 6, CellStyle::default()), 6);
        assert_eq!(fb.row_text(0), "000555    ");
    }

    #[test]
    fn counters_grow_past_the_padding() {
        let mut fb = FrameBuffer::new(10, 1);
        assert_eq!(fb.put_counter(1, 0, 1_234_567, 6, CellStyle::default()), 7);
        assert_eq!(fb.row_text(0), " 1234567  ");
    }

    #[test]
    fn writes_are_clipped() {
        let mut fb = FrameBuffer::new(4, 2);
        let end = fb.put_str(2, 1, "abcdef", CellStyle::default());
        assert_eq!(end, 8);
        assert_eq!(fb.row_text(1), "  ab");
        assert!(fb.row(2).is_empty());
    }

    #[test]
    fn box_corners() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.draw_box(0, 0, 4, 3, CellStyle::default());
        assert_eq!(fb.row_text(0), "┌──┐");
        assert_eq!(fb.row_text(1), "│  │");
        assert_eq!(fb.row_text(2), "└──┘");
    }
}
