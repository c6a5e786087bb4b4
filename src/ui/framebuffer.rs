//! Character-cell frame buffer and world-to-screen mapping.

use crate::models::geometry::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);

    /// Scale each channel by `factor` (clamped to 0..=1).
    pub fn dim(self, factor: f32) -> Rgb {
        let f = factor.clamp(0.0, 1.0);
        Rgb(
            (self.0 as f32 * f) as u8,
            (self.1 as f32 * f) as u8,
            (self.2 as f32 * f) as u8,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        bold: false,
    };

    pub fn new(ch: char, fg: Rgb) -> Self {
        Cell { ch, fg, ..Cell::BLANK }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

/// A grid of cells, row-major. Writes outside the grid are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        FrameBuffer {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, fg: Rgb) {
        self.set(x, y, Cell::new(ch, fg));
    }

    pub fn put_str(&mut self, x: i32, y: i32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(x + i as i32, y, ch, fg);
        }
    }

    pub fn put_str_bold(&mut self, x: i32, y: i32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            self.set(x + i as i32, y, Cell::new(ch, fg).bold());
        }
    }

    /// Write `text` horizontally centred on row `y`.
    pub fn put_centered(&mut self, y: i32, text: &str, fg: Rgb) {
        let len = text.chars().count() as i32;
        let x = (self.width as i32 - len) / 2;
        self.put_str(x, y, text, fg);
    }

    pub fn fill(&mut self, x: i32, y: i32, w: i32, h: i32, cell: Cell) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, cell);
            }
        }
    }

    /// Plain text of row `y`, for assertions.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Maps world pixels onto the cell rows below the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub world_width: f32,
    pub world_height: f32,
    pub cols: u16,
    pub rows: u16,
    /// First screen row used by the playfield.
    pub top: u16,
}

impl Viewport {
    pub fn new(world_width: f32, world_height: f32, cols: u16, rows: u16, top: u16) -> Self {
        Viewport {
            world_width,
            world_height,
            cols,
            rows,
            top,
        }
    }

    fn scale_x(&self) -> f32 {
        self.cols as f32 / self.world_width
    }

    fn scale_y(&self) -> f32 {
        self.rows as f32 / self.world_height
    }

    /// Cell containing the world point. May be off screen.
    pub fn to_cell(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x * self.scale_x()).floor() as i32,
            (p.y * self.scale_y()).floor() as i32 + self.top as i32,
        )
    }

    /// Cells covered by a world rectangle, at least one cell in each axis.
    pub fn rect_to_cells(&self, r: &Rect) -> (i32, i32, i32, i32) {
        let (x0, y0) = self.to_cell(Vec2::new(r.x, r.y));
        let (x1, y1) = self.to_cell(Vec2::new(r.right(), r.bottom()));
        let w = (x1 - x0).max(1);
        let h = (y1 - y0).max(1);
        (x0, y0, w, h)
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cols as i32 && y >= self.top as i32 && y < (self.top + self.rows) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_are_ignored() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(2, 0, "abcd", Rgb::WHITE);
        fb.put_char(-1, 1, 'x', Rgb::WHITE);
        assert_eq!(fb.row_text(0), "  ab");
        assert_eq!(fb.row_text(1), "    ");
    }

    #[test]
    fn centered_text() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.put_centered(0, "hi", Rgb::WHITE);
        assert_eq!(fb.row_text(0), "    hi    ");
        assert!(fb.contains_text("hi"));
    }

    #[test]
    fn viewport_maps_corners() {
        let vp = Viewport::new(800.0, 600.0, 80, 30, 1);
        assert_eq!(vp.to_cell(Vec2::ZERO), (0, 1));
        assert_eq!(vp.to_cell(Vec2::new(799.0, 599.0)), (79, 30));
        assert!(vp.is_visible(79, 30));
        assert!(!vp.is_visible(79, 31));
        assert!(!vp.is_visible(0, 0));
    }

    #[test]
    fn small_rects_cover_one_cell() {
        let vp = Viewport::new(800.0, 600.0, 80, 30, 0);
        let (_, _, w, h) = vp.rect_to_cells(&Rect::new(100.0, 100.0, 4.0, 12.0));
        assert_eq!((w, h), (1, 1));
        let (x, y, w, h) = vp.rect_to_cells(&Rect::new(100.0, 100.0, 120.0, 80.0));
        assert_eq!((x, y, w, h), (10, 5, 12, 4));
    }

    #[test]
    fn dim_scales_channels() {
        assert_eq!(Rgb(200, 100, 50).dim(0.5), Rgb(100, 50, 25));
    }
}
