//! Flushes frame buffers to a terminal, sending only cells that changed.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use super::framebuffer::{Cell, FrameBuffer, Rgb};

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

#[derive(Default)]
pub struct TerminalRenderer {
    previous: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer { previous: None }
    }

    /// Forget the last frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Draw `frame` to `out`. Returns the number of cells written.
    pub fn draw<W: Write>(&mut self, out: &mut W, frame: &FrameBuffer) -> io::Result<usize> {
        let full = match &self.previous {
            Some(prev) => prev.width() != frame.width() || prev.height() != frame.height(),
            None => true,
        };

        let width = frame.width() as usize;
        let mut written = 0;
        let mut style: Option<(Rgb, Rgb, bool)> = None;
        let mut cursor: Option<(u16, u16)> = None;

        for (i, cell) in frame.cells().iter().enumerate() {
            if !full {
                if let Some(prev) = &self.previous {
                    if prev.cells()[i] == *cell {
                        continue;
                    }
                }
            }
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            if cursor != Some((x, y)) {
                queue!(out, MoveTo(x, y))?;
            }
            Self::apply_style(out, cell, &mut style)?;
            queue!(out, Print(cell.ch))?;
            cursor = Some((x + 1, y));
            written += 1;
        }

        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
        out.flush()?;
        self.previous = Some(frame.clone());
        Ok(written)
    }

    fn apply_style<W: Write>(
        out: &mut W,
        cell: &Cell,
        current: &mut Option<(Rgb, Rgb, bool)>,
    ) -> io::Result<()> {
        let wanted = (cell.fg, cell.bg, cell.bold);
        if *current == Some(wanted) {
            return Ok(());
        }
        let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
        queue!(
            out,
            SetAttribute(attr),
            SetForegroundColor(color(cell.fg)),
            SetBackgroundColor(color(cell.bg))
        )?;
        *current = Some(wanted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_draws_every_cell() {
        let mut renderer = TerminalRenderer::new();
        let fb = FrameBuffer::new(5, 3);
        let mut out = Vec::new();
        assert_eq!(renderer.draw(&mut out, &fb).unwrap(), 15);
        assert!(!out.is_empty());
    }

    #[test]
    fn unchanged_frame_draws_nothing() {
        let mut renderer = TerminalRenderer::new();
        let mut fb = FrameBuffer::new(5, 3);
        let mut out = Vec::new();
        renderer.draw(&mut out, &fb).unwrap();
        assert_eq!(renderer.draw(&mut out, &fb).unwrap(), 0);

        fb.put_str(1, 1, "ab", Rgb::RED);
        assert_eq!(renderer.draw(&mut out, &fb).unwrap(), 2);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let mut renderer = TerminalRenderer::new();
        let mut out = Vec::new();
        renderer.draw(&mut out, &FrameBuffer::new(5, 3)).unwrap();
        assert_eq!(renderer.draw(&mut out, &FrameBuffer::new(4, 3)).unwrap(), 12);
        renderer.invalidate();
        assert_eq!(renderer.draw(&mut out, &FrameBuffer::new(4, 3)).unwrap(), 12);
    }
}
