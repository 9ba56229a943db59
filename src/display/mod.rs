//! Rendering layer: all terminal output lives here.
//!
//! `TerminalCanvas` rasterises world-space shapes (800x600) onto the
//! terminal's cell grid and writes the finished grid with crossterm. A cell
//! is painted when its centre falls inside the shape; shapes too small to
//! cover any cell centre are drawn as a single glyph so nothing vanishes.

mod clock;
mod input;

pub use clock::FrameClock;
pub use input::{KeyTracker, TerminalInput, HOLD_WINDOW};

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::consts::{HEIGHT, WIDTH};
use crate::entities::{Rect, Rgb};
use crate::error::{GameError, Result};
use crate::platform::{Renderer, TextSize};

/// Smallest grid the HUD still fits on.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 15;

const TINY_CIRCLE: char = '•';
const TINY_RECT: char = '▪';
const TINY_POLYGON: char = '▴';
const OUTLINE_DOT: char = '·';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Cell {
    fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: Rgb(255, 255, 255),
            bg,
            bold: false,
        }
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    /// Re-read the terminal size at the start of every frame.
    follow_terminal: bool,
}

impl<W: Write> TerminalCanvas<W> {
    /// A canvas of a fixed size, independent of any real terminal.
    pub fn new(out: W, cols: u16, rows: u16) -> Result<Self> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        Ok(Self {
            out,
            cols,
            rows,
            cells: vec![Cell::blank(Rgb(0, 0, 0)); cols as usize * rows as usize],
            follow_terminal: false,
        })
    }

    /// A canvas sized to the current terminal that tracks later resizes.
    pub fn for_terminal(out: W) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::new(out, cols, rows)?;
        canvas.follow_terminal = true;
        Ok(canvas)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row as usize * self.cols as usize + col as usize])
        } else {
            None
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Grid is reallocated and blanked; the next frame repaints it.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        if (cols, rows) == (self.cols, self.rows) {
            return;
        }
        log::debug!("canvas resized to {}x{}", cols, rows);
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::blank(Rgb(0, 0, 0)); cols as usize * rows as usize];
    }

    // ── World <-> grid ────────────────────────────────────────────────────────

    fn scale(&self) -> (f32, f32) {
        (self.cols as f32 / WIDTH, self.rows as f32 / HEIGHT)
    }

    /// World-space centre of a cell.
    fn cell_center(&self, col: i32, row: i32) -> (f32, f32) {
        let (sx, sy) = self.scale();
        ((col as f32 + 0.5) / sx, (row as f32 + 0.5) / sy)
    }

    fn cell_at(&self, (x, y): (f32, f32)) -> (i32, i32) {
        let (sx, sy) = self.scale();
        ((x * sx).floor() as i32, (y * sy).floor() as i32)
    }

    /// Cells (inclusive, clipped to the grid) whose centres lie in `[lo, hi]`
    /// along one axis.
    fn span(lo: f32, hi: f32, scale: f32, len: u16) -> std::ops::RangeInclusive<i32> {
        let first = ((lo * scale - 0.5).ceil() as i32).max(0);
        let last = ((hi * scale - 0.5).floor() as i32).min(len as i32 - 1);
        first..=last
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32 {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    fn paint(&mut self, col: i32, row: i32, color: Rgb) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell {
                ch: ' ',
                fg: color,
                bg: color,
                bold: false,
            };
        }
    }

    /// Put a glyph in a cell, keeping whatever background is already there.
    fn glyph(&mut self, col: i32, row: i32, ch: char, color: Rgb, bold: bool) {
        if let Some(i) = self.index(col, row) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = color;
            cell.bold = bold;
        }
    }

    /// Paint every cell in the bounding box whose centre passes `inside`.
    /// Returns how many cells were painted.
    fn fill_where(
        &mut self,
        bbox: Rect,
        color: Rgb,
        inside: impl Fn((f32, f32)) -> bool,
    ) -> usize {
        let (sx, sy) = self.scale();
        let cols = Self::span(bbox.x, bbox.x + bbox.w, sx, self.cols);
        let rows = Self::span(bbox.y, bbox.y + bbox.h, sy, self.rows);
        let mut painted = 0;
        for row in rows {
            for col in cols.clone() {
                if inside(self.cell_center(col, row)) {
                    self.paint(col, row, color);
                    painted += 1;
                }
            }
        }
        painted
    }

    // ── Output ────────────────────────────────────────────────────────────────

    fn flush_grid(&mut self) -> std::io::Result<()> {
        let mut fg = None;
        let mut bg = None;
        let mut bold = false;

        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if fg != Some(cell.fg) {
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    self.out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                if bold != cell.bold {
                    let attr = if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    self.out.queue(style::SetAttribute(attr))?;
                    bold = cell.bold;
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// Even-odd rule.
fn point_in_polygon((px, py): (f32, f32), points: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl<W: Write> Renderer for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) {
        if self.follow_terminal {
            match terminal::size() {
                Ok((cols, rows)) => self.resize(cols, rows),
                Err(e) => log::warn!("could not read terminal size: {}", e),
            }
        }
        self.cells.fill(Cell::blank(color));
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let (mut min_x, mut min_y) = points[0];
        let (mut max_x, mut max_y) = points[0];
        for &(x, y) in &points[1..] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        if self.fill_where(bbox, color, |p| point_in_polygon(p, points)) == 0 {
            let n = points.len() as f32;
            let cx = points.iter().map(|p| p.0).sum::<f32>() / n;
            let cy = points.iter().map(|p| p.1).sum::<f32>() / n;
            let (col, row) = self.cell_at((cx, cy));
            self.glyph(col, row, TINY_POLYGON, color, false);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        if self.fill_where(rect, color, |_| true) == 0 {
            let (col, row) = self.cell_at(rect.center());
            self.glyph(col, row, TINY_RECT, color, false);
        }
    }

    /// Box-drawing outline. Rectangles less than two cells in either
    /// direction have no room for an outline and are left as they are.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        let (sx, sy) = self.scale();
        let (c0, r0) = ((rect.x * sx).round() as i32, (rect.y * sy).round() as i32);
        let (c1, r1) = (
            ((rect.x + rect.w) * sx).round() as i32 - 1,
            ((rect.y + rect.h) * sy).round() as i32 - 1,
        );
        if c1 <= c0 || r1 <= r0 {
            return;
        }
        for col in c0 + 1..c1 {
            self.glyph(col, r0, '─', color, false);
            self.glyph(col, r1, '─', color, false);
        }
        for row in r0 + 1..r1 {
            self.glyph(c0, row, '│', color, false);
            self.glyph(c1, row, '│', color, false);
        }
        self.glyph(c0, r0, '┌', color, false);
        self.glyph(c1, r0, '┐', color, false);
        self.glyph(c0, r1, '└', color, false);
        self.glyph(c1, r1, '┘', color, false);
    }

    fn fill_circle(&mut self, (cx, cy): (f32, f32), radius: f32, color: Rgb) {
        let bbox = Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let r2 = radius * radius;
        let painted = self.fill_where(bbox, color, |(x, y)| {
            let (dx, dy) = (x - cx, y - cy);
            dx * dx + dy * dy <= r2
        });
        if painted == 0 {
            let (col, row) = self.cell_at((cx, cy));
            self.glyph(col, row, TINY_CIRCLE, color, false);
        }
    }

    fn stroke_circle(&mut self, (cx, cy): (f32, f32), radius: f32, color: Rgb) {
        let (sx, sy) = self.scale();
        // Half a cell in world units along the coarser axis.
        let band = (0.5 / sx).max(0.5 / sy);
        let reach = radius + band;
        let cols = Self::span(cx - reach, cx + reach, sx, self.cols);
        let rows = Self::span(cy - reach, cy + reach, sy, self.rows);
        for row in rows {
            for col in cols.clone() {
                let (x, y) = self.cell_center(col, row);
                let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                if (d - radius).abs() <= band {
                    self.glyph(col, row, OUTLINE_DOT, color, true);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: (f32, f32), color: Rgb, size: TextSize) {
        let (col, row) = self.cell_at(pos);
        let bold = size == TextSize::Large;
        for (i, ch) in text.chars().enumerate() {
            self.glyph(col + i as i32, row, ch, color, bold);
        }
    }

    fn present(&mut self) -> Result<()> {
        self.flush_grid()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(255, 0, 0);
    const BLACK: Rgb = Rgb(0, 0, 0);

    /// 80x30 cells: every cell is exactly 10x20 world units.
    fn canvas() -> TerminalCanvas<Vec<u8>> {
        TerminalCanvas::new(Vec::new(), 80, 30).unwrap()
    }

    #[test]
    fn rejects_tiny_terminal() {
        let err = TerminalCanvas::new(Vec::new(), 20, 10).err().unwrap();
        assert!(matches!(err, GameError::TerminalTooSmall { cols: 20, rows: 10, .. }));
    }

    #[test]
    fn fill_rect_paints_cells_by_centre() {
        let mut c = canvas();
        c.clear(BLACK);
        // Covers x 0..30, y 0..40 → centres at x 5,15,25 and y 10,30.
        c.fill_rect(Rect::new(0.0, 0.0, 30.0, 40.0), RED);
        assert_eq!(c.cell(0, 0).unwrap().bg, RED);
        assert_eq!(c.cell(2, 1).unwrap().bg, RED);
        assert_eq!(c.cell(3, 0).unwrap().bg, BLACK);
        assert_eq!(c.cell(0, 2).unwrap().bg, BLACK);
    }

    #[test]
    fn tiny_rect_becomes_a_glyph() {
        let mut c = canvas();
        c.clear(BLACK);
        // 4 wide sits between cell centres at x=5 and x=15.
        c.fill_rect(Rect::new(6.0, 0.0, 4.0, 15.0), RED);
        let cell = c.cell(0, 0).unwrap();
        assert_eq!(cell.ch, TINY_RECT);
        assert_eq!(cell.fg, RED);
        assert_eq!(cell.bg, BLACK);
    }

    #[test]
    fn shapes_are_clipped_to_the_grid() {
        let mut c = canvas();
        c.clear(BLACK);
        c.fill_rect(Rect::new(-100.0, -100.0, 2000.0, 2000.0), RED);
        c.fill_circle((-50.0, -50.0), 3.0, RED);
        assert_eq!(c.cell(79, 29).unwrap().bg, RED);
        assert!(c.cell(80, 0).is_none());
    }

    #[test]
    fn polygon_uses_even_odd_fill() {
        let tri = [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)];
        assert!(point_in_polygon((10.0, 10.0), &tri));
        assert!(!point_in_polygon((90.0, 90.0), &tri));
    }

    #[test]
    fn text_keeps_background() {
        let mut c = canvas();
        c.clear(BLACK);
        c.fill_rect(Rect::new(0.0, 0.0, 100.0, 20.0), RED);
        c.draw_text("Hi", (0.0, 0.0), Rgb(1, 2, 3), TextSize::Large);
        let h = c.cell(0, 0).unwrap();
        assert_eq!((h.ch, h.bg, h.fg, h.bold), ('H', RED, Rgb(1, 2, 3), true));
        assert_eq!(c.cell(1, 0).unwrap().ch, 'i');
    }

    #[test]
    fn stroke_rect_draws_corners() {
        let mut c = canvas();
        c.clear(BLACK);
        c.stroke_rect(Rect::new(0.0, 0.0, 50.0, 60.0), RED);
        assert_eq!(c.cell(0, 0).unwrap().ch, '┌');
        assert_eq!(c.cell(4, 0).unwrap().ch, '┐');
        assert_eq!(c.cell(0, 2).unwrap().ch, '└');
        assert_eq!(c.cell(4, 2).unwrap().ch, '┘');
        assert_eq!(c.cell(2, 1).unwrap().ch, ' ');
    }

    #[test]
    fn present_writes_every_glyph() {
        let mut c = canvas();
        c.clear(BLACK);
        c.draw_text("SCORE", (0.0, 0.0), RED, TextSize::Small);
        c.present().unwrap();
        let bytes = c.into_inner();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("SCORE"));
    }

    #[test]
    fn resize_reallocates_grid() {
        let mut c = canvas();
        c.resize(100, 40);
        assert_eq!(c.size(), (100, 40));
        assert!(c.cell(99, 39).is_some());
    }
}
