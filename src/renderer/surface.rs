//! Cell-buffer display surface
//!
//! The simulation paints into anything implementing [`Surface`]. The host
//! decides how a finished buffer reaches the screen.

use serde::{Deserialize, Serialize};

use super::paint::PaintCommand;
use crate::ScreenSize;

/// Foreground colors the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Green,
    Red,
    Yellow,
}

/// A single character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        color: Color::White,
    };

    /// Full-block wall cell
    pub const fn solid(color: Color) -> Self {
        Self { glyph: '\u{2588}', color }
    }

    #[inline]
    pub fn is_blank(&self) -> bool {
        self.glyph == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Host display surface: a fixed grid of cells the core can paint and read back.
pub trait Surface {
    fn size(&self) -> ScreenSize;

    /// Fill the half-open rectangle `[x0, x1) × [y0, y1)`, clipped to the surface.
    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, cell: Cell);

    /// Write `text` left to right starting at `(x, y)`. Cells off the surface are skipped.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color);

    /// Read a cell back, `None` outside the surface.
    fn read_cell(&self, x: i32, y: i32) -> Option<Cell>;

    fn clear(&mut self) {
        let size = self.size();
        self.fill(0, 0, size.width, size.height, Cell::BLANK);
    }

    fn apply(&mut self, command: &PaintCommand) {
        match command {
            PaintCommand::Rect { x0, y0, x1, y1, cell } => self.fill(*x0, *y0, *x1, *y1, *cell),
            PaintCommand::Text { x, y, text, color } => self.draw_text(*x, *y, text, *color),
        }
    }

    fn apply_all(&mut self, commands: &[PaintCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// In-memory cell buffer, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellBuffer {
    size: ScreenSize,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub fn new(size: ScreenSize) -> Self {
        let len = (size.width.max(0) * size.height.max(0)) as usize;
        Self {
            size,
            cells: vec![Cell::BLANK; len],
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y * self.size.width + x) as usize)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.width.max(1) as usize)
    }

    /// Glyphs of one row as a string (handy for tests and logging)
    pub fn row_text(&self, y: i32) -> String {
        (0..self.size.width)
            .filter_map(|x| self.read_cell(x, y))
            .map(|c| c.glyph)
            .collect()
    }

    /// Number of non-blank cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_blank()).count()
    }
}

impl Surface for CellBuffer {
    fn size(&self) -> ScreenSize {
        self.size
    }

    fn fill(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, cell: Cell) {
        let x0 = x0.clamp(0, self.size.width);
        let x1 = x1.clamp(0, self.size.width);
        let y0 = y0.clamp(0, self.size.height);
        let y1 = y1.clamp(0, self.size.height);
        for y in y0..y1 {
            let row = (y * self.size.width) as usize;
            for x in x0..x1 {
                self.cells[row + x as usize] = cell;
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        for (i, glyph) in text.chars().enumerate() {
            if let Some(idx) = self.index(x + i as i32, y) {
                self.cells[idx] = Cell { glyph, color };
            }
        }
    }

    fn read_cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }
}
