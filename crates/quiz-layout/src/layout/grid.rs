//! Cell layout calculation
//!
//! This module splits the content area of a page into one cell per
//! question, for each of the three sub-layouts.

use super::{LayoutKind, Rect};

// =============================================================================
// Grid Geometry
// =============================================================================

/// Column-major grid over a rectangular band
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_width_pt: f32,
    pub cell_height_pt: f32,
    pub gutter_pt: f32,
    /// Bottom-left corner of the band
    pub origin: (f32, f32),
}

impl GridLayout {
    /// Grid over `area` with room for at least `count` cells.
    ///
    /// Rows grow past `min_rows` only when `count` does not fit.
    pub fn new(area: &Rect, count: usize, cols: usize, min_rows: usize, gutter_pt: f32) -> Self {
        let rows = min_rows.max(count.div_ceil(cols));
        let cell_width_pt = (area.width - gutter_pt * (cols - 1) as f32) / cols as f32;
        let cell_height_pt = area.height / rows as f32;

        Self {
            cols,
            rows,
            cell_width_pt,
            cell_height_pt,
            gutter_pt,
            origin: (area.x, area.y),
        }
    }

    /// (row, col) of the `index`-th cell in column-major order
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.rows, index / self.rows)
    }

    /// Bounds of the cell at (row, col); row 0 is the top row
    pub fn cell_bounds(&self, row: usize, col: usize) -> Rect {
        let (x0, y0) = self.origin;
        let x = x0 + col as f32 * (self.cell_width_pt + self.gutter_pt);
        let y = y0 + (self.rows - row - 1) as f32 * self.cell_height_pt;
        Rect::new(x, y, self.cell_width_pt, self.cell_height_pt)
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

// =============================================================================
// Page Cells
// =============================================================================

/// A cell assigned to one question
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub column: usize,
    pub bounds: Rect,
}

/// Parameters of the cell split shared by all sub-layouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec {
    pub grid_columns: usize,
    pub grid_rows: usize,
    pub gutter_pt: f32,
    pub hybrid_long_share: f32,
}

/// Split `area` into cells for a page.
///
/// `long_count` LONG images come first in the page order, followed by
/// `other_count` SHORT/MEDIUM images. Cells are returned in that order.
pub fn page_cells(
    kind: LayoutKind,
    area: &Rect,
    long_count: usize,
    other_count: usize,
    spec: &CellSpec,
) -> Vec<Cell> {
    match kind {
        LayoutKind::Grid => grid_cells(area, long_count + other_count, spec.grid_rows, spec),
        LayoutKind::SingleColumn => stacked_cells(area, long_count + other_count),
        LayoutKind::Hybrid => {
            let long_height = area.height * spec.hybrid_long_share;
            let top = Rect::new(area.x, area.top() - long_height, area.width, long_height);
            let bottom = Rect::new(area.x, area.y, area.width, area.height - long_height);

            // The lower band only gets as many rows as it needs
            let mut cells = stacked_cells(&top, long_count);
            cells.extend(grid_cells(&bottom, other_count, 1, spec));
            cells
        }
    }
}

/// Column-major grid of `count` cells with at least `min_rows` rows
fn grid_cells(area: &Rect, count: usize, min_rows: usize, spec: &CellSpec) -> Vec<Cell> {
    if count == 0 {
        return Vec::new();
    }

    let grid = GridLayout::new(area, count, spec.grid_columns, min_rows, spec.gutter_pt);

    (0..count)
        .map(|index| {
            let (row, col) = grid.position(index);
            Cell {
                column: col,
                bounds: grid.cell_bounds(row, col),
            }
        })
        .collect()
}

/// Full-width cells stacked top to bottom with equal heights
fn stacked_cells(area: &Rect, count: usize) -> Vec<Cell> {
    if count == 0 {
        return Vec::new();
    }

    let height = area.height / count as f32;
    (0..count)
        .map(|index| Cell {
            column: 0,
            bounds: Rect::new(
                area.x,
                area.top() - (index + 1) as f32 * height,
                area.width,
                height,
            ),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
