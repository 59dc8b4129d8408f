//! Image placement within cells
//!
//! This module turns a page assignment into concrete geometry:
//! - Shrinking each cell to the area the image may use
//! - Scaling the image to fit while preserving its aspect ratio
//! - Numbering questions continuously across pages

use crate::assign::PageAssignment;
use crate::metrics::ImageRecord;
use crate::options::LayoutConfig;
use crate::types::Category;

use super::{CellSpec, Page, PlacementSlot, Rect, page_cells};

/// Area of a cell available to the image.
///
/// The cell is inset by the padding, the label column is removed on the
/// left and the answer space is removed at the bottom.
pub fn image_bounds(cell: &Rect, config: &LayoutConfig) -> Rect {
    let pad = config.cell_padding_pt;
    let inner = Rect::new(
        cell.x + pad + config.label_width_pt,
        cell.y + pad,
        (cell.width - 2.0 * pad - config.label_width_pt).max(0.0),
        (cell.height - 2.0 * pad).max(0.0),
    );

    let answer_space = inner.height * config.answer_space_ratio;
    Rect::new(
        inner.x,
        inner.y + answer_space,
        inner.width,
        inner.height - answer_space,
    )
}

/// Fit an image with the given aspect ratio (height / width) into `bounds`.
///
/// The image is scaled to the largest size that fits (upscaling allowed),
/// centered horizontally and anchored to the top of the bounds.
pub fn resolve(aspect_ratio: f32, bounds: &Rect) -> Rect {
    let width = bounds.width.min(bounds.height / aspect_ratio).max(0.0);
    let height = width * aspect_ratio;

    Rect::new(
        bounds.x + (bounds.width - width) / 2.0,
        bounds.top() - height,
        width,
        height,
    )
}

/// Build the slots of one page.
///
/// `global_offset` is the number of questions on all earlier pages; the
/// `i`-th image of this page is numbered `global_offset + i + 1`.
pub fn build_page(
    records: &[ImageRecord],
    assignment: &PageAssignment,
    page_index: usize,
    global_offset: usize,
    config: &LayoutConfig,
) -> Page {
    let long_count = assignment
        .images
        .iter()
        .filter(|&&idx| records[idx].category() == Category::Long)
        .count();
    let other_count = assignment.images.len() - long_count;

    let spec = CellSpec {
        grid_columns: config.grid_columns,
        grid_rows: config.grid_rows,
        gutter_pt: config.column_gutter_pt,
        hybrid_long_share: config.hybrid_long_share,
    };
    let cells = page_cells(
        assignment.kind,
        &config.content_area(),
        long_count,
        other_count,
        &spec,
    );

    let mut columns = vec![Vec::new(); config.grid_columns];

    for (local_index, (&image_index, cell)) in assignment.images.iter().zip(&cells).enumerate() {
        let record = &records[image_index];
        let bounds = image_bounds(&cell.bounds, config);

        columns[cell.column].push(PlacementSlot {
            image_index,
            path: record.path.clone(),
            page: page_index,
            column: cell.column,
            number: global_offset + local_index + 1,
            category: record.category(),
            fallback: record.is_fallback(),
            layout_kind: assignment.kind,
            cell: cell.bounds,
            bounds,
            placement: resolve(record.aspect_ratio(), &bounds),
        });
    }

    Page {
        index: page_index,
        layout_kind: assignment.kind,
        columns,
        total_weight: assignment.total_weight,
        oversized: assignment.oversized,
    }
}
