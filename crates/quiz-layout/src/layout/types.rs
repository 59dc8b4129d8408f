//! Layout data types for question pages
//!
//! These types are the output of planning and the input of rendering.
//! Coordinates are PDF points with the origin at the bottom-left corner
//! of the page.

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sub-layout used for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    /// No LONG images: 2-column grid, column-major fill
    Grid,
    /// Only LONG images: one stacked column
    SingleColumn,
    /// LONG images stacked on top, the rest in a 2-column grid below
    Hybrid,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Grid => "grid",
            LayoutKind::SingleColumn => "single-column",
            LayoutKind::Hybrid => "hybrid",
        }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Check if `other` lies inside this rect (with a small tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 0.01;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}

/// Resolved placement of one question image
///
/// Created once by the planner and consumed once by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementSlot {
    /// Index of the image in the planning input
    pub image_index: usize,
    pub path: PathBuf,
    /// 0-based page index
    pub page: usize,
    /// Column within the page (0 = left)
    pub column: usize,
    /// Question number printed next to the image
    pub number: usize,
    pub category: Category,
    /// True when the image could not be measured
    pub fallback: bool,
    pub layout_kind: LayoutKind,
    /// Full cell assigned to the question
    pub cell: Rect,
    /// Area available to the image (x, y, max width, max height)
    pub bounds: Rect,
    /// Final image rectangle, aspect ratio preserved
    pub placement: Rect,
}

/// One planned page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub layout_kind: LayoutKind,
    /// Columns left to right, each ordered top to bottom
    pub columns: Vec<Vec<PlacementSlot>>,
    /// Sum of the weights placed on this page
    pub total_weight: f32,
    /// Page holds a single image heavier than the page capacity
    pub oversized: bool,
}

impl Page {
    /// Slots in numbering order
    pub fn slots(&self) -> impl Iterator<Item = &PlacementSlot> {
        self.columns.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Complete plan for one selection of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMap {
    pub pages: Vec<Page>,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Area the slots were laid out in; the title band sits above it
    pub content: Rect,
}

impl PageMap {
    pub fn empty(page_width_pt: f32, page_height_pt: f32, content: Rect) -> Self {
        Self {
            pages: Vec::new(),
            page_width_pt,
            page_height_pt,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn slot_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// All slots in numbering order
    pub fn slots(&self) -> impl Iterator<Item = &PlacementSlot> {
        self.pages.iter().flat_map(|page| page.slots())
    }

    /// Find the slot holding the given image
    pub fn slot_for(&self, path: &Path) -> Option<&PlacementSlot> {
        self.slots().find(|slot| slot.path == path)
    }
}
