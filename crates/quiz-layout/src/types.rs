use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{
    LONG_ASPECT_THRESHOLD, LONG_WEIGHT, MEDIUM_WEIGHT, SHORT_ASPECT_THRESHOLD, SHORT_WEIGHT,
};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read image {}: {reason}", .path.display())]
    ImageRead { path: PathBuf, reason: String },
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No questions available for {0}")]
    EmptyPool(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Shape class of a question image, derived from its height/width ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Wide images (ratio <= 0.7)
    Short,
    /// Roughly square images
    Medium,
    /// Tall images (ratio >= 1.5)
    Long,
}

impl Category {
    pub fn from_aspect_ratio(aspect_ratio: f32) -> Self {
        if aspect_ratio >= LONG_ASPECT_THRESHOLD {
            Category::Long
        } else if aspect_ratio <= SHORT_ASPECT_THRESHOLD {
            Category::Short
        } else {
            Category::Medium
        }
    }

    /// Capacity cost of one image of this category
    pub fn weight(self) -> f32 {
        match self {
            Category::Short => SHORT_WEIGHT,
            Category::Medium => MEDIUM_WEIGHT,
            Category::Long => LONG_WEIGHT,
        }
    }

    /// Placement priority; heavier images are placed first
    pub fn priority(self) -> f32 {
        self.weight()
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Short => "short",
            Category::Medium => "medium",
            Category::Long => "long",
        }
    }
}

/// Question template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Template {
    /// Multiple-choice sheet, densely packed
    #[default]
    Test,
    /// Free-response sheet with writing space under every question
    Yazili,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::Test => "Test",
            Template::Yazili => "Yazili",
        }
    }
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions in millimeters
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

/// Page margins around the question area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(10.0)
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_mm: f32) -> Self {
        Self {
            top_mm: margin_mm,
            bottom_mm: margin_mm,
            left_mm: margin_mm,
            right_mm: margin_mm,
        }
    }
}
