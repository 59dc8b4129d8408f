//! Image measurement and classification
//!
//! Every question image is reduced to an [`ImageRecord`]: its path, its
//! pixel dimensions and the [`ImageMetrics`] the planner packs by. Images
//! that cannot be measured get fallback metrics instead of failing the run.

use crate::constants::FALLBACK_ASPECT_RATIO;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Category, weight and aspect ratio of one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    pub category: Category,
    pub weight: f32,
    /// height / width
    pub aspect_ratio: f32,
}

impl ImageMetrics {
    /// Metrics substituted for images that could not be read
    pub fn fallback() -> Self {
        Self {
            category: Category::Short,
            weight: Category::Short.weight(),
            aspect_ratio: FALLBACK_ASPECT_RATIO,
        }
    }
}

/// Classify an image from its pixel dimensions.
pub fn classify(width: u32, height: u32) -> Result<ImageMetrics> {
    if width == 0 || height == 0 {
        return Err(LayoutError::InvalidDimensions { width, height });
    }

    let aspect_ratio = height as f32 / width as f32;
    let category = Category::from_aspect_ratio(aspect_ratio);

    Ok(ImageMetrics {
        category,
        weight: category.weight(),
        aspect_ratio,
    })
}

/// A measured question image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// Pixel (width, height); `None` when the fallback metrics were used
    pub dimensions: Option<(u32, u32)>,
    pub metrics: ImageMetrics,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Result<Self> {
        let metrics = classify(width, height)?;
        Ok(Self {
            path: path.into(),
            dimensions: Some((width, height)),
            metrics,
        })
    }

    pub fn fallback(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dimensions: None,
            metrics: ImageMetrics::fallback(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.dimensions.is_none()
    }

    pub fn category(&self) -> Category {
        self.metrics.category
    }

    pub fn weight(&self) -> f32 {
        self.metrics.weight
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.metrics.aspect_ratio
    }
}

/// Reads pixel dimensions of an image file
pub trait DimensionSource {
    fn read_dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}

impl<F> DimensionSource for F
where
    F: Fn(&Path) -> Result<(u32, u32)>,
{
    fn read_dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        self(path)
    }
}

/// Dimension source backed by the `image` crate (reads headers only)
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileSource;

impl DimensionSource for ImageFileSource {
    fn read_dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        image::image_dimensions(path).map_err(|e| LayoutError::ImageRead {
            path: path.to_owned(),
            reason: e.to_string(),
        })
    }
}

/// Measure one image, falling back to default metrics on any failure.
pub fn measure(path: &Path, source: &impl DimensionSource) -> ImageRecord {
    let measured = source
        .read_dimensions(path)
        .and_then(|(width, height)| ImageRecord::new(path, width, height));

    match measured {
        Ok(record) => record,
        Err(e) => {
            log::warn!(
                "Using fallback metrics for {}: {}",
                path.display(),
                e
            );
            ImageRecord::fallback(path)
        }
    }
}

/// Measure images in input order.
pub fn measure_all(paths: &[impl AsRef<Path>], source: &impl DimensionSource) -> Vec<ImageRecord> {
    paths
        .iter()
        .map(|path| measure(path.as_ref(), source))
        .collect()
}

/// Measure image files from disk
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<ImageRecord>> {
    let paths: Vec<PathBuf> = paths.iter().map(|p| p.as_ref().to_owned()).collect();

    // Header decoding is blocking file I/O
    let records =
        tokio::task::spawn_blocking(move || measure_all(&paths, &ImageFileSource)).await?;

    let fallbacks = records.iter().filter(|r| r.is_fallback()).count();
    log::info!(
        "Measured {} images ({} with fallback metrics)",
        records.len(),
        fallbacks
    );

    Ok(records)
}
