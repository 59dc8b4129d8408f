use crate::layout::{LayoutKind, PageMap};
use serde::{Deserialize, Serialize};

/// Statistics about a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStatistics {
    /// Total number of placed questions
    pub images: usize,
    /// Number of content pages
    pub pages: usize,
    /// Questions planned with fallback metrics
    pub fallback_images: usize,
    pub grid_pages: usize,
    pub single_column_pages: usize,
    pub hybrid_pages: usize,
    /// Pages holding a single image heavier than the capacity
    pub oversized_pages: usize,
    /// Sum of all weights
    pub total_weight: f32,
    /// Weight placed on each page
    pub weight_per_page: Vec<f32>,
}

/// Calculate statistics for a plan
pub fn calculate_statistics(map: &PageMap) -> PlanStatistics {
    let count_kind = |kind: LayoutKind| map.pages.iter().filter(|p| p.layout_kind == kind).count();
    let weight_per_page: Vec<f32> = map.pages.iter().map(|p| p.total_weight).collect();

    PlanStatistics {
        images: map.slot_count(),
        pages: map.page_count(),
        fallback_images: map.slots().filter(|slot| slot.fallback).count(),
        grid_pages: count_kind(LayoutKind::Grid),
        single_column_pages: count_kind(LayoutKind::SingleColumn),
        hybrid_pages: count_kind(LayoutKind::Hybrid),
        oversized_pages: map.pages.iter().filter(|p| p.oversized).count(),
        total_weight: weight_per_page.iter().sum(),
        weight_per_page,
    }
}
