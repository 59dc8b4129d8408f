//! Greedy page assignment
//!
//! Images are packed onto pages by weight: the pool is sorted heaviest
//! first (stable, so ties keep input order) and each page greedily admits
//! every image that still fits its remaining capacity. Whatever is left
//! goes to the next page.

use crate::layout::LayoutKind;
use crate::metrics::ImageRecord;
use crate::types::Category;

/// Images assigned to one page, in placement order
#[derive(Debug, Clone, PartialEq)]
pub struct PageAssignment {
    /// Indices into the planning input
    pub images: Vec<usize>,
    pub kind: LayoutKind,
    pub total_weight: f32,
    /// A single image heavier than the page capacity
    pub oversized: bool,
}

/// Partition `records` into pages holding at most `capacity` weight each.
///
/// An image heavier than the capacity on its own is placed alone on a page.
pub fn assign_pages(records: &[ImageRecord], capacity: f32) -> Vec<PageAssignment> {
    let mut pool: Vec<usize> = (0..records.len()).collect();
    // Removing admitted images keeps the pool sorted, so one sort suffices
    pool.sort_by(|&a, &b| {
        records[b]
            .category()
            .priority()
            .total_cmp(&records[a].category().priority())
    });

    let mut pages = Vec::new();

    while !pool.is_empty() {
        let mut remaining = capacity;
        let mut admitted = Vec::new();
        let mut leftover = Vec::with_capacity(pool.len());

        for idx in pool {
            let weight = records[idx].weight();
            if remaining > 0.0 && weight <= remaining {
                admitted.push(idx);
                remaining -= weight;
            } else {
                leftover.push(idx);
            }
        }

        let oversized = admitted.is_empty();
        if oversized {
            let idx = leftover.remove(0);
            log::warn!(
                "{} (weight {}) exceeds page capacity {}, placing it alone",
                records[idx].path.display(),
                records[idx].weight(),
                capacity
            );
            admitted.push(idx);
        }

        let total_weight: f32 = admitted.iter().map(|&idx| records[idx].weight()).sum();
        let kind = layout_kind_for(records, &admitted);
        log::debug!(
            "Page {}: {} images, weight {}, {} layout",
            pages.len() + 1,
            admitted.len(),
            total_weight,
            kind.name()
        );

        pages.push(PageAssignment {
            images: admitted,
            kind,
            total_weight,
            oversized,
        });
        pool = leftover;
    }

    pages
}

/// Choose the sub-layout from the page composition
pub fn layout_kind_for(records: &[ImageRecord], images: &[usize]) -> LayoutKind {
    let long = images
        .iter()
        .filter(|&&idx| records[idx].category() == Category::Long)
        .count();

    if long == 0 {
        LayoutKind::Grid
    } else if long == images.len() {
        LayoutKind::SingleColumn
    } else {
        LayoutKind::Hybrid
    }
}
