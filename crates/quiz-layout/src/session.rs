//! Planning session
//!
//! Orchestrates measurement results → page assignment → placement and
//! keeps the latest plan together with the pool of used questions.

use crate::assign::assign_pages;
use crate::layout::{PageMap, build_page};
use crate::metrics::ImageRecord;
use crate::options::LayoutConfig;
use crate::pool::UsedPool;
use crate::stats::{PlanStatistics, calculate_statistics};

/// Plan pages for a list of measured images.
///
/// Pure and total: an empty list gives an empty map, and the same input
/// always gives the same map.
pub fn plan_pages(images: &[ImageRecord], config: &LayoutConfig) -> PageMap {
    let mut map = PageMap::empty(
        config.page_width_pt,
        config.page_height_pt,
        config.content_area(),
    );

    if images.is_empty() {
        return map;
    }

    if images.iter().all(ImageRecord::is_fallback) {
        log::error!(
            "None of the {} selected images could be read; planning with fallback metrics",
            images.len()
        );
    }

    let mut offset = 0;
    for (page_index, assignment) in assign_pages(images, config.page_capacity)
        .iter()
        .enumerate()
    {
        let page = build_page(images, assignment, page_index, offset, config);
        offset += page.len();
        map.pages.push(page);
    }

    map
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing planned yet
    Empty,
    /// A plan exists for the current selection
    Planned,
}

/// Coordinates planning for one working session
#[derive(Debug, Clone)]
pub struct PlanningSession {
    config: LayoutConfig,
    current: Option<PageMap>,
    used: UsedPool,
}

impl PlanningSession {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            current: None,
            used: UsedPool::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match self.current {
            Some(_) => SessionState::Planned,
            None => SessionState::Empty,
        }
    }

    /// Plan without touching the session
    pub fn plan(&self, images: &[ImageRecord]) -> PageMap {
        plan_pages(images, &self.config)
    }

    /// Plan from scratch and keep the result as the current plan
    pub fn replan(&mut self, images: &[ImageRecord]) -> &PageMap {
        let map = self.plan(images);
        log::info!(
            "Planned {} questions on {} pages",
            map.slot_count(),
            map.page_count()
        );
        self.current.insert(map)
    }

    pub fn page_map(&self) -> Option<&PageMap> {
        self.current.as_ref()
    }

    pub fn statistics(&self) -> Option<PlanStatistics> {
        self.current.as_ref().map(calculate_statistics)
    }

    pub fn used_pool(&self) -> &UsedPool {
        &self.used
    }

    pub fn used_pool_mut(&mut self) -> &mut UsedPool {
        &mut self.used
    }

    /// Record the questions of the current plan as used
    pub fn commit(&mut self) -> usize {
        let Some(map) = &self.current else {
            return 0;
        };
        let paths: Vec<_> = map.slots().map(|slot| slot.path.clone()).collect();
        let count = paths.len();
        self.used.mark_used(paths);
        count
    }

    /// Drop the current plan
    pub fn reset(&mut self) {
        self.current = None;
    }
}
