use crate::constants::*;
use crate::layout::Rect;
use crate::pool::SelectionRequest;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Geometry and capacity model used by the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Maximum total weight per page
    pub page_capacity: f32,
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// Share of the content height given to LONG images on HYBRID pages
    pub hybrid_long_share: f32,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margins: PageMargins,
    pub header_height_pt: f32,
    pub column_gutter_pt: f32,
    pub cell_padding_pt: f32,
    pub label_width_pt: f32,
    /// Share of each cell left blank under the image for a written answer
    pub answer_space_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_capacity: DEFAULT_PAGE_CAPACITY,
            grid_columns: GRID_COLUMNS,
            grid_rows: GRID_ROWS,
            hybrid_long_share: HYBRID_LONG_SHARE,
            page_width_pt: DEFAULT_PAGE_WIDTH_PT,
            page_height_pt: DEFAULT_PAGE_HEIGHT_PT,
            margins: PageMargins::default(),
            header_height_pt: HEADER_HEIGHT_PT,
            column_gutter_pt: COLUMN_GUTTER_PT,
            cell_padding_pt: CELL_PADDING_PT,
            label_width_pt: LABEL_WIDTH_PT,
            answer_space_ratio: 0.0,
        }
    }
}

impl LayoutConfig {
    pub fn for_template(template: Template) -> Self {
        match template {
            Template::Test => Self::default(),
            Template::Yazili => Self {
                page_capacity: YAZILI_PAGE_CAPACITY,
                grid_rows: YAZILI_GRID_ROWS,
                answer_space_ratio: YAZILI_ANSWER_SPACE,
                ..Self::default()
            },
        }
    }

    /// Use the dimensions of a paper size (portrait)
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        let (width_mm, height_mm) = paper.dimensions_mm();
        self.page_width_pt = mm_to_pt(width_mm);
        self.page_height_pt = mm_to_pt(height_mm);
        self
    }

    /// Area available for questions: page minus margins and title band
    pub fn content_area(&self) -> Rect {
        let left = mm_to_pt(self.margins.left_mm);
        let right = mm_to_pt(self.margins.right_mm);
        let top = mm_to_pt(self.margins.top_mm) + self.header_height_pt;
        let bottom = mm_to_pt(self.margins.bottom_mm);

        Rect::new(
            left,
            bottom,
            self.page_width_pt - left - right,
            self.page_height_pt - top - bottom,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if !self.page_capacity.is_finite() || self.page_capacity <= 0.0 {
            return Err(LayoutError::Config(
                "Page capacity must be positive".to_string(),
            ));
        }

        if self.grid_columns == 0 || self.grid_rows == 0 {
            return Err(LayoutError::Config(
                "Grid must have at least one row and one column".to_string(),
            ));
        }

        if self.hybrid_long_share.is_nan()
            || self.hybrid_long_share <= 0.0
            || self.hybrid_long_share >= 1.0
        {
            return Err(LayoutError::Config(format!(
                "Hybrid split must be between 0 and 1, got {}",
                self.hybrid_long_share
            )));
        }

        if !(0.0..1.0).contains(&self.answer_space_ratio) {
            return Err(LayoutError::Config(format!(
                "Answer space must be in [0, 1), got {}",
                self.answer_space_ratio
            )));
        }

        let area = self.content_area();
        let column_width = (area.width
            - self.column_gutter_pt * (self.grid_columns - 1) as f32)
            / self.grid_columns as f32;
        let min_cell = 2.0 * self.cell_padding_pt + self.label_width_pt;
        if area.height <= 0.0 || column_width <= min_cell {
            return Err(LayoutError::Config(format!(
                "Margins leave no room for questions ({:.1}x{:.1}pt content area)",
                area.width, area.height
            )));
        }

        Ok(())
    }
}

/// User-facing planning options
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanOptions {
    pub template: Template,
    pub paper_size: PaperSize,
    pub margins: PageMargins,
    /// Overrides the template's page capacity
    pub page_capacity: Option<f32>,
    pub selection: SelectionRequest,
}

impl PlanOptions {
    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Layout model for these options
    pub fn layout_config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::for_template(self.template).with_paper(self.paper_size);
        config.margins = self.margins;
        if let Some(capacity) = self.page_capacity {
            config.page_capacity = capacity;
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.selection.count == Some(0) {
            return Err(LayoutError::Config(
                "Question count must be at least 1".to_string(),
            ));
        }

        self.layout_config().validate()
    }
}
