#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Printed in the title band of every content page
    pub title: String,
    pub title_font_size_pt: f32,
    /// Size of the question number beside each image
    pub label_font_size_pt: f32,
    /// Append answer-key pages after the questions
    pub answer_key: bool,
    pub answer_font_size_pt: f32,
    pub answer_rows_per_column: usize,
    pub answer_columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Quiz".to_string(),
            title_font_size_pt: 14.0,
            label_font_size_pt: 11.0,
            answer_key: false,
            answer_font_size_pt: 11.0,
            answer_rows_per_column: 30,
            answer_columns: 4,
        }
    }
}

impl RenderOptions {
    /// Answer-key entries that fit on one page
    pub fn answers_per_page(&self) -> usize {
        self.answer_rows_per_column.max(1) * self.answer_columns.max(1)
    }
}
