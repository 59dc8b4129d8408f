use crate::options::RenderOptions;
use crate::pdf::{TITLE_OFFSET_PT, push_text};
use crate::types::{RenderError, Result};
use printpdf::Op;
use quiz_layout::{AnswerEntry, PageMap};
use std::path::Path;

/// Number of pages the answer key needs
pub fn answer_key_page_count(entries: usize, options: &RenderOptions) -> usize {
    entries.div_ceil(options.answers_per_page())
}

/// Drawing operations for the answer-key pages.
///
/// Entries fill the first column top to bottom, then the next column.
pub(crate) fn answer_key_pages(
    map: &PageMap,
    answers: &[AnswerEntry],
    options: &RenderOptions,
) -> Vec<Vec<Op>> {
    let area = map.content;
    let columns = options.answer_columns.max(1);
    let rows = options.answer_rows_per_column.max(1);
    let column_width = area.width / columns as f32;
    let row_height = area.height / rows as f32;
    let total = answer_key_page_count(answers.len(), options);

    answers
        .chunks(options.answers_per_page())
        .enumerate()
        .map(|(page_index, chunk)| {
            let mut ops = Vec::new();

            let heading = if total > 1 {
                format!("Answer Key ({}/{})", page_index + 1, total)
            } else {
                "Answer Key".to_string()
            };
            push_text(
                &mut ops,
                &heading,
                area.x,
                area.top() + TITLE_OFFSET_PT,
                options.title_font_size_pt,
            );

            for (i, entry) in chunk.iter().enumerate() {
                let col = i / rows;
                let row = i % rows;
                push_text(
                    &mut ops,
                    &format!("{}. {}", entry.number, entry.answer),
                    area.x + col as f32 * column_width,
                    area.top() - (row + 1) as f32 * row_height,
                    options.answer_font_size_pt,
                );
            }

            ops
        })
        .collect()
}

/// Export the answer key as CSV (`number,answer,file`)
pub async fn write_answer_key_csv(entries: &[AnswerEntry], path: impl AsRef<Path>) -> Result<()> {
    let entries = entries.to_vec();
    let path = path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["number", "answer", "file"])?;

        for entry in &entries {
            writer.write_record([
                entry.number.to_string(),
                entry.answer.clone(),
                entry.path.display().to_string(),
            ])?;
        }

        writer
            .into_inner()
            .map_err(|e| RenderError::Io(e.into_error()))
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_key_page_count() {
        let options = RenderOptions {
            answer_rows_per_column: 5,
            answer_columns: 2,
            ..RenderOptions::default()
        };

        assert_eq!(answer_key_page_count(0, &options), 0);
        assert_eq!(answer_key_page_count(10, &options), 1);
        assert_eq!(answer_key_page_count(11, &options), 2);
    }

    #[test]
    fn test_zero_rows_still_makes_progress() {
        let options = RenderOptions {
            answer_rows_per_column: 0,
            ..RenderOptions::default()
        };
        assert_eq!(answer_key_page_count(3, &options), 1);
        assert_eq!(answer_key_page_count(5, &options), 2);
    }
}
