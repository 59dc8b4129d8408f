use quiz_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Nothing to render: the plan has no pages")]
    NothingToRender,
}

pub type Result<T> = std::result::Result<T, RenderError>;
