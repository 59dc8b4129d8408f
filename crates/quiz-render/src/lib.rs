mod answer_key;
mod options;
mod pdf;
mod types;

pub use answer_key::{answer_key_page_count, write_answer_key_csv};
pub use options::RenderOptions;
pub use pdf::{generate_pdf, generate_pdf_bytes};
pub use types::{RenderError, Result};
