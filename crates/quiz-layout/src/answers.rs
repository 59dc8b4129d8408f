//! Answer lookup from per-folder JSON sidecars
//!
//! Each question folder may hold an `answers.json` file mapping image file
//! names to their answers. Planning never reads answers; they are only
//! joined to the numbered questions when the answer key is produced.

use crate::constants::{ANSWER_SIDECAR_FILE, UNKNOWN_ANSWER};
use crate::layout::PageMap;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Answers for the questions of one folder
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSheet {
    answers: HashMap<String, String>,
}

impl AnswerSheet {
    /// Parse a sidecar. Non-string values (e.g. numbers) are kept as text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let answers = raw
            .into_iter()
            .map(|(file, value)| {
                let answer = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (file, answer)
            })
            .collect();
        Ok(Self { answers })
    }

    /// Load the sidecar of `folder`; a missing sidecar gives an empty sheet
    pub async fn load(folder: impl AsRef<Path>) -> Result<Self> {
        let path = folder.as_ref().join(ANSWER_SIDECAR_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No answer sidecar at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.answers.get(file_name).map(String::as_str)
    }

    pub fn insert(&mut self, file_name: impl Into<String>, answer: impl Into<String>) {
        self.answers.insert(file_name.into(), answer.into());
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Answer sheets of every folder a plan draws from
#[derive(Debug, Clone, Default)]
pub struct AnswerBook {
    sheets: HashMap<PathBuf, AnswerSheet>,
}

impl AnswerBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, folder: impl Into<PathBuf>, sheet: AnswerSheet) {
        self.sheets.insert(folder.into(), sheet);
    }

    /// Load the sidecars of all folders referenced by `map`
    pub async fn load_for(map: &PageMap) -> Result<Self> {
        let folders: BTreeSet<PathBuf> = map
            .slots()
            .map(|slot| parent_folder(&slot.path))
            .collect();

        let mut book = Self::new();
        for folder in folders {
            let sheet = AnswerSheet::load(&folder).await?;
            book.insert(folder, sheet);
        }
        Ok(book)
    }

    /// Answer for a question image, `"?"` when unknown
    pub fn answer_for(&self, path: &Path) -> &str {
        let file_name = path.file_name().and_then(|n| n.to_str());
        file_name
            .and_then(|name| {
                self.sheets
                    .get(&parent_folder(path))
                    .and_then(|sheet| sheet.get(name))
            })
            .unwrap_or(UNKNOWN_ANSWER)
    }
}

fn parent_folder(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// One row of the answer key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub number: usize,
    pub path: PathBuf,
    pub answer: String,
}

/// Answer key for a plan, in question-number order
pub fn answer_key(map: &PageMap, book: &AnswerBook) -> Vec<AnswerEntry> {
    let mut entries: Vec<AnswerEntry> = map
        .slots()
        .map(|slot| AnswerEntry {
            number: slot.number,
            path: slot.path.clone(),
            answer: book.answer_for(&slot.path).to_string(),
        })
        .collect();
    entries.sort_by_key(|entry| entry.number);
    entries
}
