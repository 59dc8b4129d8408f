//! Question pool: scanning, selection and used-question tracking
//!
//! The pool is a folder tree laid out as `<root>/<topic>/<difficulty>/<image>`.
//! Random selection happens here, strictly before planning.

use crate::constants::SUPPORTED_EXTENSIONS;
use crate::types::*;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A question image found in the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFile {
    pub path: PathBuf,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

/// Check whether a path has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Scan a pool folder for question images
pub async fn scan_pool(root: impl AsRef<Path>) -> Result<Vec<QuestionFile>> {
    let root = root.as_ref().to_owned();
    tokio::task::spawn_blocking(move || scan_pool_sync(&root)).await?
}

fn scan_pool_sync(root: &Path) -> Result<Vec<QuestionFile>> {
    if !root.is_dir() {
        return Err(LayoutError::Config(format!(
            "Pool folder does not exist or is not a directory: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let folders: Vec<String> = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        files.push(QuestionFile {
            path: entry.path().to_owned(),
            topic: folders.first().cloned(),
            difficulty: folders.get(1).cloned(),
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("Found {} question images under {}", files.len(), root.display());

    Ok(files)
}

/// Question counts per topic and difficulty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolSummary {
    pub counts: BTreeMap<(String, String), usize>,
}

impl PoolSummary {
    pub fn from_files(files: &[QuestionFile]) -> Self {
        let mut counts = BTreeMap::new();
        for file in files {
            let key = (
                file.topic.clone().unwrap_or_default(),
                file.difficulty.clone().unwrap_or_default(),
            );
            *counts.entry(key).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of questions in a topic across all difficulties
    pub fn topic_total(&self, topic: &str) -> usize {
        self.counts
            .iter()
            .filter(|((t, _), _)| t == topic)
            .map(|(_, count)| count)
            .sum()
    }
}

/// Questions already handed out during this session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsedPool {
    used: HashSet<PathBuf>,
}

impl UsedPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_used<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.used.extend(paths.into_iter().map(Into::into));
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.used.contains(path)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }

    /// Files that have not been used yet, in input order
    pub fn unused<'a>(&self, files: &'a [QuestionFile]) -> Vec<&'a QuestionFile> {
        files.iter().filter(|f| !self.contains(&f.path)).collect()
    }
}

/// Which questions to draw from the pool
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    /// Number of questions; `None` takes every match
    pub count: Option<usize>,
}

impl SelectionRequest {
    pub fn matches(&self, file: &QuestionFile) -> bool {
        let topic_ok = self
            .topic
            .as_ref()
            .is_none_or(|t| file.topic.as_ref() == Some(t));
        let difficulty_ok = self
            .difficulty
            .as_ref()
            .is_none_or(|d| file.difficulty.as_ref() == Some(d));
        topic_ok && difficulty_ok
    }

    fn describe(&self) -> String {
        format!(
            "topic={} difficulty={}",
            self.topic.as_deref().unwrap_or("*"),
            self.difficulty.as_deref().unwrap_or("*")
        )
    }
}

/// Draw questions at random from the pool.
///
/// Candidates are filtered by topic and difficulty, questions in `used` are
/// skipped, and up to `request.count` of the rest are returned in random
/// order. With no count every candidate is returned, still shuffled.
pub fn select_questions<R: Rng + ?Sized>(
    files: &[QuestionFile],
    request: &SelectionRequest,
    used: &UsedPool,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    let mut candidates: Vec<PathBuf> = used
        .unused(files)
        .into_iter()
        .filter(|f| request.matches(f))
        .map(|f| f.path.clone())
        .collect();

    if candidates.is_empty() {
        return Err(LayoutError::EmptyPool(request.describe()));
    }

    candidates.shuffle(rng);

    if let Some(count) = request.count {
        if count > candidates.len() {
            log::warn!(
                "Requested {} questions but only {} available for {}",
                count,
                candidates.len(),
                request.describe()
            );
        }
        candidates.truncate(count);
    }

    Ok(candidates)
}
