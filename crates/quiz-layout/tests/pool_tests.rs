use quiz_layout::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbImage::new(width, height).save(path).unwrap();
}

/// Pool with two topics, two difficulties for math
fn sample_pool() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for i in 0..4 {
        write_png(&root.join(format!("math/easy/q{i}.png")), 40, 20);
    }
    for i in 0..3 {
        write_png(&root.join(format!("math/hard/q{i}.png")), 20, 40);
    }
    for i in 0..2 {
        write_png(&root.join(format!("physics/easy/q{i}.png")), 30, 30);
    }

    // Not question images
    std::fs::write(root.join("math/easy/notes.txt"), "ignore me").unwrap();
    std::fs::write(root.join("math/easy/answers.json"), "{}").unwrap();

    dir
}

#[tokio::test]
async fn test_scan_pool_finds_images_with_topic_and_difficulty() {
    let dir = sample_pool();
    let files = scan_pool(dir.path()).await.unwrap();

    assert_eq!(files.len(), 9);
    assert!(files.windows(2).all(|w| w[0].path <= w[1].path));

    let hard: Vec<_> = files
        .iter()
        .filter(|f| f.difficulty.as_deref() == Some("hard"))
        .collect();
    assert_eq!(hard.len(), 3);
    assert!(hard.iter().all(|f| f.topic.as_deref() == Some("math")));
}

#[tokio::test]
async fn test_scan_pool_rejects_missing_folder() {
    let dir = TempDir::new().unwrap();
    let result = scan_pool(dir.path().join("missing")).await;
    assert!(matches!(result, Err(LayoutError::Config(_))));
}

#[tokio::test]
async fn test_pool_summary_counts() {
    let dir = sample_pool();
    let files = scan_pool(dir.path()).await.unwrap();
    let summary = PoolSummary::from_files(&files);

    assert_eq!(summary.total(), 9);
    assert_eq!(summary.topic_total("math"), 7);
    assert_eq!(summary.topic_total("physics"), 2);
    assert_eq!(
        summary.counts.get(&("math".to_string(), "easy".to_string())),
        Some(&4)
    );
}

#[test]
fn test_supported_extensions() {
    assert!(pool::is_supported_image(Path::new("a/q.PNG")));
    assert!(pool::is_supported_image(Path::new("q.jpeg")));
    assert!(!pool::is_supported_image(Path::new("answers.json")));
    assert!(!pool::is_supported_image(Path::new("README")));
}

fn question(path: &str, topic: &str, difficulty: &str) -> QuestionFile {
    QuestionFile {
        path: PathBuf::from(path),
        topic: Some(topic.to_string()),
        difficulty: Some(difficulty.to_string()),
    }
}

fn listed_pool() -> Vec<QuestionFile> {
    let mut files = Vec::new();
    for i in 0..6 {
        files.push(question(&format!("math/easy/{i}.png"), "math", "easy"));
    }
    for i in 0..4 {
        files.push(question(&format!("math/hard/{i}.png"), "math", "hard"));
    }
    files
}

#[test]
fn test_select_filters_and_limits() {
    let files = listed_pool();
    let request = SelectionRequest {
        topic: Some("math".to_string()),
        difficulty: Some("hard".to_string()),
        count: Some(3),
    };
    let mut rng = StdRng::seed_from_u64(42);

    let picked = select_questions(&files, &request, &UsedPool::new(), &mut rng).unwrap();
    assert_eq!(picked.len(), 3);
    assert!(picked.iter().all(|p| p.starts_with("math/hard")));

    let unique: HashSet<_> = picked.iter().collect();
    assert_eq!(unique.len(), 3);
}

#[test]
fn test_select_is_reproducible_with_seed() {
    let files = listed_pool();
    let request = SelectionRequest {
        count: Some(5),
        ..SelectionRequest::default()
    };

    let first = select_questions(
        &files,
        &request,
        &UsedPool::new(),
        &mut StdRng::seed_from_u64(7),
    )
    .unwrap();
    let second = select_questions(
        &files,
        &request,
        &UsedPool::new(),
        &mut StdRng::seed_from_u64(7),
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_select_skips_used_questions() {
    let files = listed_pool();
    let request = SelectionRequest {
        difficulty: Some("hard".to_string()),
        ..SelectionRequest::default()
    };
    let mut used = UsedPool::new();
    used.mark_used(["math/hard/0.png", "math/hard/1.png"]);

    let mut rng = StdRng::seed_from_u64(1);
    let picked = select_questions(&files, &request, &used, &mut rng).unwrap();

    assert_eq!(picked.len(), 2);
    assert!(picked.iter().all(|p| !used.contains(p)));
}

#[test]
fn test_select_short_pool_returns_what_is_left() {
    let files = listed_pool();
    let request = SelectionRequest {
        difficulty: Some("hard".to_string()),
        count: Some(10),
        ..SelectionRequest::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let picked = select_questions(&files, &request, &UsedPool::new(), &mut rng).unwrap();
    assert_eq!(picked.len(), 4);
}

#[test]
fn test_select_exhausted_pool_is_error() {
    let files = listed_pool();
    let mut used = UsedPool::new();
    used.mark_used(files.iter().map(|f| f.path.clone()));

    let mut rng = StdRng::seed_from_u64(0);
    let result = select_questions(&files, &SelectionRequest::default(), &used, &mut rng);
    assert!(matches!(result, Err(LayoutError::EmptyPool(_))));

    let request = SelectionRequest {
        topic: Some("chemistry".to_string()),
        ..SelectionRequest::default()
    };
    let result = select_questions(&files, &request, &UsedPool::new(), &mut rng);
    assert!(matches!(result, Err(LayoutError::EmptyPool(_))));
}

#[tokio::test]
async fn test_scan_select_measure_plan() {
    let dir = sample_pool();
    let files = scan_pool(dir.path()).await.unwrap();

    let request = SelectionRequest {
        topic: Some("math".to_string()),
        ..SelectionRequest::default()
    };
    let mut rng = StdRng::seed_from_u64(99);
    let picked = select_questions(&files, &request, &UsedPool::new(), &mut rng).unwrap();
    assert_eq!(picked.len(), 7);

    let records = load_images(&picked).await.unwrap();
    assert!(records.iter().all(|r| !r.is_fallback()));

    let map = plan_pages(&records, &LayoutConfig::default());
    // 4 SHORT (4.0) + 3 LONG (6.0) need two pages
    assert_eq!(map.page_count(), 2);
    assert_eq!(map.slot_count(), 7);
}
