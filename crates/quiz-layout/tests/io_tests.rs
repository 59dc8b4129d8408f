use quiz_layout::*;
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::new(width, height).save(path).unwrap();
}

// =============================================================================
// Measurement
// =============================================================================

#[tokio::test]
async fn test_load_images_reads_dimensions() {
    let dir = TempDir::new().unwrap();
    let wide = dir.path().join("wide.png");
    let tall = dir.path().join("tall.png");
    write_png(&wide, 60, 30);
    write_png(&tall, 30, 60);

    let records = load_images(&[&wide, &tall]).await.unwrap();

    assert_eq!(records[0].dimensions, Some((60, 30)));
    assert_eq!(records[0].category(), Category::Short);
    assert_eq!(records[1].category(), Category::Long);
    assert_eq!(records[1].weight(), 2.0);
}

#[tokio::test]
async fn test_unreadable_images_use_fallback_metrics() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    let corrupt = dir.path().join("corrupt.png");
    write_png(&good, 50, 50);
    std::fs::write(&corrupt, b"definitely not a png").unwrap();
    let missing = dir.path().join("missing.png");

    let records = load_images(&[&good, &corrupt, &missing]).await.unwrap();

    assert_eq!(records.len(), 3);
    assert!(!records[0].is_fallback());
    for record in &records[1..] {
        assert!(record.is_fallback());
        assert_eq!(record.metrics, ImageMetrics::fallback());
    }

    // Fallback images still get planned
    let map = plan_pages(&records, &LayoutConfig::default());
    assert_eq!(map.slot_count(), 3);
}

// =============================================================================
// Answer sidecars
// =============================================================================

#[test]
fn test_answer_sheet_parses_strings_and_numbers() {
    let sheet = AnswerSheet::from_json(r#"{"q1.png": "B", "q2.png": 42}"#).unwrap();
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.get("q1.png"), Some("B"));
    assert_eq!(sheet.get("q2.png"), Some("42"));
    assert_eq!(sheet.get("q3.png"), None);
}

#[test]
fn test_answer_sheet_rejects_malformed_json() {
    assert!(matches!(
        AnswerSheet::from_json("[1, 2"),
        Err(LayoutError::Json(_))
    ));
}

#[tokio::test]
async fn test_missing_sidecar_is_empty() {
    let dir = TempDir::new().unwrap();
    let sheet = AnswerSheet::load(dir.path()).await.unwrap();
    assert!(sheet.is_empty());
}

#[tokio::test]
async fn test_answer_key_follows_question_numbers() {
    let dir = TempDir::new().unwrap();
    let math = dir.path().join("math");
    let physics = dir.path().join("physics");
    std::fs::create_dir_all(&math).unwrap();
    std::fs::create_dir_all(&physics).unwrap();

    write_png(&math.join("a.png"), 40, 20);
    write_png(&math.join("b.png"), 20, 40);
    write_png(&physics.join("c.png"), 40, 40);
    std::fs::write(
        math.join("answers.json"),
        r#"{"a.png": "A", "b.png": "D"}"#,
    )
    .unwrap();

    let paths = [math.join("a.png"), math.join("b.png"), physics.join("c.png")];
    let records = load_images(&paths).await.unwrap();
    let map = plan_pages(&records, &LayoutConfig::default());
    let book = AnswerBook::load_for(&map).await.unwrap();
    let key = answer_key(&map, &book);

    // LONG b.png is placed first, then MEDIUM c.png, then SHORT a.png
    let numbers: Vec<usize> = key.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(key[0].path, math.join("b.png"));
    assert_eq!(key[0].answer, "D");
    assert_eq!(key[1].path, physics.join("c.png"));
    assert_eq!(key[1].answer, "?");
    assert_eq!(key[2].answer, "A");
}

#[test]
fn test_answer_book_defaults_to_unknown() {
    let mut sheet = AnswerSheet::default();
    sheet.insert("q.png", "C");
    let mut book = AnswerBook::new();
    book.insert("pool/math", sheet);

    assert_eq!(book.answer_for(Path::new("pool/math/q.png")), "C");
    assert_eq!(book.answer_for(Path::new("pool/math/other.png")), "?");
    assert_eq!(book.answer_for(Path::new("pool/physics/q.png")), "?");
}

// =============================================================================
// Options
// =============================================================================

#[tokio::test]
async fn test_plan_options_roundtrip_through_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("options.json");

    let options = PlanOptions {
        template: Template::Yazili,
        paper_size: PaperSize::Letter,
        page_capacity: Some(6.0),
        selection: SelectionRequest {
            topic: Some("math".to_string()),
            difficulty: None,
            count: Some(12),
        },
        ..PlanOptions::default()
    };

    options.save(&path).await.unwrap();
    let loaded = PlanOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_plan_options_load_reports_bad_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        PlanOptions::load(&path).await,
        Err(LayoutError::Config(_))
    ));
}

#[test]
fn test_layout_config_from_options() {
    let options = PlanOptions {
        template: Template::Yazili,
        page_capacity: Some(5.0),
        ..PlanOptions::default()
    };
    let config = options.layout_config();

    assert_eq!(config.page_capacity, 5.0);
    assert_eq!(config.answer_space_ratio, 0.4);
    assert!((config.page_width_pt - 595.28).abs() < 0.1);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_values() {
    let zero_count = PlanOptions {
        selection: SelectionRequest {
            count: Some(0),
            ..SelectionRequest::default()
        },
        ..PlanOptions::default()
    };
    assert!(zero_count.validate().is_err());

    let zero_capacity = LayoutConfig {
        page_capacity: 0.0,
        ..LayoutConfig::default()
    };
    assert!(zero_capacity.validate().is_err());

    let bad_split = LayoutConfig {
        hybrid_long_share: 1.0,
        ..LayoutConfig::default()
    };
    assert!(bad_split.validate().is_err());

    let huge_margins = PlanOptions {
        margins: PageMargins::uniform(120.0),
        ..PlanOptions::default()
    };
    assert!(huge_margins.validate().is_err());

    assert!(LayoutConfig::default().validate().is_ok());
    assert!(LayoutConfig::for_template(Template::Yazili).validate().is_ok());
}

// =============================================================================
// Statistics
// =============================================================================

#[test]
fn test_statistics_summarize_the_plan() {
    let mut records = vec![ImageRecord::fallback("pool/x.png")];
    for i in 0..5 {
        records.push(ImageRecord::new(format!("pool/l{i}.png"), 100, 300).unwrap());
    }
    for i in 0..3 {
        records.push(ImageRecord::new(format!("pool/s{i}.png"), 300, 100).unwrap());
    }

    let map = plan_pages(&records, &LayoutConfig::default());
    let stats = calculate_statistics(&map);

    assert_eq!(stats.images, 9);
    assert_eq!(stats.fallback_images, 1);
    assert_eq!(stats.pages, map.page_count());
    assert_eq!(stats.total_weight, 14.0);
    assert_eq!(stats.weight_per_page, vec![8.0, 6.0]);
    assert_eq!(stats.single_column_pages, 1);
    assert_eq!(stats.hybrid_pages, 1);
    assert_eq!(stats.grid_pages, 0);
    assert_eq!(stats.oversized_pages, 0);
}
