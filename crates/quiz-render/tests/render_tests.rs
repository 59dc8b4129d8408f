use lopdf::Document;
use quiz_layout::*;
use quiz_render::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]))
        .save(path)
        .unwrap();
}

/// Nine questions: five LONG, four SHORT
fn question_images(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for i in 0..5 {
        let path = dir.join(format!("long{i}.png"));
        write_png(&path, 20, 50);
        paths.push(path);
    }
    for i in 0..4 {
        let path = dir.join(format!("short{i}.png"));
        write_png(&path, 60, 20);
        paths.push(path);
    }
    paths
}

async fn planned(paths: &[PathBuf]) -> PageMap {
    let records = load_images(paths).await.unwrap();
    plan_pages(&records, &LayoutConfig::default())
}

#[tokio::test]
async fn test_generate_pdf_has_one_page_per_planned_page() {
    let dir = TempDir::new().unwrap();
    let map = planned(&question_images(dir.path())).await;
    assert_eq!(map.page_count(), 2);

    let output = dir.path().join("quiz.pdf");
    generate_pdf(&map, &[], &RenderOptions::default(), &output)
        .await
        .unwrap();

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_answer_key_pages_are_appended() {
    let dir = TempDir::new().unwrap();
    let paths = question_images(dir.path());
    std::fs::write(
        dir.path().join("answers.json"),
        r#"{"long0.png": "A", "short3.png": "E"}"#,
    )
    .unwrap();

    let map = planned(&paths).await;
    let book = AnswerBook::load_for(&map).await.unwrap();
    let key = answer_key(&map, &book);
    assert_eq!(key.len(), 9);

    let options = RenderOptions {
        answer_key: true,
        answer_rows_per_column: 2,
        answer_columns: 2,
        ..RenderOptions::default()
    };
    assert_eq!(answer_key_page_count(key.len(), &options), 3);

    let bytes = generate_pdf_bytes(&map, &key, &options).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), map.page_count() + 3);
}

#[tokio::test]
async fn test_answer_key_is_skipped_unless_requested() {
    let dir = TempDir::new().unwrap();
    let map = planned(&question_images(dir.path())).await;
    let key = answer_key(&map, &AnswerBook::new());

    let bytes = generate_pdf_bytes(&map, &key, &RenderOptions::default()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), map.page_count());
}

#[tokio::test]
async fn test_unreadable_images_still_render() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.png");
    let corrupt = dir.path().join("corrupt.png");
    write_png(&good, 40, 40);
    std::fs::write(&corrupt, b"not an image").unwrap();

    let map = planned(&[good, corrupt]).await;
    assert_eq!(map.slot_count(), 2);

    let bytes = generate_pdf_bytes(&map, &[], &RenderOptions::default()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_empty_plan_is_refused() {
    let dir = TempDir::new().unwrap();
    let map = plan_pages(&[], &LayoutConfig::default());
    let output = dir.path().join("empty.pdf");

    let result = generate_pdf(&map, &[], &RenderOptions::default(), &output).await;
    assert!(matches!(result, Err(RenderError::NothingToRender)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_answer_key_csv_export() {
    let dir = TempDir::new().unwrap();
    let entries = vec![
        AnswerEntry {
            number: 1,
            path: PathBuf::from("pool/math/q7.png"),
            answer: "C".to_string(),
        },
        AnswerEntry {
            number: 2,
            path: PathBuf::from("pool/math/q2.png"),
            answer: "?".to_string(),
        },
    ];
    let output = dir.path().join("key.csv");

    write_answer_key_csv(&entries, &output).await.unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "number");
    assert_eq!(&headers[1], "answer");

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "1");
    assert_eq!(&rows[0][1], "C");
    assert_eq!(&rows[1][1], "?");
}
