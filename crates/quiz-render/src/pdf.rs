use crate::answer_key::answer_key_pages;
use crate::options::RenderOptions;
use crate::types::{RenderError, Result};
use printpdf::*;
use quiz_layout::{AnswerEntry, PageMap, PlacementSlot};
use std::path::Path;

/// Gap between the top of the content area and the title baseline
pub(crate) const TITLE_OFFSET_PT: f32 = 8.0;

/// Render a plan to a PDF file.
///
/// Answer-key pages are appended when `options.answer_key` is set.
pub async fn generate_pdf(
    map: &PageMap,
    answers: &[AnswerEntry],
    options: &RenderOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    if map.is_empty() {
        return Err(RenderError::NothingToRender);
    }

    let map = map.clone();
    let answers = answers.to_vec();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // Decoding images and building the document is CPU-bound
    let bytes =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(&map, &answers, &options)).await??;

    tokio::fs::write(&output_path, bytes).await?;
    log::info!("Wrote {}", output_path.display());

    Ok(())
}

/// Render a plan to PDF bytes
pub fn generate_pdf_bytes(
    map: &PageMap,
    answers: &[AnswerEntry],
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    if map.is_empty() {
        return Err(RenderError::NothingToRender);
    }

    let mut doc = PdfDocument::new(&options.title);
    let width = Mm::from(Pt(map.page_width_pt));
    let height = Mm::from(Pt(map.page_height_pt));
    let total = map.page_count();

    let mut pages = Vec::with_capacity(total);

    for page in &map.pages {
        let mut ops = Vec::new();

        let heading = format!("{}  -  {}/{}", options.title, page.index + 1, total);
        push_text(
            &mut ops,
            &heading,
            map.content.x,
            map.content.top() + TITLE_OFFSET_PT,
            options.title_font_size_pt,
        );

        for slot in page.slots() {
            push_slot(&mut doc, &mut ops, slot, options);
        }

        pages.push(PdfPage::new(width, height, ops));
    }

    if options.answer_key {
        for ops in answer_key_pages(map, answers, options) {
            pages.push(PdfPage::new(width, height, ops));
        }
    }

    log::debug!("Rendering {} PDF pages", pages.len());
    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

/// Write `text` with its baseline starting at (x, y)
pub(crate) fn push_text(ops: &mut Vec<Op>, text: &str, x: f32, y: f32, size: f32) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        font: BuiltinFont::Helvetica,
        size: Pt(size),
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font: BuiltinFont::Helvetica,
    });
    ops.push(Op::EndTextSection);
}

fn push_slot(
    doc: &mut PdfDocument,
    ops: &mut Vec<Op>,
    slot: &PlacementSlot,
    options: &RenderOptions,
) {
    let label_y = slot.bounds.top() - options.label_font_size_pt;
    push_text(
        ops,
        &format!("{}.", slot.number),
        slot.cell.x,
        label_y,
        options.label_font_size_pt,
    );

    match load_raw_image(&slot.path) {
        Ok(raw) => {
            let pixel_width = raw.width as f32;
            let pixel_height = raw.height as f32;
            let id = doc.add_image(&raw);

            // At 72 dpi one pixel is one point
            ops.push(Op::UseXobject {
                id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(slot.placement.x)),
                    translate_y: Some(Pt(slot.placement.y)),
                    scale_x: Some(slot.placement.width / pixel_width),
                    scale_y: Some(slot.placement.height / pixel_height),
                    dpi: Some(72.0),
                    ..Default::default()
                },
            });
        }
        Err(e) => {
            log::warn!(
                "Question {} ({}) left blank: {}",
                slot.number,
                slot.path.display(),
                e
            );
            push_text(
                ops,
                "[image unavailable]",
                slot.placement.x,
                slot.placement.top() - options.label_font_size_pt,
                options.label_font_size_pt,
            );
        }
    }
}

fn load_raw_image(path: &Path) -> Result<RawImage> {
    let rgb = ::image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Pdf(format!("{} has no pixels", path.display())));
    }

    Ok(RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}
