//! Minimal PDF writer for report documents: base-14 Helvetica fonts, one
//! content stream per page.

use anyhow::{Context as AnyhowContext, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use romaneio_report::{Align, DrawCommand, PageLayout, ReportDocument};
use std::path::Path;

const PT_PER_MM: f32 = 72.0 / 25.4;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

fn mm(value: f32) -> f32 {
    value * PT_PER_MM
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// WinAnsi bytes for `text`; characters outside Latin-1 become `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

fn text_operations(command: &DrawCommand, page_height_mm: f32) -> Vec<Operation> {
    let DrawCommand::Text {
        x,
        y,
        size,
        bold,
        align,
        text,
    } = command
    else {
        return Vec::new();
    };
    let bytes = win_ansi(text);
    let mut x_pt = mm(*x);
    if *align == Align::Center {
        x_pt -= bytes.len() as f32 * size * AVG_GLYPH_WIDTH / 2.0;
    }
    let y_pt = mm(page_height_mm - y);
    let font = if *bold { BOLD_FONT } else { REGULAR_FONT };
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), real(*size)]),
        Operation::new("Td", vec![real(x_pt), real(y_pt)]),
        Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

fn font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Lay out `report` as a PDF document in memory.
pub(crate) fn build(report: &ReportDocument, layout: &PageLayout) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular = font(&mut doc, "Helvetica");
    let bold = font(&mut doc, "Helvetica-Bold");
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular,
            BOLD_FONT => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in report.pages() {
        let operations: Vec<_> = page
            .iter()
            .flat_map(|command| text_operations(command, layout.page_height))
            .collect();
        let content = Content { operations };
        let encoded = content.encode().context("Failed to encode page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                real(0.0),
                real(0.0),
                real(mm(layout.page_width)),
                real(mm(layout.page_height)),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

/// Write `report` to `path`.
pub(crate) fn write(report: &ReportDocument, layout: &PageLayout, path: &Path) -> Result<()> {
    let mut doc = build(report, layout)?;
    doc.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!(
        "Wrote {} ({} pages) to {}",
        report.title(),
        report.page_count(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use romaneio_report::ReportKind;

    fn document(commands: Vec<DrawCommand>) -> ReportDocument {
        ReportDocument {
            kind: ReportKind::Summary,
            total: 1,
            commands,
        }
    }

    fn text(y: f32, value: &str) -> DrawCommand {
        DrawCommand::Text {
            x: 20.0,
            y,
            size: 10.0,
            bold: false,
            align: Align::Left,
            text: value.into(),
        }
    }

    #[test]
    fn latin1_text_maps_to_single_bytes() {
        assert_eq!(win_ansi("Calça"), b"Cal\xe7a".to_vec());
        assert_eq!(win_ansi("✓"), b"?".to_vec());
    }

    #[test]
    fn one_pdf_page_per_document_page() {
        let report = document(vec![
            text(45.0, "Relatório"),
            DrawCommand::NewPage,
            text(20.0, "Calça Operacional"),
        ]);
        let doc = build(&report, &PageLayout::default()).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn saved_file_starts_with_pdf_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ReportKind::Summary.file_name());
        write(&document(vec![text(45.0, "x")]), &PageLayout::default(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }
}
