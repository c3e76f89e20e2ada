use crate::document::{ReportDocument, ReportKind};
use crate::error::{ReportError, Result};
use crate::layout::{PageCursor, PageLayout};
use romaneio_protocol::{Category, PersonnelRecord, SizingRecord};

/// `<n>. <rank> <war name> - RE: <service number>`
fn header(index: usize, record: &PersonnelRecord) -> String {
    format!(
        "{}. {} {} - RE: {}",
        index + 1,
        record.rank,
        record.war_name,
        record.service_number
    )
}

fn field_lines(record: &PersonnelRecord, sizing: &SizingRecord) -> Vec<String> {
    Category::ALL
        .iter()
        .map(|&category| {
            let size = sizing.size(category);
            if category.has_gender_breakdown() {
                format!("  {}: {} ({})", category.title(), size, record.gender_label())
            } else {
                format!("  {}: {}", category.title(), size)
            }
        })
        .collect()
}

/// Records with sizing, by service number.
fn qualifying(records: &[PersonnelRecord]) -> Vec<(&PersonnelRecord, &SizingRecord)> {
    let mut selected: Vec<(&PersonnelRecord, &SizingRecord)> = records
        .iter()
        .filter_map(|r| r.sizing.as_ref().map(|s| (r, s)))
        .collect();
    selected.sort_by(|a, b| a.0.cmp_by_service_number(b.0));
    selected
}

/// Per-person document over `records` (typically the filtered roster). Works
/// on the records directly; the aggregated totals play no part here.
pub fn detailed_document(records: &[PersonnelRecord], layout: &PageLayout) -> Result<ReportDocument> {
    let selected = qualifying(records);
    if selected.is_empty() {
        return Err(ReportError::NoSizingRecords);
    }
    let spacing = &layout.detailed;
    let mut cursor = PageCursor::start(layout, ReportKind::Detailed.title(), selected.len());
    for (index, (record, sizing)) in selected.iter().enumerate() {
        cursor.begin_block();
        cursor.text(
            spacing.header_x,
            spacing.header_size,
            true,
            header(index, record),
            spacing.header_advance,
        );
        let fields = field_lines(record, sizing);
        let last = fields.len() - 1;
        for (i, field) in fields.into_iter().enumerate() {
            let advance = if i == last {
                spacing.record_gap
            } else {
                spacing.field_advance
            };
            cursor.text(spacing.field_x, spacing.field_size, false, field, advance);
        }
    }
    Ok(ReportDocument {
        kind: ReportKind::Detailed,
        total: selected.len(),
        commands: cursor.finish(),
    })
}

/// Plain-text rendering of the detailed report, one block per person.
pub fn detailed_text(records: &[PersonnelRecord]) -> Result<String> {
    let selected = qualifying(records);
    if selected.is_empty() {
        return Err(ReportError::NoSizingRecords);
    }
    let mut out = format!("Total de militares: {}\n", selected.len());
    for (index, (record, sizing)) in selected.iter().enumerate() {
        out.push('\n');
        out.push_str(&header(index, record));
        out.push('\n');
        for line in field_lines(record, sizing) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    Ok(out)
}
