use crate::aggregate::{ReportTotals, TallyLine};
use crate::document::{ReportDocument, ReportKind};
use crate::error::{ReportError, Result};
use crate::layout::{PageCursor, PageLayout};
use romaneio_protocol::Category;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

/// Structured summary for on-screen display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenReport {
    pub total: usize,
    pub sections: Vec<ReportSection>,
}

fn size_label(size: &str) -> String {
    format!("Tamanho {size}")
}

fn tally_value(line: &TallyLine) -> String {
    match line.split {
        Some(split) => format!(
            "{} (M: {}, F: {})",
            line.count, split.masculine, split.feminine
        ),
        None => line.count.to_string(),
    }
}

/// One section per category, in declaration order.
pub fn screen_report(totals: &ReportTotals) -> Result<ScreenReport> {
    if totals.is_empty() {
        return Err(ReportError::NoSizingRecords);
    }
    let sections = Category::ALL
        .iter()
        .map(|&category| ReportSection {
            title: category.title().to_string(),
            lines: totals
                .sorted_lines(category)
                .iter()
                .map(|line| ReportLine {
                    label: size_label(&line.size),
                    value: tally_value(line),
                })
                .collect(),
        })
        .collect();
    Ok(ScreenReport {
        total: totals.record_count(),
        sections,
    })
}

impl fmt::Display for ScreenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total de militares com romaneio: {}", self.total)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            for line in &section.lines {
                writeln!(f, "  {}: {}", line.label, line.value)?;
            }
        }
        Ok(())
    }
}

/// The "normal" document: every category's tally on as many pages as needed.
pub fn summary_document(totals: &ReportTotals, layout: &PageLayout) -> Result<ReportDocument> {
    if totals.is_empty() {
        return Err(ReportError::NoSizingRecords);
    }
    let spacing = &layout.summary;
    let mut cursor = PageCursor::start(layout, ReportKind::Summary.title(), totals.record_count());
    for category in Category::ALL {
        cursor.begin_block();
        cursor.text(
            spacing.line_x,
            spacing.section_title_size,
            true,
            category.title().to_string(),
            spacing.section_title_advance,
        );
        for line in totals.sorted_lines(category) {
            cursor.ensure_line();
            cursor.text(
                spacing.line_x,
                spacing.line_size,
                false,
                format!("  {}: {}", size_label(&line.size), tally_value(&line)),
                spacing.line_advance,
            );
        }
        cursor.skip(spacing.section_gap);
    }
    Ok(ReportDocument {
        kind: ReportKind::Summary,
        total: totals.record_count(),
        commands: cursor.finish(),
    })
}
