use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};

/// Horizontal anchoring of a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    /// `x` is the centre of the text.
    Center,
}

/// One instruction for the document writer. Coordinates are millimetres from
/// the top-left corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        align: Align,
        text: String,
    },
    NewPage,
}

impl DrawCommand {
    pub(crate) fn left(x: f32, y: f32, size: f32, bold: bool, text: impl Into<String>) -> Self {
        DrawCommand::Text {
            x,
            y,
            size,
            bold,
            align: Align::Left,
            text: text.into(),
        }
    }
}

/// Spacing of the summary document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLayout {
    pub section_title_size: f32,
    pub section_title_advance: f32,
    pub line_x: f32,
    pub line_size: f32,
    pub line_advance: f32,
    pub section_gap: f32,
}

impl Default for SummaryLayout {
    fn default() -> Self {
        Self {
            section_title_size: 14.0,
            section_title_advance: 8.0,
            line_x: 20.0,
            line_size: 10.0,
            line_advance: 6.0,
            section_gap: 5.0,
        }
    }
}

/// Spacing of the detailed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailedLayout {
    pub header_x: f32,
    pub header_size: f32,
    pub header_advance: f32,
    pub field_x: f32,
    pub field_size: f32,
    pub field_advance: f32,
    pub record_gap: f32,
}

impl Default for DetailedLayout {
    fn default() -> Self {
        Self {
            header_x: 20.0,
            header_size: 12.0,
            header_advance: 7.0,
            field_x: 25.0,
            field_size: 9.0,
            field_advance: 5.0,
            record_gap: 8.0,
        }
    }
}

/// Page geometry shared by both documents (A4 portrait by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub title_y: f32,
    pub title_size: f32,
    pub total_x: f32,
    pub total_y: f32,
    pub total_size: f32,
    /// Cursor position of the first block on the first page.
    pub content_top: f32,
    /// A block starting below this line goes to a new page.
    pub break_threshold: f32,
    /// Cursor position after a page break.
    pub reset_y: f32,
    /// Lines inside a block that would start below this go to a new page.
    pub overflow_limit: f32,
    pub summary: SummaryLayout,
    pub detailed: DetailedLayout,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            title_y: 15.0,
            title_size: 18.0,
            total_x: 20.0,
            total_y: 30.0,
            total_size: 12.0,
            content_top: 45.0,
            break_threshold: 250.0,
            reset_y: 20.0,
            overflow_limit: 285.0,
            summary: SummaryLayout::default(),
            detailed: DetailedLayout::default(),
        }
    }
}

impl PageLayout {
    #[must_use]
    pub fn title_x(&self) -> f32 {
        self.page_width / 2.0
    }

    /// Reject layouts that would never make progress or draw off the page.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("title_size", self.title_size),
            ("total_size", self.total_size),
            ("summary.section_title_size", self.summary.section_title_size),
            ("summary.section_title_advance", self.summary.section_title_advance),
            ("summary.line_size", self.summary.line_size),
            ("summary.line_advance", self.summary.line_advance),
            ("detailed.header_size", self.detailed.header_size),
            ("detailed.header_advance", self.detailed.header_advance),
            ("detailed.field_size", self.detailed.field_size),
            ("detailed.field_advance", self.detailed.field_advance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReportError::InvalidLayout(format!(
                    "{name} must be positive (got {value})"
                )));
            }
        }
        if self.summary.section_gap < 0.0 || self.detailed.record_gap < 0.0 {
            return Err(ReportError::InvalidLayout(
                "gaps must not be negative".to_string(),
            ));
        }
        if self.reset_y < 0.0 || self.reset_y >= self.break_threshold {
            return Err(ReportError::InvalidLayout(format!(
                "reset_y ({}) must lie between 0 and break_threshold ({})",
                self.reset_y, self.break_threshold
            )));
        }
        if self.break_threshold > self.overflow_limit || self.overflow_limit >= self.page_height {
            return Err(ReportError::InvalidLayout(format!(
                "expected break_threshold ({}) <= overflow_limit ({}) < page_height ({})",
                self.break_threshold, self.overflow_limit, self.page_height
            )));
        }
        if self.content_top >= self.page_height {
            return Err(ReportError::InvalidLayout(format!(
                "content_top ({}) is below the page",
                self.content_top
            )));
        }
        Ok(())
    }
}

/// Vertical write position plus the commands emitted so far.
#[derive(Debug)]
pub(crate) struct PageCursor<'a> {
    layout: &'a PageLayout,
    pub(crate) y: f32,
    commands: Vec<DrawCommand>,
}

impl<'a> PageCursor<'a> {
    /// Start a document with its centred title and the total line.
    pub(crate) fn start(layout: &'a PageLayout, title: &str, total: usize) -> Self {
        let commands = vec![
            DrawCommand::Text {
                x: layout.title_x(),
                y: layout.title_y,
                size: layout.title_size,
                bold: false,
                align: Align::Center,
                text: title.to_string(),
            },
            DrawCommand::left(
                layout.total_x,
                layout.total_y,
                layout.total_size,
                false,
                format!("Total de militares: {total}"),
            ),
        ];
        Self {
            layout,
            y: layout.content_top,
            commands,
        }
    }

    /// Called before each block (section or record).
    pub(crate) fn begin_block(&mut self) {
        if self.y > self.layout.break_threshold {
            self.new_page();
        }
    }

    /// Called before each line inside a block.
    pub(crate) fn ensure_line(&mut self) {
        if self.y > self.layout.overflow_limit {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.commands.push(DrawCommand::NewPage);
        self.y = self.layout.reset_y;
    }

    pub(crate) fn text(&mut self, x: f32, size: f32, bold: bool, text: String, advance: f32) {
        self.commands
            .push(DrawCommand::left(x, self.y, size, bold, text));
        self.y += advance;
    }

    pub(crate) fn skip(&mut self, gap: f32) {
        self.y += gap;
    }

    pub(crate) fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }
}
