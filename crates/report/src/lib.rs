//! # Romaneio Report
//!
//! Turns roster records into sizing reports.
//!
//! ```text
//! records ──> aggregate() ──> ReportTotals ──┬─> screen_report()   (structured sections)
//!    │                                       └─> summary_document() (draw commands)
//!    └──────> detailed_document()  (per person, re-sorted by service number)
//! ```
//!
//! Both documents are plain [`DrawCommand`] lists in millimetres; turning
//! them into a file is the caller's job. Every function here is pure over its
//! input and never mutates the records or the totals.

mod aggregate;
mod detailed;
mod document;
mod error;
mod layout;
mod order;
mod summary;

pub use aggregate::{aggregate, GenderSplit, ReportTotals, TallyLine};
pub use detailed::{detailed_document, detailed_text};
pub use document::{ReportDocument, ReportKind};
pub use error::{ReportError, Result, EMPTY_REPORT_MESSAGE};
pub use layout::{Align, DetailedLayout, DrawCommand, PageLayout, SummaryLayout};
pub use order::{compare_sizes, leading_number};
pub use summary::{screen_report, summary_document, ReportLine, ReportSection, ScreenReport};
