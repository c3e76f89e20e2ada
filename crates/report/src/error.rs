use thiserror::Error;

/// Empty-state text shown instead of a report.
pub const EMPTY_REPORT_MESSAGE: &str = "Nenhum romaneio cadastrado ainda.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Nenhum romaneio cadastrado ainda.")]
    NoSizingRecords,

    #[error("Invalid page layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
