use crate::layout::DrawCommand;
use serde::Serialize;

/// The two document flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Aggregated tallies ("normal").
    Summary,
    /// One block per person.
    Detailed,
}

impl ReportKind {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ReportKind::Summary => "Relatório de Romaneio - Normal",
            ReportKind::Detailed => "Relatório de Romaneio - Detalhado",
        }
    }

    /// Default artifact name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            ReportKind::Summary => "relatorio-romaneio-normal.pdf",
            ReportKind::Detailed => "relatorio-romaneio-detalhado.pdf",
        }
    }
}

/// A finished document: draw commands ready for a writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub total: usize,
    pub commands: Vec<DrawCommand>,
}

impl ReportDocument {
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        1 + self
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::NewPage))
            .count()
    }

    /// Commands grouped per page, page breaks removed.
    #[must_use]
    pub fn pages(&self) -> Vec<&[DrawCommand]> {
        self.commands
            .split(|c| matches!(c, DrawCommand::NewPage))
            .collect()
    }
}
