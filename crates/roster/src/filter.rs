use crate::cache::{RosterCache, RosterStatus};
use romaneio_protocol::PersonnelRecord;

/// How many records the empty query shows: the tail of the roster, i.e. the
/// highest service numbers.
pub const QUICK_VIEW_LEN: usize = 2;

pub const NO_RECORDS_MESSAGE: &str = "Nenhum militar cadastrado ainda.";
pub const NO_MATCHES_MESSAGE: &str = "Nenhum resultado encontrado.";

/// Trimmed, lower-cased form used for comparison.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Select the records shown for `query`.
///
/// An empty query yields the last [`QUICK_VIEW_LEN`] records of `source`.
/// Anything else is a case-insensitive substring match against service
/// number, rank or war name. Order of `source` is preserved.
#[must_use]
pub fn filter(query: &str, source: &[PersonnelRecord]) -> Vec<PersonnelRecord> {
    let query = normalize_query(query);
    if query.is_empty() {
        let start = source.len().saturating_sub(QUICK_VIEW_LEN);
        return source[start..].to_vec();
    }
    source
        .iter()
        .filter(|record| matches_query(record, &query))
        .cloned()
        .collect()
}

fn matches_query(record: &PersonnelRecord, query: &str) -> bool {
    record.service_number.contains(query)
        || record.rank.to_lowercase().contains(query)
        || record.war_name.to_lowercase().contains(query)
}

/// What the roster list should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterView {
    /// The subscription failed; the message replaces the list.
    Unavailable(String),
    /// The store holds no records at all.
    NoRecords,
    /// Records exist but none match a non-empty query.
    NoMatches,
    Records(Vec<PersonnelRecord>),
}

impl RosterView {
    #[must_use]
    pub fn build(query: &str, cache: &RosterCache) -> Self {
        if let RosterStatus::Failed(message) = cache.status() {
            return RosterView::Unavailable(message.clone());
        }
        if cache.is_empty() {
            return RosterView::NoRecords;
        }
        let records = filter(query, cache.records());
        if records.is_empty() {
            RosterView::NoMatches
        } else {
            RosterView::Records(records)
        }
    }

    /// Placeholder text for the non-record variants.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            RosterView::Unavailable(message) => Some(format!("Erro ao carregar dados: {message}")),
            RosterView::NoRecords => Some(NO_RECORDS_MESSAGE.to_string()),
            RosterView::NoMatches => Some(NO_MATCHES_MESSAGE.to_string()),
            RosterView::Records(_) => None,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PersonnelRecord] {
        match self {
            RosterView::Records(records) => records,
            _ => &[],
        }
    }
}
