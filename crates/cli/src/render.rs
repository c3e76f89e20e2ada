use romaneio_protocol::{Category, PersonnelRecord};
use romaneio_roster::RosterView;
use serde::Serialize;

/// Marker shown next to records that already carry sizing.
pub(crate) const SIZED_MARKER: &str = "✓";

/// `<rank> <war name> (RE: <re>) | OPM: <unit> | Sexo: <gender> [✓]`
pub(crate) fn roster_line(record: &PersonnelRecord) -> String {
    let mut line = format!(
        "{} | OPM: {} | Sexo: {}",
        record.display_name(),
        record.unit,
        record.gender_label()
    );
    if record.has_sizing() {
        line.push(' ');
        line.push_str(SIZED_MARKER);
    }
    line
}

pub(crate) fn roster_text(view: &RosterView) -> String {
    match view.message() {
        Some(message) => message,
        None => view
            .records()
            .iter()
            .map(roster_line)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[derive(Serialize)]
pub(crate) struct RosterListing<'a> {
    pub(crate) message: Option<String>,
    pub(crate) records: &'a [PersonnelRecord],
}

impl<'a> RosterListing<'a> {
    pub(crate) fn new(view: &'a RosterView) -> Self {
        Self {
            message: view.message(),
            records: view.records(),
        }
    }
}

/// One line per category: `<title>: <sizes>` or `texto livre`.
pub(crate) fn catalog_text(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|category| match category.catalog_sizes() {
            Some(sizes) => format!(
                "{}: {}",
                category.title(),
                sizes
                    .iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            None => format!("{}: texto livre", category.title()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
