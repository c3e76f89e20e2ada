use crate::order::compare_sizes;
use romaneio_protocol::{Category, Gender, PersonnelRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Pants counts per gender.
///
/// Records whose gender is missing or unrecognized increment neither bucket,
/// so `total()` can be lower than the number of records with that size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderSplit {
    pub masculine: usize,
    pub feminine: usize,
}

impl GenderSplit {
    #[must_use]
    pub fn total(&self) -> usize {
        self.masculine + self.feminine
    }

    fn record(&mut self, gender: Option<Gender>) {
        match gender {
            Some(Gender::Masculine) => self.masculine += 1,
            Some(Gender::Feminine) => self.feminine += 1,
            None => {}
        }
    }
}

/// One presentable tally entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyLine {
    pub size: String,
    pub count: usize,
    /// Present for pants only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<GenderSplit>,
}

/// Per-category size tallies over the records that carry sizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTotals {
    record_count: usize,
    plain: BTreeMap<Category, BTreeMap<String, usize>>,
    pants: BTreeMap<String, GenderSplit>,
}

impl ReportTotals {
    /// Number of input records with sizing present.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Raw tally for a category without gender breakdown.
    #[must_use]
    pub fn tally(&self, category: Category) -> Option<&BTreeMap<String, usize>> {
        self.plain.get(&category)
    }

    #[must_use]
    pub fn pants(&self) -> &BTreeMap<String, GenderSplit> {
        &self.pants
    }

    /// Tally lines for `category` in size order. For pants the count is the
    /// sum of the two gender buckets.
    #[must_use]
    pub fn sorted_lines(&self, category: Category) -> Vec<TallyLine> {
        let mut lines: Vec<TallyLine> = if category.has_gender_breakdown() {
            self.pants
                .iter()
                .map(|(size, split)| TallyLine {
                    size: size.clone(),
                    count: split.total(),
                    split: Some(*split),
                })
                .collect()
        } else {
            self.plain
                .get(&category)
                .into_iter()
                .flatten()
                .map(|(size, count)| TallyLine {
                    size: size.clone(),
                    count: *count,
                    split: None,
                })
                .collect()
        };
        lines.sort_by(|a, b| compare_sizes(&a.size, &b.size));
        lines
    }
}

/// Tally every category over the records in `records` that carry sizing.
/// Each such record adds exactly one count per category, empty values
/// included.
#[must_use]
pub fn aggregate(records: &[PersonnelRecord]) -> ReportTotals {
    let mut totals = ReportTotals::default();
    for record in records {
        let Some(sizing) = record.sizing.as_ref() else {
            continue;
        };
        totals.record_count += 1;
        for category in Category::ALL {
            let size = sizing.size(category).to_string();
            if category.has_gender_breakdown() {
                let gender = record.gender_kind();
                if gender.is_none() {
                    log::debug!(
                        "RE {}: gender {:?} left out of the pants split",
                        record.service_number,
                        record.gender
                    );
                }
                totals.pants.entry(size).or_default().record(gender);
            } else {
                *totals
                    .plain
                    .entry(category)
                    .or_default()
                    .entry(size)
                    .or_insert(0) += 1;
            }
        }
    }
    totals
}
