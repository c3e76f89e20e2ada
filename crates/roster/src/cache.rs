use romaneio_protocol::{Collection, PersonnelRecord, RecordId};
use romaneio_store::StoreEvent;

/// Where the cache stands relative to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterStatus {
    /// No snapshot received yet.
    Loading,
    Ready,
    /// The subscription reported an error; the cache holds no records.
    Failed(String),
}

/// In-memory mirror of the record store, always sorted by service number.
///
/// The only way to change the contents is to hand over a whole snapshot (or
/// a read failure), so a cache value is never a partial merge.
#[derive(Debug, Clone)]
pub struct RosterCache {
    records: Vec<PersonnelRecord>,
    status: RosterStatus,
}

impl RosterCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            status: RosterStatus::Loading,
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &Collection) -> Self {
        let mut cache = Self::new();
        cache.replace(snapshot);
        cache
    }

    /// Rebuild from a full snapshot.
    pub fn replace(&mut self, snapshot: &Collection) {
        let mut records: Vec<PersonnelRecord> = snapshot
            .iter()
            .map(|(id, raw)| PersonnelRecord::from_raw(id.clone(), raw.clone()))
            .collect();
        records.sort_by(PersonnelRecord::cmp_by_service_number);
        self.records = records;
        self.status = RosterStatus::Ready;
    }

    /// Drop every record and remember the read failure.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.records.clear();
        self.status = RosterStatus::Failed(message.into());
    }

    pub fn apply(&mut self, event: &StoreEvent) {
        match event {
            StoreEvent::Snapshot(snapshot) => self.replace(snapshot),
            StoreEvent::Failed(message) => self.fail(message.clone()),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PersonnelRecord] {
        &self.records
    }

    #[must_use]
    pub fn status(&self) -> &RosterStatus {
        &self.status
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == RosterStatus::Ready
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&PersonnelRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    #[must_use]
    pub fn find_by_service_number(&self, service_number: &str) -> Option<&PersonnelRecord> {
        self.records
            .iter()
            .find(|r| r.service_number == service_number)
    }

    /// Records carrying a sizing sub-record, in roster order.
    #[must_use]
    pub fn with_sizing(&self) -> Vec<PersonnelRecord> {
        self.records
            .iter()
            .filter(|r| r.has_sizing())
            .cloned()
            .collect()
    }
}

impl Default for RosterCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use romaneio_protocol::{RawRecord, SizingRecord};
    use std::sync::Arc;

    fn collection(entries: &[(&str, &str, bool)]) -> Collection {
        entries
            .iter()
            .map(|(id, re, sized)| {
                (
                    RecordId::new(*id).unwrap(),
                    RawRecord {
                        service_number: (*re).to_string(),
                        sizing: sized.then(SizingRecord::default),
                        ..RawRecord::default()
                    },
                )
            })
            .collect()
    }

    fn order(cache: &RosterCache) -> Vec<&str> {
        cache
            .records()
            .iter()
            .map(|r| r.service_number.as_str())
            .collect()
    }

    #[test]
    fn starts_loading_and_empty() {
        let cache = RosterCache::new();
        assert_eq!(cache.status(), &RosterStatus::Loading);
        assert!(cache.is_empty());
    }

    #[test]
    fn replace_sorts_by_service_number_string() {
        let cache = RosterCache::from_snapshot(&collection(&[
            ("k1", "300000", false),
            ("k2", "000002", true),
            ("k3", "100001", false),
        ]));
        assert_eq!(order(&cache), vec!["000002", "100001", "300000"]);
        assert!(cache.is_ready());
    }

    #[test]
    fn replace_discards_previous_contents() {
        let mut cache = RosterCache::from_snapshot(&collection(&[
            ("k1", "000001", false),
            ("k2", "000002", false),
        ]));
        cache.replace(&collection(&[("k3", "000003", false)]));
        assert_eq!(order(&cache), vec!["000003"]);
        assert!(cache.get(&RecordId::new("k1").unwrap()).is_none());
    }

    #[test]
    fn read_failure_clears_records() {
        let mut cache = RosterCache::from_snapshot(&collection(&[("k1", "000001", false)]));
        cache.apply(&StoreEvent::Failed("permission denied".into()));
        assert!(cache.is_empty());
        assert_eq!(
            cache.status(),
            &RosterStatus::Failed("permission denied".into())
        );

        cache.apply(&StoreEvent::Snapshot(Arc::new(collection(&[(
            "k2", "000002", false,
        )]))));
        assert!(cache.is_ready());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn with_sizing_keeps_roster_order() {
        let cache = RosterCache::from_snapshot(&collection(&[
            ("k1", "000009", true),
            ("k2", "000001", false),
            ("k3", "000005", true),
        ]));
        let sized: Vec<_> = cache
            .with_sizing()
            .into_iter()
            .map(|r| r.service_number)
            .collect();
        assert_eq!(sized, vec!["000005", "000009"]);
        assert_eq!(
            cache.find_by_service_number("000001").map(|r| r.id.as_str()),
            Some("k2")
        );
    }
}
