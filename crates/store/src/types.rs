use romaneio_protocol::{Collection, IdentityFields, SizingRecord};
use std::sync::Arc;
use tokio::sync::watch;

/// What a subscriber receives: either the whole collection or a read failure.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Snapshot(Arc<Collection>),
    Failed(String),
}

/// Partial update of a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPatch {
    /// Replace rank, service number, war name, unit and gender; sizing is kept.
    Identity(IdentityFields),
    /// Replace the whole sizing sub-record.
    Sizing(SizingRecord),
}

/// Live view of the store. The first [`Subscription::next`] yields the current
/// state immediately; later calls wait for the next change.
pub struct Subscription {
    rx: watch::Receiver<StoreEvent>,
    pending_initial: bool,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<StoreEvent>) -> Self {
        Self {
            rx,
            pending_initial: true,
        }
    }

    /// Returns `None` once the store has been dropped.
    pub async fn next(&mut self) -> Option<StoreEvent> {
        if std::mem::take(&mut self.pending_initial) {
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
