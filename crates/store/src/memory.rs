use crate::error::{Result, StoreError};
use crate::push_id::PushIdGenerator;
use crate::types::{RecordPatch, StoreEvent, Subscription};
use crate::RecordStore;
use async_trait::async_trait;
use romaneio_protocol::{Collection, RawRecord, RecordId};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Mutex as AsyncMutex};

/// Collection state plus the channel that fans snapshots out to subscribers.
/// Shared by every store implementation in this crate.
pub(crate) struct SnapshotHub {
    records: AsyncMutex<Arc<Collection>>,
    events: watch::Sender<StoreEvent>,
    ids: PushIdGenerator,
}

impl SnapshotHub {
    pub(crate) fn new(initial: Collection) -> Self {
        let initial = Arc::new(initial);
        let (events, _) = watch::channel(StoreEvent::Snapshot(initial.clone()));
        Self {
            records: AsyncMutex::new(initial),
            events,
            ids: PushIdGenerator::new(),
        }
    }

    pub(crate) fn subscribe(&self) -> Subscription {
        Subscription::new(self.events.subscribe())
    }

    pub(crate) fn next_id(&self) -> Result<RecordId> {
        Ok(self.ids.next_id()?)
    }

    pub(crate) fn publish_failure(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Record store read failure: {message}");
        self.events.send_replace(StoreEvent::Failed(message));
    }

    /// Applies `change` to a copy of the collection, hands the copy to
    /// `persist`, and only then swaps it in and notifies subscribers.
    /// Commits are serialized: the lock is held until the snapshot is out.
    pub(crate) async fn commit<T, F, Fut>(
        &self,
        change: impl FnOnce(&mut Collection) -> Result<T>,
        persist: F,
    ) -> Result<T>
    where
        F: FnOnce(Arc<Collection>) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut guard = self.records.lock().await;
        let mut next = Collection::clone(&guard);
        let out = change(&mut next)?;
        let next = Arc::new(next);
        persist(next.clone()).await?;
        *guard = next.clone();
        log::debug!("Published snapshot with {} records", next.len());
        self.events.send_replace(StoreEvent::Snapshot(next));
        Ok(out)
    }
}

pub(crate) fn apply_patch(records: &mut Collection, id: &RecordId, patch: RecordPatch) -> Result<()> {
    let record = records
        .get_mut(id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    match patch {
        RecordPatch::Identity(identity) => record.apply_identity(identity),
        RecordPatch::Sizing(sizing) => record.sizing = Some(sizing),
    }
    Ok(())
}

/// Volatile store for tests and embedding. Can be told to fail writes or to
/// report a read failure to subscribers.
pub struct MemoryStore {
    hub: SnapshotHub,
    write_failure: Mutex<Option<String>>,
    writes_attempted: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_records(Collection::new())
    }

    #[must_use]
    pub fn with_records(records: Collection) -> Self {
        Self {
            hub: SnapshotHub::new(records),
            write_failure: Mutex::new(None),
            writes_attempted: AtomicUsize::new(0),
        }
    }

    /// Make every following write fail with `message`; `None` restores normal writes.
    pub fn fail_writes(&self, message: Option<&str>) {
        if let Ok(mut slot) = self.write_failure.lock() {
            *slot = message.map(str::to_string);
        }
    }

    /// Push a read failure to every subscriber.
    pub fn fail_reads(&self, message: impl Into<String>) {
        self.hub.publish_failure(message);
    }

    /// Number of create/update/delete calls received, successful or not.
    #[must_use]
    pub fn writes_attempted(&self) -> usize {
        self.writes_attempted.load(Ordering::SeqCst)
    }

    fn begin_write(&self) -> Result<()> {
        self.writes_attempted.fetch_add(1, Ordering::SeqCst);
        let failure = self
            .write_failure
            .lock()
            .map_err(|_| StoreError::Other("record store lock poisoned".to_string()))?
            .clone();
        match failure {
            Some(message) => Err(StoreError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    async fn create(&self, record: RawRecord) -> Result<RecordId> {
        self.begin_write()?;
        let id = self.hub.next_id()?;
        let key = id.clone();
        self.hub
            .commit(
                move |records| {
                    records.insert(key, record);
                    Ok(())
                },
                |_| async { Ok(()) },
            )
            .await?;
        Ok(id)
    }

    async fn update(&self, id: &RecordId, patch: RecordPatch) -> Result<()> {
        self.begin_write()?;
        self.hub
            .commit(|records| apply_patch(records, id, patch), |_| async { Ok(()) })
            .await
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        self.begin_write()?;
        self.hub
            .commit(
                |records| {
                    records.remove(id);
                    Ok(())
                },
                |_| async { Ok(()) },
            )
            .await
    }
}
