use crate::cache::{RosterCache, RosterStatus};
use crate::error::{Result, RosterError};
use romaneio_store::Subscription;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Read side of the roster: every value it yields is a complete cache built
/// from one store event.
#[derive(Clone)]
pub struct RosterHandle {
    rx: watch::Receiver<Arc<RosterCache>>,
}

impl RosterHandle {
    #[must_use]
    pub fn current(&self) -> Arc<RosterCache> {
        self.rx.borrow().clone()
    }

    /// Wait for the first store event to land.
    pub async fn ready(&mut self) -> Result<Arc<RosterCache>> {
        self.wait_until(|cache| cache.status() != &RosterStatus::Loading)
            .await
    }

    /// Wait until the current cache satisfies `predicate` (checked immediately first).
    pub async fn wait_until(
        &mut self,
        mut predicate: impl FnMut(&RosterCache) -> bool,
    ) -> Result<Arc<RosterCache>> {
        let cache = self
            .rx
            .wait_for(|cache| predicate(&**cache))
            .await
            .map_err(|_| RosterError::SyncClosed)?;
        Ok(cache.clone())
    }
}

/// Consumes store events and republishes them as whole [`RosterCache`] values.
pub struct RosterSync;

impl RosterSync {
    /// Spawn the sync task on the current tokio runtime.
    pub fn spawn(mut subscription: Subscription) -> (RosterHandle, JoinHandle<()>) {
        let (tx, rx) = watch::channel(Arc::new(RosterCache::new()));
        let task = tokio::spawn(async move {
            while let Some(event) = subscription.next().await {
                let mut next = RosterCache::new();
                next.apply(&event);
                match next.status() {
                    RosterStatus::Failed(message) => {
                        log::warn!("Roster cleared after store read failure: {message}");
                    }
                    _ => log::info!("Roster refreshed: {} records", next.len()),
                }
                if tx.send(Arc::new(next)).is_err() {
                    break;
                }
            }
            log::debug!("Roster sync stopped");
        });
        (RosterHandle { rx }, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use romaneio_protocol::{IdentityFields, RawRecord};
    use romaneio_store::{MemoryStore, RecordStore};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn handle_tracks_store_snapshots() {
        let store = MemoryStore::new();
        let (mut handle, _task) = RosterSync::spawn(store.subscribe());
        let initial = timeout(Duration::from_secs(2), handle.ready())
            .await
            .unwrap()
            .unwrap();
        assert!(initial.is_empty());

        store
            .create(RawRecord::from_identity(IdentityFields {
                service_number: "000001".into(),
                ..IdentityFields::default()
            }))
            .await
            .unwrap();

        let updated = timeout(Duration::from_secs(2), handle.wait_until(|c| c.len() == 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.records()[0].service_number, "000001");
    }

    #[tokio::test]
    async fn read_failure_is_published_as_failed_cache() {
        let store = MemoryStore::new();
        let (mut handle, _task) = RosterSync::spawn(store.subscribe());
        handle.ready().await.unwrap();

        store.fail_reads("network down");
        let failed = timeout(
            Duration::from_secs(2),
            handle.wait_until(|c| matches!(c.status(), RosterStatus::Failed(_))),
        )
        .await
        .unwrap()
        .unwrap();
        assert!(failed.is_empty());
    }

    #[tokio::test]
    async fn dropping_the_store_closes_the_handle() {
        let store = MemoryStore::new();
        let (mut handle, task) = RosterSync::spawn(store.subscribe());
        handle.ready().await.unwrap();
        drop(store);
        task.await.unwrap();
        let err = handle.wait_until(|c| c.len() == 99).await.unwrap_err();
        assert!(matches!(err, RosterError::SyncClosed));
    }
}
