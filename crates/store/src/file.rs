use crate::error::{Result, StoreError};
use crate::memory::{apply_patch, SnapshotHub};
use crate::types::{RecordPatch, Subscription};
use crate::RecordStore;
use async_trait::async_trait;
use romaneio_protocol::{Collection, RawRecord, RecordId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// On-disk layout: the collection lives under its node name, matching an
/// export of the realtime database.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "militares", default)]
    records: Collection,
}

/// Record store persisted to a single JSON file. Every write is flushed to
/// disk before subscribers see the new snapshot; a failed flush leaves both
/// the file and the published state untouched.
pub struct JsonFileStore {
    hub: SnapshotHub,
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens `path`, starting from an empty collection when it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                Collection::new()
            } else {
                serde_json::from_str::<StoreDocument>(&raw)?.records
            }
        } else {
            Collection::new()
        };
        log::info!(
            "Opened record store at {:?} ({} records)",
            path,
            records.len()
        );
        Ok(Self {
            hub: SnapshotHub::new(records),
            path,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `records` to a fresh temp file beside the store and renames it
    /// into place. Runs on the blocking pool.
    async fn persist(path: PathBuf, records: Arc<Collection>) -> Result<()> {
        tokio::task::spawn_blocking(move || write_document(&path, &records))
            .await
            .map_err(|e| StoreError::Other(format!("store flush task failed: {e}")))?
    }
}

fn write_document(path: &Path, records: &Collection) -> Result<()> {
    let document = StoreDocument {
        records: records.clone(),
    };
    let body = serde_json::to_vec_pretty(&document)?;
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(&body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl RecordStore for JsonFileStore {
    fn subscribe(&self) -> Subscription {
        self.hub.subscribe()
    }

    async fn create(&self, record: RawRecord) -> Result<RecordId> {
        let id = self.hub.next_id()?;
        let key = id.clone();
        self.hub
            .commit(
                move |records| {
                    records.insert(key, record);
                    Ok(())
                },
                |records| Self::persist(self.path.clone(), records),
            )
            .await?;
        Ok(id)
    }

    async fn update(&self, id: &RecordId, patch: RecordPatch) -> Result<()> {
        self.hub
            .commit(
                |records| apply_patch(records, id, patch),
                |records| Self::persist(self.path.clone(), records),
            )
            .await
    }

    async fn delete(&self, id: &RecordId) -> Result<()> {
        self.hub
            .commit(
                |records| {
                    records.remove(id);
                    Ok(())
                },
                |records| Self::persist(self.path.clone(), records),
            )
            .await
    }
}
