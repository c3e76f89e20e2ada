//! # Romaneio Store
//!
//! The record store collaborator: durable CRUD over personnel records plus a
//! live subscription that always delivers the whole collection.
//!
//! ## Architecture
//!
//! ```text
//! create / update / delete
//!     │
//!     ├──> copy of collection ── change applied
//!     │
//!     ├──> persist (file store only)
//!     │
//!     └──> swap in + publish StoreEvent::Snapshot
//!              │
//!              └─> watch channel ──> Subscription::next()
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use romaneio_protocol::{IdentityFields, RawRecord};
//! use romaneio_store::{MemoryStore, RecordStore, StoreEvent};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = MemoryStore::new();
//!     let mut updates = store.subscribe();
//!
//!     let identity = IdentityFields {
//!         rank: "SD".into(),
//!         service_number: "000001".into(),
//!         war_name: "SILVA".into(),
//!         unit: "COPOM SP".into(),
//!         gender: None,
//!     };
//!     store.create(RawRecord::from_identity(identity)).await?;
//!
//!     while let Some(event) = updates.next().await {
//!         if let StoreEvent::Snapshot(records) = event {
//!             println!("{} records", records.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod file;
mod memory;
mod push_id;
mod types;

use async_trait::async_trait;
use romaneio_protocol::{RawRecord, RecordId};

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use push_id::PushIdGenerator;
pub use types::{RecordPatch, StoreEvent, Subscription};

/// Durable collection of personnel records with live subscription.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Subscribe to full-collection snapshots and read failures.
    fn subscribe(&self) -> Subscription;

    /// Store a new record and return its assigned id.
    async fn create(&self, record: RawRecord) -> Result<RecordId>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: &RecordId, patch: RecordPatch) -> Result<()>;

    /// Remove a record. Removing an absent id is not an error.
    async fn delete(&self, id: &RecordId) -> Result<()>;
}
