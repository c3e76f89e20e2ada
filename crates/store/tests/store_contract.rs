use pretty_assertions::assert_eq;
use romaneio_protocol::{IdentityFields, RawRecord};
use romaneio_store::{JsonFileStore, MemoryStore, RecordPatch, RecordStore, StoreError, StoreEvent};
use std::sync::Arc;

fn identity(re: &str) -> IdentityFields {
    IdentityFields {
        rank: "SD".into(),
        service_number: re.into(),
        war_name: "PRADO".into(),
        unit: "COPOM SP".into(),
        gender: Some("Masculino".into()),
    }
}

fn snapshot_len(event: Option<StoreEvent>) -> usize {
    match event {
        Some(StoreEvent::Snapshot(records)) => records.len(),
        other => panic!("expected snapshot, got {other:?}"),
    }
}

async fn exercise(store: Arc<dyn RecordStore>) {
    let mut updates = store.subscribe();
    assert_eq!(snapshot_len(updates.next().await), 0);

    let first = store
        .create(RawRecord::from_identity(identity("000001")))
        .await
        .unwrap();
    assert_eq!(snapshot_len(updates.next().await), 1);

    let second = store
        .create(RawRecord::from_identity(identity("000002")))
        .await
        .unwrap();
    assert!(first < second, "ids sort by creation order");
    assert_eq!(snapshot_len(updates.next().await), 2);

    store.delete(&first).await.unwrap();
    assert_eq!(snapshot_len(updates.next().await), 1);

    let err = store
        .update(&first, RecordPatch::Identity(identity("000003")))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    // Deleting an absent record is accepted.
    store.delete(&first).await.unwrap();
}

#[tokio::test]
async fn memory_store_honours_the_contract() {
    exercise(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn file_store_honours_the_contract() {
    let dir = tempfile::tempdir().unwrap();
    exercise(Arc::new(JsonFileStore::open(dir.path().join("store.json")).unwrap())).await;
}
