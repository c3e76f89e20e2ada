use crate::cache::{RosterCache, RosterStatus};
use crate::error::{Result, RosterError};
use crate::filter::RosterView;
use crate::form::{PersonnelForm, WriteRequest};
use crate::sync::{RosterHandle, RosterSync};
use romaneio_protocol::{RecordId, SizingRecord};
use romaneio_store::{RecordPatch, RecordStore};
use std::sync::Arc;

/// Outcome of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
}

/// Operator-facing operations over one store: roster views, the
/// registration form, sizing saves and deletes.
///
/// Validation always runs against the latest published cache. The cache
/// itself is never touched here; it only changes when the store publishes a
/// snapshot, so a failed write has nothing to roll back. Every successful
/// write returns only once the published cache reflects it, so the next
/// validation sees it.
pub struct RosterService<S: RecordStore> {
    store: Arc<S>,
    roster: RosterHandle,
    form: PersonnelForm,
}

impl<S: RecordStore + 'static> RosterService<S> {
    /// Subscribe to `store` and spawn the roster sync task.
    pub fn start(store: Arc<S>) -> Self {
        let (roster, _task) = RosterSync::spawn(store.subscribe());
        Self::new(store, roster)
    }
}

impl<S: RecordStore> RosterService<S> {
    pub fn new(store: Arc<S>, roster: RosterHandle) -> Self {
        Self {
            store,
            roster,
            form: PersonnelForm::new(),
        }
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterCache> {
        self.roster.current()
    }

    pub fn handle_mut(&mut self) -> &mut RosterHandle {
        &mut self.roster
    }

    #[must_use]
    pub fn view(&self, query: &str) -> RosterView {
        RosterView::build(query, &self.roster())
    }

    #[must_use]
    pub fn form(&self) -> &PersonnelForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PersonnelForm {
        &mut self.form
    }

    /// Load the record with `id` into the form.
    pub fn begin_edit(&mut self, id: &RecordId) -> Result<()> {
        let roster = self.roster();
        let record = roster
            .get(id)
            .ok_or_else(|| RosterError::UnknownRecord(id.clone()))?;
        self.form.begin_edit(record);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset();
    }

    /// Validate the form and send it to the store. The form is reset only on
    /// success; on any error it keeps the operator's input.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let request = self.form.prepare(&self.roster())?;
        let outcome = match request {
            WriteRequest::Create(raw) => {
                let service_number = raw.service_number.clone();
                let id = self.store.create(raw).await.map_err(|e| {
                    log::warn!("Create of RE {service_number} failed: {e}");
                    e
                })?;
                log::info!("Created record {id} (RE {service_number})");
                await_published(&mut self.roster, |cache| cache.get(&id).is_some()).await;
                SubmitOutcome::Created(id)
            }
            WriteRequest::Update(id, identity) => {
                self.store
                    .update(&id, RecordPatch::Identity(identity.clone()))
                    .await
                    .map_err(|e| {
                        log::warn!("Update of record {id} failed: {e}");
                        e
                    })?;
                log::info!("Updated record {id}");
                await_published(&mut self.roster, |cache| {
                    cache
                        .get(&id)
                        .is_some_and(|saved| saved.identity() == identity)
                })
                .await;
                SubmitOutcome::Updated(id)
            }
        };
        self.form.reset();
        Ok(outcome)
    }

    /// Replace the sizing sub-record of `id` as a whole.
    pub async fn save_sizing(&self, id: &RecordId, sizing: SizingRecord) -> Result<()> {
        let roster = self.roster();
        let record = roster
            .get(id)
            .ok_or_else(|| RosterError::UnknownRecord(id.clone()))?;
        for category in sizing.off_catalog() {
            log::warn!(
                "RE {}: {} size {:?} is outside the catalog",
                record.service_number,
                category,
                sizing.size(category)
            );
        }
        self.store
            .update(id, RecordPatch::Sizing(sizing.clone()))
            .await
            .map_err(|e| {
                log::warn!("Sizing save for record {id} failed: {e}");
                e
            })?;
        log::info!("Saved sizing for RE {}", record.service_number);
        let mut handle = self.roster.clone();
        await_published(&mut handle, |cache| {
            cache
                .get(id)
                .is_some_and(|saved| saved.sizing.as_ref() == Some(&sizing))
        })
        .await;
        Ok(())
    }

    /// Delete `id`; if it is the record being edited, the form is reset.
    pub async fn delete(&mut self, id: &RecordId) -> Result<()> {
        self.store.delete(id).await.map_err(|e| {
            log::warn!("Delete of record {id} failed: {e}");
            e
        })?;
        log::info!("Deleted record {id}");
        await_published(&mut self.roster, |cache| cache.get(id).is_none()).await;
        if self.form.record_deleted(id) {
            log::debug!("Edited record {id} was deleted; form reset");
        }
        Ok(())
    }
}

/// Block until the published cache satisfies `reflects`, or the roster
/// reports a read failure. The write itself already succeeded, so a closed
/// sync task is only logged.
async fn await_published(
    roster: &mut RosterHandle,
    mut reflects: impl FnMut(&RosterCache) -> bool,
) {
    let outcome = roster
        .wait_until(|cache| matches!(cache.status(), RosterStatus::Failed(_)) || reflects(cache))
        .await;
    if let Err(err) = outcome {
        log::warn!("Write committed but the roster did not refresh: {err}");
    }
}
