use crate::cache::RosterCache;
use crate::error::ValidationError;
use crate::validation::validate_identity;
use romaneio_protocol::{IdentityFields, PersonnelRecord, RawRecord, RecordId, DEFAULT_UNIT};

/// A validated write ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteRequest {
    Create(RawRecord),
    Update(RecordId, IdentityFields),
}

/// Registration form state: the draft identity fields plus the record being
/// edited, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonnelForm {
    editing: Option<RecordId>,
    pub fields: IdentityFields,
}

impl PersonnelForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            editing: None,
            fields: blank_fields(),
        }
    }

    /// Leave edit mode and restore the blank draft.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Load `record` into the draft and switch to edit mode.
    pub fn begin_edit(&mut self, record: &PersonnelRecord) {
        self.editing = Some(record.id.clone());
        self.fields = record.identity();
    }

    #[must_use]
    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Atualizar"
        } else {
            "Salvar"
        }
    }

    /// Validate the draft against `cache` and turn it into a store write.
    pub fn prepare(&self, cache: &RosterCache) -> Result<WriteRequest, ValidationError> {
        let identity = validate_identity(&self.fields, self.editing.as_ref(), cache)?;
        Ok(match &self.editing {
            Some(id) => WriteRequest::Update(id.clone(), identity),
            None => WriteRequest::Create(RawRecord::from_identity(identity)),
        })
    }

    /// Reset if `id` is the record being edited. Returns whether it did.
    pub fn record_deleted(&mut self, id: &RecordId) -> bool {
        if self.editing.as_ref() == Some(id) {
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Default for PersonnelForm {
    fn default() -> Self {
        Self::new()
    }
}

fn blank_fields() -> IdentityFields {
    IdentityFields {
        unit: DEFAULT_UNIT.to_string(),
        ..IdentityFields::default()
    }
}
