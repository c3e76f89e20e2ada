//! # Romaneio Roster
//!
//! Live, searchable mirror of the personnel record store.
//!
//! ## Pipeline
//!
//! ```text
//! RecordStore::subscribe()
//!     │
//!     ├──> RosterSync task
//!     │      └─> RosterCache (full rebuild, sorted by service number)
//!     │
//!     ├──> RosterHandle (watch channel of Arc<RosterCache>)
//!     │
//!     └──> RosterView::build(query)  ── filter()
//! ```
//!
//! Writes go through [`RosterService`], which validates service numbers
//! against the current cache before anything reaches the store.

mod cache;
mod error;
mod filter;
mod form;
mod service;
mod sync;
mod validation;

pub use cache::{RosterCache, RosterStatus};
pub use error::{Result, RosterError, ValidationError};
pub use filter::{
    filter, normalize_query, RosterView, NO_MATCHES_MESSAGE, NO_RECORDS_MESSAGE, QUICK_VIEW_LEN,
};
pub use form::{PersonnelForm, WriteRequest};
pub use service::{RosterService, SubmitOutcome};
pub use sync::{RosterHandle, RosterSync};
pub use validation::{check_duplicate, validate_identity, validate_service_number};
