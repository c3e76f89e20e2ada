//! # Romaneio Protocol
//!
//! Record model shared by the store, roster, report and CLI crates.
//!
//! A personnel record carries identity fields (rank, service number, war name,
//! unit, gender) and an optional sizing sub-record with one size per
//! equipment [`Category`]. Field names on the wire follow the layout of the
//! realtime store (`posto_gd`, `re`, `nome_guerra`, `opm`, `sexo`, `romaneio`).

mod error;
mod record;
mod sizing;

pub use error::{ProtocolError, Result};
pub use record::{
    Collection, Gender, IdentityFields, PersonnelRecord, RawRecord, RecordId, DEFAULT_UNIT,
};
pub use sizing::{Category, SizingRecord};

/// Name of the collection node holding every personnel record.
pub const COLLECTION_NODE: &str = "militares";
