use romaneio_protocol::{ProtocolError, RecordId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Protocol error: {0}")]
    ProtocolError(#[from] ProtocolError),

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}
