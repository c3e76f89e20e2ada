use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid record id: {0:?}")]
    InvalidRecordId(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
