use romaneio_protocol::RecordId;
use romaneio_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosterError>;

/// Rejections raised before any write reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O campo RE deve conter exatamente 6 números (recebido: {0:?})")]
    MalformedServiceNumber(String),

    #[error("O RE {service_number} já está cadastrado para {rank} {war_name}")]
    DuplicateServiceNumber {
        service_number: String,
        rank: String,
        war_name: String,
    },
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store write failed: {0}")]
    StoreWrite(#[from] StoreError),

    #[error("Unknown record: {0}")]
    UnknownRecord(RecordId),

    #[error("Roster sync stopped")]
    SyncClosed,
}
