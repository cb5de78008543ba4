pub mod models;
pub mod service;
pub mod store;

pub use models::{IngestAck, StoredRecord, TransportRecord};
pub use service::ConfigTransport;
pub use store::{HttpRecordStore, RecordStore};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Pack(#[from] crate::frame::FrameError),

    #[error(transparent)]
    Peripheral(#[from] crate::peripheral::PeripheralError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed backend response: {0}")]
    Response(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
