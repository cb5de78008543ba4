use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::peripheral::{PeripheralConfig, PeripheralType};

/// The envelope POSTed to the ingest backend for one submission.
///
/// `configuration` carries the original typed fields for later review;
/// `data` is the complete encoded frame as decimal byte values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportRecord {
    pub peripheral_type: PeripheralType,
    pub instance: String,
    pub mcu_id: String,
    pub configuration: PeripheralConfig,
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
}

/// A record as returned by the backend. Carries whatever was stored at send
/// time plus backend-assigned fields; the configuration comes back as raw
/// JSON and is redisplayed without re-validation or re-decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub peripheral_type: PeripheralType,
    pub instance: String,
    pub mcu_id: String,
    pub configuration: serde_json::Value,
    pub data: Vec<u8>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub raw_hex: Option<String>,
}

/// Backend acknowledgement for one accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestAck {
    pub id: String,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}
