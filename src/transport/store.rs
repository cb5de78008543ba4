use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::models::{IngestAck, StoredRecord, TransportRecord};
use super::{Result, TransportError};
use crate::peripheral::PeripheralType;

/// Backend boundary for submitted configuration records. One implementation
/// talks HTTP; tests substitute an in-memory store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one record. A record counts as sent only when this returns
    /// the backend's acknowledgement.
    async fn submit(&self, record: &TransportRecord) -> Result<IngestAck>;

    /// The most recently stored record, if any.
    async fn last(&self) -> Result<Option<StoredRecord>>;

    /// Every stored record, in the order the backend returns them.
    async fn history(&self) -> Result<Vec<StoredRecord>>;

    /// Stored records filtered server-side by peripheral type.
    async fn history_by_type(&self, ptype: PeripheralType) -> Result<Vec<StoredRecord>>;
}

/// HTTP implementation of [`RecordStore`] against the peripheral-ingest
/// endpoint. Holds one long-lived client; every call is an independent
/// request/response exchange with no retry of its own.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn records_url(&self) -> String {
        format!("{}/peripherals", self.base_url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        error!("Backend request failed with status {}: {}", status, body);
        Err(TransportError::Status { status, body })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn submit(&self, record: &TransportRecord) -> Result<IngestAck> {
        let url = self.records_url();
        debug!("Submitting {} record to {}", record.peripheral_type, url);

        let response = self.client.post(&url).json(record).send().await?;
        let response = Self::check_status(response).await?;

        // Backends differ in ack shape; pick the fields out by hand.
        let value: Value = response.json().await?;
        let id = value["id"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing id in ingest acknowledgement"))?
            .to_string();
        let received_at = value["received_at"]
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc));

        info!(
            "Backend acknowledged {} record {} for {}",
            record.peripheral_type, id, record.mcu_id
        );
        Ok(IngestAck { id, received_at })
    }

    async fn last(&self) -> Result<Option<StoredRecord>> {
        let url = format!("{}/last", self.records_url());
        debug!("Fetching last record from {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn history(&self) -> Result<Vec<StoredRecord>> {
        let url = self.records_url();
        debug!("Fetching history from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn history_by_type(&self, ptype: PeripheralType) -> Result<Vec<StoredRecord>> {
        let url = self.records_url();
        debug!("Fetching {} history from {}", ptype, url);

        let response = self
            .client
            .get(&url)
            .query(&[("type", ptype.as_str())])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
