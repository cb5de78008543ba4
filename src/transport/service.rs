use chrono::Utc;
use log::info;

use super::models::{IngestAck, StoredRecord, TransportRecord};
use super::store::RecordStore;
use super::Result;
use crate::frame::{encode_config, FrameProfile, STANDARD_PROFILE};
use crate::peripheral::{PeripheralConfig, PeripheralType};

/// Bridges the framing codec to a record store: validates and packs a
/// configuration, wraps it into a frame, and submits the resulting record.
/// Retrieval passes stored records through untouched.
pub struct ConfigTransport<S> {
    profile: FrameProfile,
    store: S,
}

impl<S: RecordStore> ConfigTransport<S> {
    /// Transport using the standard frame profile.
    pub fn new(store: S) -> Self {
        Self::with_profile(STANDARD_PROFILE.clone(), store)
    }

    pub fn with_profile(profile: FrameProfile, store: S) -> Self {
        Self { profile, store }
    }

    pub fn profile(&self) -> &FrameProfile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pack `config` and submit it for the given board.
    ///
    /// Packing failures propagate unchanged and the store is never called;
    /// no partial frame is ever sent.
    pub async fn send(&self, mcu_id: &str, config: &PeripheralConfig) -> Result<IngestAck> {
        config.validate()?;
        let frame = encode_config(&self.profile, config)?;

        let record = TransportRecord {
            peripheral_type: config.peripheral_type(),
            instance: config.instance_label().to_string(),
            mcu_id: mcu_id.to_string(),
            configuration: config.clone(),
            data: frame.into_bytes(),
            timestamp: Utc::now(),
        };

        info!(
            "Sending {} configuration for {} on {} ({} byte frame)",
            record.peripheral_type,
            record.instance,
            record.mcu_id,
            record.data.len()
        );
        self.store.submit(&record).await
    }

    pub async fn last(&self) -> Result<Option<StoredRecord>> {
        self.store.last().await
    }

    pub async fn history(&self) -> Result<Vec<StoredRecord>> {
        self.store.history().await
    }

    pub async fn history_by_type(&self, ptype: PeripheralType) -> Result<Vec<StoredRecord>> {
        self.store.history_by_type(ptype).await
    }
}
