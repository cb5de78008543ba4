//! Frame envelope: `[START | COMMAND | LENGTH | PAYLOAD | END]`, plus the
//! hex display projection consumed by the dashboard's frame viewer.

use serde::{Deserialize, Serialize};

use super::profile::FrameProfile;
use super::{FrameError, Result};
use crate::peripheral::{fixed_payload_len, pack_config, PeripheralConfig, PeripheralType};

/// A complete configuration frame.
///
/// Only `encode` and `from_bytes` construct one, so the sentinels and the
/// interior length byte are trusted everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8>,
}

impl Frame {
    /// Validate foreign bytes (stored history, another tool's dump) as a
    /// frame under the given profile.
    pub fn from_bytes(profile: &FrameProfile, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < 4 {
            return Err(FrameError::Truncated(bytes.len()));
        }
        if bytes[0] != profile.start() {
            return Err(FrameError::BadStart(bytes[0]));
        }
        let last = bytes[bytes.len() - 1];
        if last != profile.end() {
            return Err(FrameError::BadEnd(last));
        }
        let declared = bytes[2] as usize;
        let actual = bytes.len() - 4;
        if declared != actual {
            return Err(FrameError::LengthMismatch { declared, actual });
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn command(&self) -> u8 {
        self.bytes[1]
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[3..self.bytes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Split the frame into named hex sections for display.
    pub fn formatted(&self) -> FormattedFrame {
        let end = self.bytes.len() - 1;
        FormattedFrame {
            start: hex_spaced(&self.bytes[0..1]),
            command: hex_spaced(&self.bytes[1..2]),
            length: hex_spaced(&self.bytes[2..3]),
            data: hex_spaced(&self.bytes[3..end]),
            end: hex_spaced(&self.bytes[end..]),
            full: hex_spaced(&self.bytes),
        }
    }
}

/// Display-only decomposition of a frame. Every byte renders as two
/// uppercase hex digits, bytes separated by single spaces; `full` must
/// round-trip byte-for-byte to the source frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedFrame {
    pub start: String,
    pub command: String,
    pub length: String,
    pub data: String,
    pub end: String,
    pub full: String,
}

/// Wrap a packed payload into a frame for its peripheral type.
pub fn encode(profile: &FrameProfile, ptype: PeripheralType, payload: &[u8]) -> Result<Frame> {
    let expected = fixed_payload_len(ptype)?;
    if payload.len() != expected {
        return Err(FrameError::PayloadSize {
            ptype,
            expected,
            got: payload.len(),
        });
    }
    let command = profile
        .command_code(ptype)
        .ok_or(FrameError::UnknownCommand(ptype))?;

    // Fixed payloads are at most 32 bytes, so the length always fits one byte.
    let mut bytes = Vec::with_capacity(payload.len() + 4);
    bytes.push(profile.start());
    bytes.push(command);
    bytes.push(payload.len() as u8);
    bytes.extend_from_slice(payload);
    bytes.push(profile.end());

    Ok(Frame { bytes })
}

/// Pack and frame a configuration in one step.
pub fn encode_config(profile: &FrameProfile, config: &PeripheralConfig) -> Result<Frame> {
    let payload = pack_config(config)?;
    encode(profile, config.peripheral_type(), &payload)
}

fn hex_spaced(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02X}", byte));
    }
    out
}
