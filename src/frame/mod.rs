pub mod codec;
pub mod profile;

pub use codec::{encode, encode_config, FormattedFrame, Frame};
pub use profile::{FrameProfile, STANDARD_PROFILE};

use crate::peripheral::PeripheralType;

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error(transparent)]
    Peripheral(#[from] crate::peripheral::PeripheralError),

    #[error("No command code registered for peripheral type {0}")]
    UnknownCommand(PeripheralType),

    #[error("Payload length {got} does not match the fixed size {expected} for {ptype}")]
    PayloadSize {
        ptype: PeripheralType,
        expected: usize,
        got: usize,
    },

    #[error("Frame too short: {0} bytes")]
    Truncated(usize),

    #[error("Bad start sentinel: 0x{0:02X}")]
    BadStart(u8),

    #[error("Bad end sentinel: 0x{0:02X}")]
    BadEnd(u8),

    #[error("Length byte says {declared} but the frame carries {actual} payload bytes")]
    LengthMismatch { declared: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
