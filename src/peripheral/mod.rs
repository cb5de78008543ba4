pub mod pack;
pub mod pin;
pub mod types;

pub use pack::{fixed_payload_len, pack_config};
pub use types::{
    FlowControl, GpioConfig, I2cConfig, I2cDutyCycle, Parity, PeripheralConfig, PeripheralType,
    PinDirection, PwmConfig, SpiConfig, SpiDirection, SpiMode, StopBits, UartConfig,
};

#[derive(Debug, thiserror::Error)]
pub enum PeripheralError {
    #[error("Unsupported peripheral type: {0}")]
    UnsupportedType(types::PeripheralType),

    #[error("Invalid field `{field}`: {reason}")]
    FieldParse { field: &'static str, reason: String },
}

impl PeripheralError {
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::FieldParse {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PeripheralError>;
