use super::{PeripheralError, Result};

/// Sentinel for an optional pin the user left unassigned.
pub const NO_PIN: u8 = 0xFF;

/// Extract the pin (or instance) number from an identifier like "PA5" or
/// "UART2". Takes the last character only: "PA12" packs 0x02.
pub fn trailing_digit(field: &'static str, value: &str) -> Result<u8> {
    let last = value
        .chars()
        .last()
        .ok_or_else(|| PeripheralError::field(field, "must not be empty"))?;

    last.to_digit(10)
        .map(|d| d as u8)
        .ok_or_else(|| {
            PeripheralError::field(
                field,
                format!("`{}` does not end in a digit", value),
            )
        })
}

/// Pack an optional pin assignment, substituting the no-pin sentinel.
pub fn optional_pin(field: &'static str, value: Option<&String>) -> Result<u8> {
    match value {
        Some(pin) => trailing_digit(field, pin),
        None => Ok(NO_PIN),
    }
}
