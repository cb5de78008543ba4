//! Field packers: one pure function per peripheral type turning a typed
//! configuration into its fixed-length payload.
//!
//! Layout rules shared by every packer:
//! - multi-byte numerics are big-endian, full 32-bit width unless noted
//! - enable flags OR into one status byte, most-significant bit first in
//!   declaration order
//! - bytes past the packed fields stay zero up to the fixed payload length
//!   (reserved for future use)

use super::pin::{optional_pin, trailing_digit};
use super::types::{
    GpioConfig, I2cConfig, PeripheralConfig, PeripheralType, PwmConfig, SpiConfig, UartConfig,
};
use super::{PeripheralError, Result};

pub const UART_PAYLOAD_LEN: usize = 32;
pub const SPI_PAYLOAD_LEN: usize = 24;
pub const I2C_PAYLOAD_LEN: usize = 20;
pub const PWM_PAYLOAD_LEN: usize = 20;
pub const GPIO_PAYLOAD_LEN: usize = 12;

/// Fixed payload size for a packable peripheral type.
///
/// Reserved types carry a command code but no payload layout yet.
pub fn fixed_payload_len(ptype: PeripheralType) -> Result<usize> {
    match ptype {
        PeripheralType::Uart => Ok(UART_PAYLOAD_LEN),
        PeripheralType::Spi => Ok(SPI_PAYLOAD_LEN),
        PeripheralType::I2c => Ok(I2C_PAYLOAD_LEN),
        PeripheralType::Pwm => Ok(PWM_PAYLOAD_LEN),
        PeripheralType::Gpio => Ok(GPIO_PAYLOAD_LEN),
        reserved => Err(PeripheralError::UnsupportedType(reserved)),
    }
}

/// Pack a configuration into the fixed-length payload for its type.
pub fn pack_config(config: &PeripheralConfig) -> Result<Vec<u8>> {
    let payload = match config {
        PeripheralConfig::Uart(c) => pack_uart(c)?,
        PeripheralConfig::Spi(c) => pack_spi(c)?,
        PeripheralConfig::I2c(c) => pack_i2c(c)?,
        PeripheralConfig::Pwm(c) => pack_pwm(c)?,
        PeripheralConfig::Gpio(c) => pack_gpio(c)?,
    };
    log::debug!(
        "Packed {} payload: {} bytes",
        config.peripheral_type(),
        payload.len()
    );
    Ok(payload)
}

fn pack_uart(config: &UartConfig) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; UART_PAYLOAD_LEN];

    payload[0] = trailing_digit("instance", &config.instance)?;
    payload[1..5].copy_from_slice(&config.baud_rate.to_be_bytes());
    payload[5] = config.data_bits;
    payload[6] = config.parity.wire_code();
    payload[7] = config.stop_bits.wire_code();
    payload[8] = config.flow_control.wire_code();

    let mut flags = 0u8;
    if config.dma_enabled {
        flags |= 0x80;
    }
    if config.interrupt_enabled {
        flags |= 0x40;
    }
    if config.auto_baud {
        flags |= 0x20;
    }
    payload[9] = flags;

    payload[10] = config.oversampling;
    payload[11..13].copy_from_slice(&config.tx_buffer_size.to_be_bytes());
    payload[13..15].copy_from_slice(&config.rx_buffer_size.to_be_bytes());
    payload[15] = trailing_digit("txPin", &config.tx_pin)?;
    payload[16] = trailing_digit("rxPin", &config.rx_pin)?;
    payload[17] = optional_pin("rtsPin", config.rts_pin.as_ref())?;
    payload[18] = optional_pin("ctsPin", config.cts_pin.as_ref())?;

    Ok(payload)
}

fn pack_spi(config: &SpiConfig) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; SPI_PAYLOAD_LEN];

    payload[0] = trailing_digit("instance", &config.instance)?;
    payload[1] = config.mode.wire_code();
    payload[2] = config.data_size;
    payload[3] = config.clock_polarity;
    payload[4] = config.clock_phase;
    payload[5] = config.baud_prescaler;

    let mut flags = 0u8;
    if config.crc_enabled {
        flags |= 0x80;
    }
    if config.nss_pulse {
        flags |= 0x40;
    }
    if config.dma_enabled {
        flags |= 0x20;
    }
    if config.interrupt_enabled {
        flags |= 0x10;
    }
    payload[6] = flags;

    payload[7] = config.direction.wire_code();
    payload[8] = trailing_digit("mosiPin", &config.mosi_pin)?;
    payload[9] = trailing_digit("misoPin", &config.miso_pin)?;
    payload[10] = trailing_digit("sckPin", &config.sck_pin)?;
    payload[11] = trailing_digit("nssPin", &config.nss_pin)?;

    Ok(payload)
}

fn pack_i2c(config: &I2cConfig) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; I2C_PAYLOAD_LEN];

    payload[0] = trailing_digit("instance", &config.instance)?;
    payload[1] = config.address;
    payload[2..6].copy_from_slice(&config.clock_speed.to_be_bytes());
    payload[6] = config.duty_cycle.wire_code();

    let mut flags = 0u8;
    if config.general_call {
        flags |= 0x80;
    }
    if config.no_stretch {
        flags |= 0x40;
    }
    if config.dma_enabled {
        flags |= 0x20;
    }
    if config.interrupt_enabled {
        flags |= 0x10;
    }
    payload[7] = flags;

    payload[8] = trailing_digit("sdaPin", &config.sda_pin)?;
    payload[9] = trailing_digit("sclPin", &config.scl_pin)?;

    Ok(payload)
}

fn pack_pwm(config: &PwmConfig) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; PWM_PAYLOAD_LEN];

    payload[0] = trailing_digit("instance", &config.instance)?;
    payload[1..5].copy_from_slice(&config.frequency.to_be_bytes());
    // Duty cycle percentage scaled by 100, so two decimals survive the wire.
    let duty = (config.duty_cycle * 100.0).round() as u16;
    payload[5..7].copy_from_slice(&duty.to_be_bytes());
    payload[7] = trailing_digit("outputPin", &config.output_pin)?;

    Ok(payload)
}

fn pack_gpio(config: &GpioConfig) -> Result<Vec<u8>> {
    let mut payload = vec![0u8; GPIO_PAYLOAD_LEN];

    payload[0] = trailing_digit("pin", &config.pin)?;
    payload[1] = config.direction.wire_code();
    payload[2] = config.pull_up as u8;
    payload[3] = config.pull_down as u8;

    Ok(payload)
}
