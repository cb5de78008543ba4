use serde::{Deserialize, Serialize};

use super::{PeripheralError, Result};

/// Peripheral controllers addressable by the framing protocol.
///
/// CAN through CONFIG carry reserved command codes for forward compatibility
/// with the board firmware, but no payload layout exists for them yet and the
/// packer rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PeripheralType {
    Uart,
    Spi,
    I2c,
    Pwm,
    Gpio,
    Can,
    Usb,
    Wifi,
    Bluetooth,
    Config,
}

impl PeripheralType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeripheralType::Uart => "UART",
            PeripheralType::Spi => "SPI",
            PeripheralType::I2c => "I2C",
            PeripheralType::Pwm => "PWM",
            PeripheralType::Gpio => "GPIO",
            PeripheralType::Can => "CAN",
            PeripheralType::Usb => "USB",
            PeripheralType::Wifi => "WIFI",
            PeripheralType::Bluetooth => "BLUETOOTH",
            PeripheralType::Config => "CONFIG",
        }
    }
}

impl std::fmt::Display for PeripheralType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    None,
    Even,
    Odd,
}

impl Parity {
    pub fn wire_code(&self) -> u8 {
        match self {
            Parity::None => 0,
            Parity::Even => 1,
            Parity::Odd => 2,
        }
    }
}

/// Stop bit count; packed on the wire as the value times ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopBits {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1.5")]
    OnePointFive,
    #[serde(rename = "2")]
    Two,
}

impl StopBits {
    pub fn wire_code(&self) -> u8 {
        match self {
            StopBits::One => 10,
            StopBits::OnePointFive => 15,
            StopBits::Two => 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowControl {
    None,
    Rts,
    Cts,
    RtsCts,
}

impl FlowControl {
    pub fn wire_code(&self) -> u8 {
        match self {
            FlowControl::None => 0,
            FlowControl::Rts => 1,
            FlowControl::Cts => 2,
            FlowControl::RtsCts => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiMode {
    Master,
    Slave,
}

impl SpiMode {
    pub fn wire_code(&self) -> u8 {
        match self {
            SpiMode::Master => 0,
            SpiMode::Slave => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpiDirection {
    #[serde(rename = "2lines")]
    TwoLines,
    #[serde(rename = "1line")]
    OneLine,
}

impl SpiDirection {
    pub fn wire_code(&self) -> u8 {
        match self {
            SpiDirection::TwoLines => 0,
            SpiDirection::OneLine => 1,
        }
    }
}

/// I2C fast-mode duty cycle ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum I2cDutyCycle {
    #[serde(rename = "2")]
    TwoToOne,
    #[serde(rename = "16_9")]
    SixteenToNine,
}

impl I2cDutyCycle {
    pub fn wire_code(&self) -> u8 {
        match self {
            I2cDutyCycle::TwoToOne => 0,
            I2cDutyCycle::SixteenToNine => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
}

impl PinDirection {
    pub fn wire_code(&self) -> u8 {
        match self {
            PinDirection::Input => 0,
            PinDirection::Output => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UartConfig {
    pub instance: String,
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    #[serde(default)]
    pub dma_enabled: bool,
    #[serde(default)]
    pub interrupt_enabled: bool,
    #[serde(default)]
    pub auto_baud: bool,
    pub oversampling: u8,
    pub tx_buffer_size: u16,
    pub rx_buffer_size: u16,
    pub tx_pin: String,
    pub rx_pin: String,
    #[serde(default)]
    pub rts_pin: Option<String>,
    #[serde(default)]
    pub cts_pin: Option<String>,
}

impl UartConfig {
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(PeripheralError::field("baudRate", "must be non-zero"));
        }
        if !(5..=9).contains(&self.data_bits) {
            return Err(PeripheralError::field(
                "dataBits",
                format!("{} is outside 5..=9", self.data_bits),
            ));
        }
        if self.oversampling != 8 && self.oversampling != 16 {
            return Err(PeripheralError::field(
                "oversampling",
                format!("{} is not 8 or 16", self.oversampling),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiConfig {
    pub instance: String,
    pub mode: SpiMode,
    pub data_size: u8,
    pub clock_polarity: u8,
    pub clock_phase: u8,
    pub baud_prescaler: u8,
    #[serde(default)]
    pub crc_enabled: bool,
    #[serde(default)]
    pub nss_pulse: bool,
    #[serde(default)]
    pub dma_enabled: bool,
    #[serde(default)]
    pub interrupt_enabled: bool,
    pub direction: SpiDirection,
    pub mosi_pin: String,
    pub miso_pin: String,
    pub sck_pin: String,
    pub nss_pin: String,
}

impl SpiConfig {
    pub fn validate(&self) -> Result<()> {
        if !(4..=16).contains(&self.data_size) {
            return Err(PeripheralError::field(
                "dataSize",
                format!("{} is outside 4..=16", self.data_size),
            ));
        }
        if self.clock_polarity > 1 {
            return Err(PeripheralError::field("clockPolarity", "must be 0 or 1"));
        }
        if self.clock_phase > 1 {
            return Err(PeripheralError::field("clockPhase", "must be 0 or 1"));
        }
        if self.baud_prescaler == 0 {
            return Err(PeripheralError::field("baudPrescaler", "must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I2cConfig {
    pub instance: String,
    pub address: u8,
    pub clock_speed: u32,
    pub duty_cycle: I2cDutyCycle,
    #[serde(default)]
    pub general_call: bool,
    #[serde(default)]
    pub no_stretch: bool,
    #[serde(default)]
    pub dma_enabled: bool,
    #[serde(default)]
    pub interrupt_enabled: bool,
    pub sda_pin: String,
    pub scl_pin: String,
}

impl I2cConfig {
    pub fn validate(&self) -> Result<()> {
        if self.address > 0x7F {
            return Err(PeripheralError::field(
                "address",
                format!("0x{:02X} exceeds the 7-bit range", self.address),
            ));
        }
        if self.clock_speed == 0 {
            return Err(PeripheralError::field("clockSpeed", "must be non-zero"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PwmConfig {
    pub instance: String,
    pub frequency: u32,
    /// Duty cycle percentage; packed as the value times one hundred.
    pub duty_cycle: f32,
    pub output_pin: String,
}

impl PwmConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(PeripheralError::field("frequency", "must be non-zero"));
        }
        if !self.duty_cycle.is_finite() || !(0.0..=100.0).contains(&self.duty_cycle) {
            return Err(PeripheralError::field(
                "dutyCycle",
                format!("{} is outside 0..=100", self.duty_cycle),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpioConfig {
    pub pin: String,
    pub direction: PinDirection,
    #[serde(default)]
    pub pull_up: bool,
    #[serde(default)]
    pub pull_down: bool,
}

impl GpioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pin.is_empty() {
            return Err(PeripheralError::field("pin", "must not be empty"));
        }
        Ok(())
    }
}

/// One peripheral configuration as submitted by the dashboard form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "peripheral", rename_all = "UPPERCASE")]
pub enum PeripheralConfig {
    Uart(UartConfig),
    Spi(SpiConfig),
    I2c(I2cConfig),
    Pwm(PwmConfig),
    Gpio(GpioConfig),
}

impl PeripheralConfig {
    pub fn peripheral_type(&self) -> PeripheralType {
        match self {
            PeripheralConfig::Uart(_) => PeripheralType::Uart,
            PeripheralConfig::Spi(_) => PeripheralType::Spi,
            PeripheralConfig::I2c(_) => PeripheralType::I2c,
            PeripheralConfig::Pwm(_) => PeripheralType::Pwm,
            PeripheralConfig::Gpio(_) => PeripheralType::Gpio,
        }
    }

    /// Unit label distinguishing controllers of the same type ("UART2").
    /// GPIO has no controller instance; its pin name serves as the label.
    pub fn instance_label(&self) -> &str {
        match self {
            PeripheralConfig::Uart(c) => &c.instance,
            PeripheralConfig::Spi(c) => &c.instance,
            PeripheralConfig::I2c(c) => &c.instance,
            PeripheralConfig::Pwm(c) => &c.instance,
            PeripheralConfig::Gpio(c) => &c.pin,
        }
    }

    /// Check field domains before packing. Required fields are enforced by
    /// deserialization; this rejects values outside their declared ranges.
    pub fn validate(&self) -> Result<()> {
        match self {
            PeripheralConfig::Uart(c) => c.validate(),
            PeripheralConfig::Spi(c) => c.validate(),
            PeripheralConfig::I2c(c) => c.validate(),
            PeripheralConfig::Pwm(c) => c.validate(),
            PeripheralConfig::Gpio(c) => c.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peripheral_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&PeripheralType::I2c).unwrap(),
            "\"I2C\""
        );
        let t: PeripheralType = serde_json::from_str("\"BLUETOOTH\"").unwrap();
        assert_eq!(t, PeripheralType::Bluetooth);
    }

    #[test]
    fn test_config_tagged_roundtrip() {
        let config = PeripheralConfig::Gpio(GpioConfig {
            pin: "PA5".to_string(),
            direction: PinDirection::Output,
            pull_up: true,
            pull_down: false,
        });

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["peripheral"], "GPIO");
        assert_eq!(json["pin"], "PA5");
        assert_eq!(json["pullUp"], true);

        let back: PeripheralConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_uart_validate_rejects_out_of_domain() {
        let mut config = UartConfig {
            instance: "UART2".to_string(),
            baud_rate: 115200,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            dma_enabled: false,
            interrupt_enabled: false,
            auto_baud: false,
            oversampling: 16,
            tx_buffer_size: 256,
            rx_buffer_size: 256,
            tx_pin: "PA2".to_string(),
            rx_pin: "PA3".to_string(),
            rts_pin: None,
            cts_pin: None,
        };
        assert!(config.validate().is_ok());

        config.data_bits = 12;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dataBits"));

        config.data_bits = 8;
        config.oversampling = 4;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("oversampling"));
    }

    #[test]
    fn test_i2c_validate_rejects_wide_address() {
        let config = I2cConfig {
            instance: "I2C1".to_string(),
            address: 0x90,
            clock_speed: 400_000,
            duty_cycle: I2cDutyCycle::TwoToOne,
            general_call: false,
            no_stretch: false,
            dma_enabled: false,
            interrupt_enabled: false,
            sda_pin: "PB7".to_string(),
            scl_pin: "PB6".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("address"));
    }

    #[test]
    fn test_pwm_validate_rejects_duty_over_100() {
        let config = PwmConfig {
            instance: "TIM3".to_string(),
            frequency: 1_000,
            duty_cycle: 150.0,
            output_pin: "PA6".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dutyCycle"));
    }
}
