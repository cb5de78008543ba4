use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::peripheral::PeripheralType;

/// Frame boundary sentinels. Payload bytes are not escaped when they collide
/// with these; frames are always length-delimited, never re-synced from a
/// raw stream.
pub const FRAME_START: u8 = 0xAA;
pub const FRAME_END: u8 = 0x55;

/// Framing constants shared between the codec and the board firmware: the
/// start/end sentinels plus the command code assigned to each peripheral
/// type. Built once and passed by reference into every encode call rather
/// than read as module globals.
#[derive(Debug, Clone)]
pub struct FrameProfile {
    start: u8,
    end: u8,
    commands: HashMap<PeripheralType, u8>,
}

impl FrameProfile {
    /// The firmware's standard command table. Codes past GPIO are reserved;
    /// they frame nothing today but stay stable for future peripherals.
    pub fn standard() -> Self {
        let commands = HashMap::from([
            (PeripheralType::Uart, 0x01),
            (PeripheralType::Spi, 0x02),
            (PeripheralType::I2c, 0x03),
            (PeripheralType::Pwm, 0x04),
            (PeripheralType::Gpio, 0x05),
            (PeripheralType::Can, 0x06),
            (PeripheralType::Usb, 0x07),
            (PeripheralType::Wifi, 0x08),
            (PeripheralType::Bluetooth, 0x09),
            (PeripheralType::Config, 0x0A),
        ]);

        Self {
            start: FRAME_START,
            end: FRAME_END,
            commands,
        }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn command_code(&self, ptype: PeripheralType) -> Option<u8> {
        self.commands.get(&ptype).copied()
    }
}

impl Default for FrameProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Process-wide standard profile, built on first use.
pub static STANDARD_PROFILE: Lazy<FrameProfile> = Lazy::new(FrameProfile::standard);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_command_codes() {
        let profile = FrameProfile::standard();
        assert_eq!(profile.command_code(PeripheralType::Uart), Some(0x01));
        assert_eq!(profile.command_code(PeripheralType::Gpio), Some(0x05));
        assert_eq!(profile.command_code(PeripheralType::Config), Some(0x0A));
    }

    #[test]
    fn test_standard_sentinels() {
        let profile = FrameProfile::standard();
        assert_eq!(profile.start(), 0xAA);
        assert_eq!(profile.end(), 0x55);
    }
}
