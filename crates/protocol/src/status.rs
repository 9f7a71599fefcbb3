//! Decoding of response bytes into domain values
//!
//! All decoders are total: every byte value maps to something, with
//! unrecognized model codes kept as an explicit variant instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Device model, decoded from byte 0 of the `GetModel` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceModel {
    /// Plain power strip
    Basic,
    /// Digital I/O variant
    DigitalIo,
    /// Watchdog variant
    Watchdog,
    /// Smart variant
    Smart,
    /// Model code this protocol version does not know
    Unrecognized(u8),
}

impl DeviceModel {
    pub fn from_wire(byte: u8) -> Self {
        match byte {
            1 => DeviceModel::Basic,
            2 => DeviceModel::DigitalIo,
            3 => DeviceModel::Watchdog,
            4 => DeviceModel::Smart,
            other => DeviceModel::Unrecognized(other),
        }
    }
}

impl fmt::Display for DeviceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Labels match the original vendor tool.
        match self {
            DeviceModel::Basic => write!(f, "Basic"),
            DeviceModel::DigitalIo => write!(f, "digIO"),
            DeviceModel::Watchdog => write!(f, "watchdog"),
            DeviceModel::Smart => write!(f, "smart"),
            DeviceModel::Unrecognized(code) => write!(f, "unknown ({code:#04x})"),
        }
    }
}

/// Firmware version, decoded from bytes 0 and 1 of the
/// `GetFirmwareVersion` response
///
/// Any byte pair is accepted as-is; the device defines no valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
}

impl FirmwareVersion {
    pub fn from_wire(byte0: u8, byte1: u8) -> Self {
        FirmwareVersion {
            major: byte0,
            minor: byte1,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// On/off state of one outlet, decoded from byte 0 of a
/// `GetOutletState` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutletState {
    Off,
    On,
}

impl OutletState {
    /// Zero is off, any nonzero byte is on
    pub fn from_wire(byte: u8) -> Self {
        if byte == 0 {
            OutletState::Off
        } else {
            OutletState::On
        }
    }

    pub fn is_on(self) -> bool {
        matches!(self, OutletState::On)
    }
}

impl fmt::Display for OutletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutletState::Off => write!(f, "off"),
            OutletState::On => write!(f, "on"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_decode_table() {
        assert_eq!(DeviceModel::from_wire(1), DeviceModel::Basic);
        assert_eq!(DeviceModel::from_wire(2), DeviceModel::DigitalIo);
        assert_eq!(DeviceModel::from_wire(3), DeviceModel::Watchdog);
        assert_eq!(DeviceModel::from_wire(4), DeviceModel::Smart);
        assert_eq!(DeviceModel::from_wire(0), DeviceModel::Unrecognized(0));
        assert_eq!(DeviceModel::from_wire(5), DeviceModel::Unrecognized(5));
    }

    #[test]
    fn test_model_display() {
        assert_eq!(DeviceModel::Watchdog.to_string(), "watchdog");
        assert_eq!(DeviceModel::Unrecognized(0xfe).to_string(), "unknown (0xfe)");
    }

    #[test]
    fn test_firmware_version_accepts_any_pair() {
        let version = FirmwareVersion::from_wire(2, 5);
        assert_eq!(version.major, 2);
        assert_eq!(version.minor, 5);
        assert_eq!(version.to_string(), "2.5");

        let extreme = FirmwareVersion::from_wire(255, 0);
        assert_eq!(extreme.to_string(), "255.0");
    }

    #[test]
    fn test_outlet_state_zero_is_off_nonzero_is_on() {
        assert_eq!(OutletState::from_wire(0), OutletState::Off);
        assert_eq!(OutletState::from_wire(1), OutletState::On);
        assert_eq!(OutletState::from_wire(255), OutletState::On);
        assert!(!OutletState::from_wire(0).is_on());
        assert!(OutletState::from_wire(42).is_on());
    }
}
