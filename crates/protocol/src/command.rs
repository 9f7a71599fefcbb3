//! Command codes and their wire bytes
//!
//! Every operation the device understands is one byte on the wire. The full
//! set is closed: the firmware version observed here exposes three reads
//! (model, firmware version, per-outlet state) and nothing else.

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three switchable outlets on the strip
///
/// Outlet numbering is 1-based, matching the labels printed on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutletIndex {
    One,
    Two,
    Three,
}

impl OutletIndex {
    /// All outlets, in panel order
    pub const ALL: [OutletIndex; 3] = [OutletIndex::One, OutletIndex::Two, OutletIndex::Three];

    /// The 1-based outlet number
    pub fn number(self) -> u8 {
        match self {
            OutletIndex::One => 1,
            OutletIndex::Two => 2,
            OutletIndex::Three => 3,
        }
    }
}

impl TryFrom<u8> for OutletIndex {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OutletIndex::One),
            2 => Ok(OutletIndex::Two),
            3 => Ok(OutletIndex::Three),
            other => Err(ProtocolError::InvalidOutlet(other)),
        }
    }
}

impl fmt::Display for OutletIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Protocol operations, each mapping to one fixed command byte
///
/// Dispatch is by pattern match so a new command cannot silently fall
/// through either encoding or decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCode {
    /// Read the device model identifier
    GetModel,
    /// Read the firmware version (major, minor)
    GetFirmwareVersion,
    /// Read the on/off state of one outlet
    GetOutletState(OutletIndex),
}

impl CommandCode {
    /// Every command the protocol defines
    pub const ALL: [CommandCode; 5] = [
        CommandCode::GetModel,
        CommandCode::GetFirmwareVersion,
        CommandCode::GetOutletState(OutletIndex::One),
        CommandCode::GetOutletState(OutletIndex::Two),
        CommandCode::GetOutletState(OutletIndex::Three),
    ];

    /// The command byte as it appears in byte 0 of the outgoing frame
    ///
    /// Note the outlet-3 byte breaks the a1/a2 sequence; the value comes
    /// straight from the device firmware.
    pub fn wire_byte(self) -> u8 {
        match self {
            CommandCode::GetModel => 0xaa,
            CommandCode::GetFirmwareVersion => 0xa7,
            CommandCode::GetOutletState(OutletIndex::One) => 0xa1,
            CommandCode::GetOutletState(OutletIndex::Two) => 0xa2,
            CommandCode::GetOutletState(OutletIndex::Three) => 0xac,
        }
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandCode::GetModel => write!(f, "get-model"),
            CommandCode::GetFirmwareVersion => write!(f, "get-firmware-version"),
            CommandCode::GetOutletState(outlet) => write!(f, "get-outlet-{outlet}-state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bytes_match_firmware_table() {
        assert_eq!(CommandCode::GetModel.wire_byte(), 0xaa);
        assert_eq!(CommandCode::GetFirmwareVersion.wire_byte(), 0xa7);
        assert_eq!(
            CommandCode::GetOutletState(OutletIndex::One).wire_byte(),
            0xa1
        );
        assert_eq!(
            CommandCode::GetOutletState(OutletIndex::Two).wire_byte(),
            0xa2
        );
        assert_eq!(
            CommandCode::GetOutletState(OutletIndex::Three).wire_byte(),
            0xac
        );
    }

    #[test]
    fn test_wire_bytes_are_distinct() {
        for (i, a) in CommandCode::ALL.iter().enumerate() {
            for b in &CommandCode::ALL[i + 1..] {
                assert_ne!(a.wire_byte(), b.wire_byte(), "{a} and {b} collide");
            }
        }
    }

    #[test]
    fn test_outlet_index_from_valid() {
        assert_eq!(OutletIndex::try_from(1).unwrap(), OutletIndex::One);
        assert_eq!(OutletIndex::try_from(2).unwrap(), OutletIndex::Two);
        assert_eq!(OutletIndex::try_from(3).unwrap(), OutletIndex::Three);
    }

    #[test]
    fn test_outlet_index_rejects_out_of_range() {
        for n in [0u8, 4, 5, 255] {
            match OutletIndex::try_from(n) {
                Err(ProtocolError::InvalidOutlet(got)) => assert_eq!(got, n),
                other => panic!("expected InvalidOutlet({n}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_outlet_index_numbers() {
        for (outlet, n) in OutletIndex::ALL.iter().zip(1u8..) {
            assert_eq!(outlet.number(), n);
            assert_eq!(format!("{outlet}"), format!("{n}"));
        }
    }
}
