//! Device layer error types
//!
//! Every failure is returned to the caller; nothing below `main` terminates
//! the process, and no failure is retried. A timeout surfaces as an ordinary
//! transfer error.

use std::fmt;
use thiserror::Error;

/// Which half of a command/response exchange failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferDirection {
    Write,
    Read,
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferDirection::Write => write!(f, "write"),
            TransferDirection::Read => write!(f, "read"),
        }
    }
}

/// Errors from locating, opening, or talking to the device
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No PowerUSB device is attached
    #[error("PowerUSB device not connected")]
    NotFound,

    /// More than one PowerUSB device is attached; the protocol has no way
    /// to address a specific one
    #[error("{0} PowerUSB devices connected; controlling more than one is not supported")]
    Ambiguous(usize),

    /// USB context could not be created
    #[error("failed to initialize the USB context")]
    Context(#[source] rusb::Error),

    /// A device descriptor could not be read during enumeration
    #[error("failed to read a device descriptor during enumeration")]
    Descriptor(#[source] rusb::Error),

    /// The matched device could not be opened
    #[error("failed to open the PowerUSB device")]
    Open(#[source] rusb::Error),

    /// A kernel driver held the interface and could not be detached
    #[error("failed to detach the kernel driver from interface {interface}")]
    KernelDetach {
        interface: u8,
        #[source]
        source: rusb::Error,
    },

    /// The interface could not be claimed for exclusive use
    #[error("failed to claim interface {interface}")]
    Claim {
        interface: u8,
        #[source]
        source: rusb::Error,
    },

    /// An interrupt transfer failed or timed out
    #[error("USB {direction} transfer failed")]
    Transfer {
        direction: TransferDirection,
        #[source]
        source: rusb::Error,
    },

    /// A transfer moved fewer bytes than a full frame
    #[error("short USB {direction} transfer: expected {expected} bytes, moved {actual}")]
    ShortTransfer {
        direction: TransferDirection,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, DeviceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_names_direction() {
        let err = DeviceError::Transfer {
            direction: TransferDirection::Write,
            source: rusb::Error::Timeout,
        };
        assert!(err.to_string().contains("write"));

        let err = DeviceError::Transfer {
            direction: TransferDirection::Read,
            source: rusb::Error::Pipe,
        };
        assert!(err.to_string().contains("read"));
    }

    #[test]
    fn test_ambiguous_reports_count() {
        let msg = DeviceError::Ambiguous(3).to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("not supported"));
    }
}
