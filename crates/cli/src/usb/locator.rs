//! Device discovery
//!
//! Enumerates every attached USB device and filters by the fixed PowerUSB
//! vendor/product identity. The protocol carries no device-selection field,
//! so more than one match is unresolvable and gets rejected instead of
//! guessed at.

use crate::usb::error::{DeviceError, Result};
use rusb::{Context, Device, UsbContext};
use tracing::debug;

/// USB vendor ID of the PowerUSB strip (Microchip)
pub const VENDOR_ID: u16 = 0x04d8;
/// USB product ID of the PowerUSB strip
pub const PRODUCT_ID: u16 = 0x003f;

/// Outcome of one enumeration pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMatch<T> {
    /// No device with the PowerUSB identity is attached
    NotFound,
    /// More than one matching device is attached
    Ambiguous(usize),
    /// Exactly one matching device
    Found(T),
}

impl<T> DeviceMatch<T> {
    /// Unwrap the single match, converting the other outcomes into errors
    ///
    /// Sessions are only ever opened from the value this returns, so
    /// `NotFound` and `Ambiguous` can never reach the open path.
    pub fn require_single(self) -> Result<T> {
        match self {
            DeviceMatch::Found(device) => Ok(device),
            DeviceMatch::NotFound => Err(DeviceError::NotFound),
            DeviceMatch::Ambiguous(count) => Err(DeviceError::Ambiguous(count)),
        }
    }
}

/// List all attached USB devices and classify the PowerUSB matches
///
/// A descriptor read failing for any enumerated device is an error of its
/// own; it never degrades into `NotFound`.
pub fn locate(context: &Context) -> Result<DeviceMatch<Device<Context>>> {
    let devices = context.devices().map_err(DeviceError::Context)?;

    let mut matches = Vec::new();
    for device in devices.iter() {
        let descriptor = device
            .device_descriptor()
            .map_err(DeviceError::Descriptor)?;

        if descriptor.vendor_id() == VENDOR_ID && descriptor.product_id() == PRODUCT_ID {
            debug!(
                bus = device.bus_number(),
                address = device.address(),
                "PowerUSB device found"
            );
            matches.push(device);
        }
    }

    Ok(classify(matches))
}

/// Classify an already-filtered match list
fn classify<T>(mut matches: Vec<T>) -> DeviceMatch<T> {
    match matches.len() {
        0 => DeviceMatch::NotFound,
        1 => DeviceMatch::Found(matches.remove(0)),
        n => DeviceMatch::Ambiguous(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_matches_is_not_found() {
        assert_eq!(classify::<u8>(vec![]), DeviceMatch::NotFound);
    }

    #[test]
    fn test_single_match_is_found() {
        assert_eq!(classify(vec!["dev"]), DeviceMatch::Found("dev"));
    }

    #[test]
    fn test_multiple_matches_are_ambiguous() {
        assert_eq!(classify(vec![1, 2]), DeviceMatch::Ambiguous(2));
        assert_eq!(classify(vec![1, 2, 3, 4]), DeviceMatch::Ambiguous(4));
    }

    #[test]
    fn test_require_single_maps_outcomes() {
        assert_eq!(DeviceMatch::Found(7).require_single().unwrap(), 7);

        assert!(matches!(
            DeviceMatch::<u8>::NotFound.require_single(),
            Err(DeviceError::NotFound)
        ));
        assert!(matches!(
            DeviceMatch::<u8>::Ambiguous(2).require_single(),
            Err(DeviceError::Ambiguous(2))
        ));
    }
}
