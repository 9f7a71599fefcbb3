//! Command execution over the session's interrupt endpoints
//!
//! One primitive underlies every operation: write a 64-byte command frame to
//! the OUT endpoint, then read a 64-byte response frame from the IN
//! endpoint, each under the fixed 1000 ms timeout. A write failure aborts
//! the exchange before any read; nothing is ever retried, and a short
//! transfer is a hard failure rather than partial data.

use crate::usb::error::{DeviceError, Result, TransferDirection};
use crate::usb::session::DeviceSession;
use protocol::{
    CommandCode, CommandFrame, DeviceModel, FirmwareVersion, OutletIndex, OutletState,
    ResponseFrame, FRAME_SIZE,
};
use std::time::Duration;
use tracing::debug;

/// OUT endpoint of the strip's single interface
pub const ENDPOINT_OUT: u8 = 0x01;
/// IN endpoint of the strip's single interface
pub const ENDPOINT_IN: u8 = 0x81;
/// Fixed timeout applied to every transfer, both directions
pub const TRANSFER_TIMEOUT: Duration = Duration::from_millis(1000);

/// The seam between exchange logic and the USB transport
///
/// `DeviceSession` is the real implementation; tests substitute a scripted
/// one to exercise the exchange logic without hardware.
pub trait CommandTransport {
    fn write_frame(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<()>;
    fn read_frame(&mut self) -> Result<[u8; FRAME_SIZE]>;
}

impl CommandTransport for DeviceSession {
    fn write_frame(&mut self, frame: &[u8; FRAME_SIZE]) -> Result<()> {
        let written = self
            .write_interrupt(ENDPOINT_OUT, frame, TRANSFER_TIMEOUT)
            .map_err(|source| DeviceError::Transfer {
                direction: TransferDirection::Write,
                source,
            })?;
        check_full_frame(TransferDirection::Write, written)?;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<[u8; FRAME_SIZE]> {
        let mut buf = [0u8; FRAME_SIZE];
        let read = self
            .read_interrupt(ENDPOINT_IN, &mut buf, TRANSFER_TIMEOUT)
            .map_err(|source| DeviceError::Transfer {
                direction: TransferDirection::Read,
                source,
            })?;
        check_full_frame(TransferDirection::Read, read)?;
        Ok(buf)
    }
}

/// A transfer that moved fewer than [`FRAME_SIZE`] bytes failed as a whole
fn check_full_frame(direction: TransferDirection, actual: usize) -> Result<()> {
    if actual != FRAME_SIZE {
        return Err(DeviceError::ShortTransfer {
            direction,
            expected: FRAME_SIZE,
            actual,
        });
    }
    Ok(())
}

/// Execute one command/response exchange and return response bytes 0 and 1
pub fn execute<T: CommandTransport>(transport: &mut T, code: CommandCode) -> Result<(u8, u8)> {
    debug!(command = %code, wire_byte = code.wire_byte(), "executing command");

    let frame = CommandFrame::new(code);
    transport.write_frame(frame.as_bytes())?;

    let response = ResponseFrame::from(transport.read_frame()?);
    debug!(
        byte0 = response.byte0(),
        byte1 = response.byte1(),
        "response received"
    );

    Ok((response.byte0(), response.byte1()))
}

/// Query the device model
pub fn model<T: CommandTransport>(transport: &mut T) -> Result<DeviceModel> {
    let (byte0, _) = execute(transport, CommandCode::GetModel)?;
    Ok(DeviceModel::from_wire(byte0))
}

/// Query the firmware version
pub fn firmware_version<T: CommandTransport>(transport: &mut T) -> Result<FirmwareVersion> {
    let (byte0, byte1) = execute(transport, CommandCode::GetFirmwareVersion)?;
    Ok(FirmwareVersion::from_wire(byte0, byte1))
}

/// Query the on/off state of one outlet
pub fn outlet_state<T: CommandTransport>(
    transport: &mut T,
    outlet: OutletIndex,
) -> Result<OutletState> {
    let (byte0, _) = execute(transport, CommandCode::GetOutletState(outlet))?;
    Ok(OutletState::from_wire(byte0))
}
