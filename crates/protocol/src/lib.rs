//! Wire protocol for the PowerUSB managed power strip
//!
//! This crate defines the command/response protocol spoken over USB interrupt
//! transfers: command codes with their wire bytes, the fixed 64-byte frames
//! exchanged in each direction, and the decoding of response bytes into
//! domain values (device model, firmware version, outlet state).
//!
//! The crate is transport-free: it never touches USB. The device layer builds
//! a [`CommandFrame`], moves it over the wire, and hands the interesting
//! response bytes back through the decoders defined here.
//!
//! # Example
//!
//! ```
//! use protocol::{CommandCode, CommandFrame, DeviceModel, OutletIndex, OutletState};
//!
//! let frame = CommandFrame::new(CommandCode::GetOutletState(OutletIndex::One));
//! assert_eq!(frame.as_bytes().len(), 64);
//! assert_eq!(frame.as_bytes()[0], 0xa1);
//!
//! assert_eq!(DeviceModel::from_wire(3), DeviceModel::Watchdog);
//! assert_eq!(OutletState::from_wire(0), OutletState::Off);
//! ```

pub mod command;
pub mod error;
pub mod frame;
pub mod status;

pub use command::{CommandCode, OutletIndex};
pub use error::{ProtocolError, Result};
pub use frame::{CommandFrame, ResponseFrame, FILL_BYTE, FRAME_SIZE};
pub use status::{DeviceModel, FirmwareVersion, OutletState};
