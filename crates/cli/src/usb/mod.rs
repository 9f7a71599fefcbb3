//! USB device layer for the PowerUSB strip
//!
//! Everything that touches rusb lives here: locating the one attached
//! device, holding the exclusive session to it, and moving 64-byte command
//! frames over its interrupt endpoints. The wire format itself comes from
//! the protocol crate.

pub mod channel;
pub mod error;
pub mod locator;
pub mod session;

pub use channel::CommandTransport;
pub use error::{DeviceError, Result, TransferDirection};
pub use locator::DeviceMatch;
pub use session::DeviceSession;
