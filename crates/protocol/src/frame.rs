//! Fixed-size command and response frames
//!
//! Every exchange with the device moves exactly [`FRAME_SIZE`] bytes in each
//! direction, one interrupt transfer per direction. Only byte 0 of a command
//! frame carries meaning; the rest is filled with [`FILL_BYTE`]. Of a
//! response frame only bytes 0 and 1 are defined for the commands this
//! protocol issues; the remaining bytes are transport padding.
//!
//! A short transfer in either direction is a hard failure of the whole
//! exchange. Frames never represent partial data, so both types wrap a full
//! `[u8; FRAME_SIZE]` and nothing else.

use crate::command::CommandCode;

/// Frame size in bytes, both directions
pub const FRAME_SIZE: usize = 64;

/// Fill value for the unused bytes of an outgoing frame
pub const FILL_BYTE: u8 = 0xff;

/// A 64-byte frame written to the device's OUT endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame([u8; FRAME_SIZE]);

impl CommandFrame {
    /// Build the frame for one command: wire byte first, fill after
    pub fn new(code: CommandCode) -> Self {
        let mut buf = [FILL_BYTE; FRAME_SIZE];
        buf[0] = code.wire_byte();
        CommandFrame(buf)
    }

    /// The raw bytes, ready for the OUT transfer
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }
}

/// A 64-byte frame read back from the device's IN endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame([u8; FRAME_SIZE]);

impl ResponseFrame {
    /// First response byte; carries the value for every current command
    pub fn byte0(&self) -> u8 {
        self.0[0]
    }

    /// Second response byte; meaningful only for the firmware-version reply
    pub fn byte1(&self) -> u8 {
        self.0[1]
    }
}

impl From<[u8; FRAME_SIZE]> for ResponseFrame {
    fn from(buf: [u8; FRAME_SIZE]) -> Self {
        ResponseFrame(buf)
    }
}
