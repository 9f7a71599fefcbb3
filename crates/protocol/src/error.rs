//! Protocol error types

use thiserror::Error;

/// Protocol-level errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Outlet number outside the 1..=3 range the device has
    #[error("invalid outlet number {0} (this device has outlets 1-3)")]
    InvalidOutlet(u8),
}

/// Type alias for protocol results
pub type Result<T> = std::result::Result<T, ProtocolError>;
