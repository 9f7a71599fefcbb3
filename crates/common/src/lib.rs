//! Common utilities for powerusb-rs
//!
//! Shared plumbing between the protocol crate and the CLI: logging setup
//! and the error wrapper used by it.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::setup_logging;
