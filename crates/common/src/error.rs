//! Common error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let msg = Error::Config("invalid log filter: nope".into()).to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("invalid log filter"));
    }
}
