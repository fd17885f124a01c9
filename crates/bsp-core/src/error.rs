//! Error types for board example operations

use std::io;
use thiserror::Error;

/// Result type for board example operations
pub type Result<T> = std::result::Result<T, BspError>;

/// Errors that can occur while driving board facilities
#[derive(Error, Debug)]
pub enum BspError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Syscall error: {0}")]
    Syscall(String),

    #[error("Sysfs error: {0}")]
    Sysfs(String),

    #[error("EEPROM error: {0}")]
    Eeprom(String),

    #[error("RTC error: {0}")]
    Rtc(String),

    #[error("Capability error: {0}")]
    Capability(String),

    #[error("Seccomp error: {0}")]
    Seccomp(String),

    #[error("PRU error: {0}")]
    Pru(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<nix::errno::Errno> for BspError {
    fn from(errno: nix::errno::Errno) -> Self {
        BspError::Syscall(errno.desc().to_string())
    }
}

impl BspError {
    /// Wrap an io error with the path it concerned
    pub fn io_at(context: impl std::fmt::Display, err: io::Error) -> Self {
        BspError::Io(io::Error::new(err.kind(), format!("{}: {}", context, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BspError::NotFound("LED 2".to_string());
        assert_eq!(err.to_string(), "Not found: LED 2");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = BspError::from(io_err);
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_from_errno() {
        let err = BspError::from(nix::errno::Errno::EPERM);
        assert!(err.to_string().starts_with("Syscall error"));
    }

    #[test]
    fn test_io_at_keeps_kind_and_context() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        match BspError::io_at("/dev/rtc0", io_err) {
            BspError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::PermissionDenied);
                assert!(e.to_string().contains("/dev/rtc0"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_result_error() {
        fn returns_error() -> Result<i32> {
            Err(BspError::Rtc("RTC_RD_TIME failed".to_string()))
        }
        assert!(returns_error().is_err());
    }
}
