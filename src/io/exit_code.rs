//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - run completed (zero matched files is still a success)
//! - `3-125`: Specific errors a calling script can react to
//! - `126-255`: Reserved by shell

use crate::error::IdlError;

/// Standard exit codes for CLI operations.
///
/// These codes follow Unix conventions where 0 indicates success,
/// and non-zero values indicate various error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Run succeeded (code 0)
    Success = 0,

    /// An IDL file could not be parsed or held no definitions (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,

    /// Construct kind the requested operation cannot handle (code 8)
    UnsupportedOperation = 8,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Convert an `IdlError` to the appropriate exit code.
    pub fn from_error(error: &IdlError) -> Self {
        match error {
            IdlError::Parse { .. } | IdlError::NoConstructs { .. } => ExitCode::ParseError,
            IdlError::FileRead { .. } | IdlError::FileWrite { .. } | IdlError::Output(_) => {
                ExitCode::IoError
            }
            IdlError::ConfigError { .. } | IdlError::InvalidPattern { .. } => ExitCode::ConfigError,
            IdlError::NotAnInterface { .. } => ExitCode::UnsupportedOperation,
        }
    }
}
