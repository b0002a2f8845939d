//! Error types for IDL inspection and wrapper generation
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a run over a set of IDL files
#[derive(Error, Debug)]
pub enum IdlError {
    /// File system errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Parsing errors
    #[error("Failed to parse IDL file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IDL file '{path}' contains no definitions")]
    NoConstructs { path: PathBuf },

    #[error("First definition '{name}' in '{path}' is not an interface (found {kind})")]
    NotAnInterface {
        path: PathBuf,
        name: String,
        kind: String,
    },

    /// Discovery errors
    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// Writing results to stdout failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl IdlError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::NoConstructs { .. } => "NO_CONSTRUCTS",
            Self::NotAnInterface { .. } => "NOT_AN_INTERFACE",
            Self::InvalidPattern { .. } => "INVALID_PATTERN",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::Output(_) => "OUTPUT_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Ensure the file is not locked by another process",
            ],
            Self::FileWrite { .. } => vec![
                "Check that the output directory exists and is writable",
                "Use --dry-run to print the generated code instead",
            ],
            Self::Parse { .. } => vec![
                "Check the reported line and column for a Web IDL syntax error",
                "Extended attributes must be enclosed in [ ] before the declaration",
            ],
            Self::NoConstructs { .. } => vec![
                "The file is empty or contains only comments",
                "Narrow the file pattern to exclude it",
            ],
            Self::NotAnInterface { .. } => vec![
                "Wrapper generation only supports interface definitions",
                "Move the interface to the top of the file",
            ],
            Self::InvalidPattern { .. } => vec![
                "Use '*' to match within a file name and '**' to match directories",
            ],
            Self::ConfigError { .. } => vec![
                "Run 'htmlidl config' to inspect the effective settings",
                "Run 'htmlidl init --force' to regenerate the settings file",
            ],
            Self::Output(_) => vec![],
        }
    }
}

/// Errors specific to parsing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to parse IDL at line {line}, column {column}: {reason}")]
    SyntaxError {
        line: u32,
        column: u32,
        reason: String,
    },

    #[error("Invalid UTF-8 in source file")]
    InvalidUtf8,
}

/// Result type alias for run operations
pub type IdlResult<T> = Result<T, IdlError>;

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Helper trait for attaching a file path to parse errors
pub trait ErrorContext<T> {
    /// Attach the path of the file being processed
    fn with_path(self, path: &std::path::Path) -> Result<T, IdlError>;
}

impl<T> ErrorContext<T> for ParseResult<T> {
    fn with_path(self, path: &std::path::Path) -> Result<T, IdlError> {
        self.map_err(|source| IdlError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
