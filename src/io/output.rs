//! Output management for CLI commands.
//!
//! Handles formatting and display for different output formats,
//! providing a unified interface for text and JSON output.

use crate::display::THEME;
use crate::error::IdlError;
use crate::io::exit_code::ExitCode;
use crate::io::format::{JsonResponse, OutputFormat};
use serde::Serialize;
use std::io::{self, Write};

/// Manages output formatting and display.
///
/// Member lines and JSON envelopes go to stdout; diagnostics go to stderr.
pub struct OutputManager {
    format: OutputFormat,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl OutputManager {
    /// Create a new output manager with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Create an output manager with custom writers.
    pub fn new_with_writers(
        format: OutputFormat,
        stdout: Box<dyn Write>,
        stderr: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            stdout,
            stderr,
        }
    }

    /// Raw stdout for streaming line output.
    pub fn stdout(&mut self) -> &mut Box<dyn Write> {
        &mut self.stdout
    }

    /// Output a prepared JSON response regardless of the configured format.
    pub fn json<T: Serialize>(&mut self, response: &JsonResponse<T>) -> io::Result<ExitCode> {
        ignore_broken_pipe(write_json(&mut self.stdout, response))?;
        Ok(ExitCode::Success)
    }

    /// Output an error with suggestions.
    pub fn error(&mut self, error: &IdlError) -> io::Result<ExitCode> {
        match self.format {
            OutputFormat::Json => {
                let response = JsonResponse::from_error(error);
                write_json(&mut self.stderr, &response)?;
            }
            OutputFormat::Text => {
                writeln!(self.stderr, "{}", THEME.error_with_icon(&format!("Error: {error}")))?;
                for suggestion in error.recovery_suggestions() {
                    writeln!(self.stderr, "  Suggestion: {suggestion}")?;
                }
            }
        }
        Ok(ExitCode::from_error(error))
    }

    /// Output informational message (text mode only).
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        if matches!(self.format, OutputFormat::Text) {
            ignore_broken_pipe(writeln!(self.stdout, "{message}"))?;
        }
        Ok(())
    }
}

fn write_json<T: Serialize>(out: &mut Box<dyn Write>, response: &JsonResponse<T>) -> io::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(response)?)
}

/// A closed pipe (`htmlidl | head`) is not an error for the run.
fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
