//! Error handling module for sdmanager
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Errors are tiered the same way the wizard reacts to them:
//!
//! - [`ValidationError`] and [`RenderError`] are recoverable in-state messages
//! - [`InstallFailure`] is recoverable too, but carries the partial install log
//! - [`SdManagerError`] is what escapes to the host program

use crate::command_runner::RunError;
use crate::installer::InstallOutcome;
use crate::types::InstallStep;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sdmanager
#[derive(Error, Debug)]
pub enum SdManagerError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input, config values)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unit file rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Installation sequence errors
    #[error("Install error: {0}")]
    Install(#[from] InstallError),

    /// External command errors (systemctl, journalctl)
    #[error("Command error: {0}")]
    Command(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for sdmanager operations
pub type Result<T> = std::result::Result<T, SdManagerError>;

impl SdManagerError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a command error
    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

/// Which free-text field a name check was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Service,
    User,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service => write!(f, "service name"),
            Self::User => write!(f, "user name"),
        }
    }
}

/// Rejection reasons produced by the field validators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyName(NameKind),

    #[error("{kind} contains an invalid character: {ch:?}")]
    InvalidName { kind: NameKind, ch: char },

    #[error("path cannot be empty")]
    EmptyPath,

    #[error("ExecStart command cannot be empty")]
    EmptyCommand,

    #[error("path contains an invalid character: {0:?}")]
    InvalidPathChar(char),

    #[error("directory does not exist: {}", .0.display())]
    MissingParent(PathBuf),

    #[error("not a directory: {}", .0.display())]
    ParentNotDirectory(PathBuf),

    #[error("could not inspect {}: {reason}", .path.display())]
    Inaccessible { path: PathBuf, reason: String },

    #[error("value is not a number")]
    NotANumber,

    #[error("value cannot be negative")]
    Negative,

    #[error("MemoryHigh ({high}M) must be less than MemoryMax ({max}M)")]
    MemoryOrder { high: u64, max: u64 },
}

/// Unit template failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render a unit without a service name")]
    MissingServiceName,

    #[error("cannot render a unit without an ExecStart command")]
    MissingExecStart,

    #[error("{field} must be a single line")]
    MultilineValue { field: &'static str },
}

/// Why an individual install step failed.
#[derive(Error, Debug)]
pub enum StepFailure {
    #[error("file {} already exists and will not be overwritten", .0.display())]
    AlreadyExists(PathBuf),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("command {0} not found, make sure it is installed and on PATH")]
    NotFound(String),

    #[error("could not run {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{program} exited with {}{}", exit_label(.exit_code), output_suffix(.output))]
    Exited {
        program: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("interrupted by signal")]
    Interrupted,
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

fn output_suffix(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {}", output)
    }
}

impl From<RunError> for StepFailure {
    fn from(err: RunError) -> Self {
        match err {
            RunError::NotFound(program) => Self::NotFound(program),
            RunError::Spawn { program, reason } => Self::Spawn { program, reason },
            RunError::Interrupted(_) => Self::Interrupted,
        }
    }
}

/// A failed install step, tagged with the step that failed.
#[derive(Error, Debug)]
#[error("{step} failed: {cause}")]
pub struct InstallError {
    pub step: InstallStep,
    #[source]
    pub cause: StepFailure,
}

/// The executor's error value: the first failure plus everything that
/// succeeded before it.
#[derive(Debug)]
pub struct InstallFailure {
    pub partial: InstallOutcome,
    pub error: InstallError,
}

impl std::fmt::Display for InstallFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.partial.log {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for InstallFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<InstallFailure> for SdManagerError {
    fn from(failure: InstallFailure) -> Self {
        Self::Install(failure.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SdManagerError::config("log_lines must be positive");
        assert_eq!(err.to_string(), "Configuration error: log_lines must be positive");

        let err: SdManagerError = ValidationError::NotANumber.into();
        assert_eq!(err.to_string(), "Validation error: value is not a number");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SdManagerError = io_err.into();
        assert!(matches!(err, SdManagerError::Io(_)));
    }

    #[test]
    fn test_invalid_name_message_names_the_character() {
        let err = ValidationError::InvalidName {
            kind: NameKind::Service,
            ch: ';',
        };
        assert_eq!(
            err.to_string(),
            "service name contains an invalid character: ';'"
        );
    }

    #[test]
    fn test_step_failure_includes_tool_output() {
        let err = InstallError {
            step: InstallStep::ReloadDaemon,
            cause: StepFailure::Exited {
                program: "systemctl".to_string(),
                exit_code: Some(1),
                output: "Access denied".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "reload systemd daemon failed: systemctl exited with status 1: Access denied"
        );
    }

    #[test]
    fn test_signal_exit_has_no_status() {
        let cause = StepFailure::Exited {
            program: "systemctl".to_string(),
            exit_code: None,
            output: String::new(),
        };
        assert_eq!(cause.to_string(), "systemctl exited with a signal");
    }
}
