//! Wizard state machine
//!
//! The wizard walks a fixed forward sequence. A state is never revisited
//! once passed; a rejected input re-enters the same state.
//!
//! # State Flow
//!
//! ```text
//! ServiceName
//!     ↓
//! UserName
//!     ↓
//! WorkingDirectory
//!     ↓
//! ExecStart
//!     ↓
//! StandardOutput
//!     ↓
//! StandardError
//!     ↓
//! SyslogIdentifier
//!     ↓
//! MemoryHigh
//!     ↓
//! MemoryMax
//!     ↓
//! UnitLocation ──(no existing file)──┐
//!     ↓                              │
//! Overwrite                          │
//!     ↓                              │
//! OptionsSelect  ←───────────────────┘
//!     ↓
//! PreviewUnit
//!     ↓
//! Done
//!
//! (Error is a display marker only; no transition enters it)
//! ```

use std::fmt;

/// Wizard states in sequential order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WizardState {
    ServiceName = 0,
    UserName = 1,
    WorkingDirectory = 2,
    ExecStart = 3,
    StandardOutput = 4,
    StandardError = 5,
    SyslogIdentifier = 6,
    /// Soft memory limit, MB
    MemoryHigh = 7,
    /// Hard memory limit, MB; checked against MemoryHigh
    MemoryMax = 8,
    /// Output directory; decides whether Overwrite is visited
    UnitLocation = 9,
    /// Only entered when the target unit file already exists
    Overwrite = 10,
    /// Toggle list, not a text field
    OptionsSelect = 11,
    /// Read-only preview; confirming runs the installer
    PreviewUnit = 12,
    /// Installation succeeded (terminal state)
    Done = 13,
    /// Display marker (terminal state)
    Error = 255,
}

impl WizardState {
    /// Numeric position in the sequence (255 for Error)
    #[inline]
    pub const fn order(self) -> u8 {
        self as u8
    }

    /// Returns true for Done and Error
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Returns true for states that read a line of text
    pub const fn takes_text(self) -> bool {
        !matches!(
            self,
            Self::OptionsSelect | Self::PreviewUnit | Self::Done | Self::Error
        )
    }

    /// Successor in the linear order. UnitLocation's successor is Overwrite;
    /// skipping it is decided by the session.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ServiceName => Some(Self::UserName),
            Self::UserName => Some(Self::WorkingDirectory),
            Self::WorkingDirectory => Some(Self::ExecStart),
            Self::ExecStart => Some(Self::StandardOutput),
            Self::StandardOutput => Some(Self::StandardError),
            Self::StandardError => Some(Self::SyslogIdentifier),
            Self::SyslogIdentifier => Some(Self::MemoryHigh),
            Self::MemoryHigh => Some(Self::MemoryMax),
            Self::MemoryMax => Some(Self::UnitLocation),
            Self::UnitLocation => Some(Self::Overwrite),
            Self::Overwrite => Some(Self::OptionsSelect),
            Self::OptionsSelect => Some(Self::PreviewUnit),
            Self::PreviewUnit => Some(Self::Done),
            Self::Done | Self::Error => None,
        }
    }

    /// Short name shown in the step header
    pub const fn description(self) -> &'static str {
        match self {
            Self::ServiceName => "Service name",
            Self::UserName => "User",
            Self::WorkingDirectory => "Working directory",
            Self::ExecStart => "ExecStart",
            Self::StandardOutput => "StandardOutput",
            Self::StandardError => "StandardError",
            Self::SyslogIdentifier => "SyslogIdentifier",
            Self::MemoryHigh => "MemoryHigh",
            Self::MemoryMax => "MemoryMax",
            Self::UnitLocation => "Unit location",
            Self::Overwrite => "Overwrite",
            Self::OptionsSelect => "Options",
            Self::PreviewUnit => "Preview",
            Self::Done => "Done",
            Self::Error => "Error",
        }
    }

    /// Prompt shown above the input
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::ServiceName => "Enter the service name:",
            Self::UserName => "Enter the user to run the service as (optional):",
            Self::WorkingDirectory => "Enter the working directory (default: current directory):",
            Self::ExecStart => "Enter the ExecStart command (default: this executable):",
            Self::StandardOutput => "Enter StandardOutput (optional):",
            Self::StandardError => "Enter StandardError (optional):",
            Self::SyslogIdentifier => "Enter SyslogIdentifier (optional):",
            Self::MemoryHigh => "Enter MemoryHigh in MB (0 = no limit):",
            Self::MemoryMax => "Enter MemoryMax in MB (0 = no limit):",
            Self::UnitLocation => "Enter the directory for the unit file:",
            Self::Overwrite => "The unit file already exists. Overwrite? (y/n):",
            Self::OptionsSelect => "Select options (Space to toggle, Enter to confirm):",
            Self::PreviewUnit => "Unit file preview (Enter to install, Esc to cancel):",
            Self::Done => "Installation finished",
            Self::Error => "Error",
        }
    }

    /// All states in order (excluding Error)
    pub const fn all_states() -> &'static [Self] {
        &[
            Self::ServiceName,
            Self::UserName,
            Self::WorkingDirectory,
            Self::ExecStart,
            Self::StandardOutput,
            Self::StandardError,
            Self::SyslogIdentifier,
            Self::MemoryHigh,
            Self::MemoryMax,
            Self::UnitLocation,
            Self::Overwrite,
            Self::OptionsSelect,
            Self::PreviewUnit,
            Self::Done,
        ]
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
