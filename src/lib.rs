//! sdmanager library
//!
//! Core of the systemd service manager: the install wizard, unit file
//! rendering, the install sequence and the single-shot service controls.

pub mod app;
pub mod cli;
pub mod command_args;
pub mod command_runner;
pub mod config;
pub mod error;
pub mod installer;
pub mod journal;
pub mod process_guard;
pub mod service_control;
pub mod theme;
pub mod types;
pub mod ui;
pub mod unit_file;
pub mod validation;
pub mod wizard;

// Re-export main types for convenience
pub use command_args::{CommandArgs, JournalctlArgs, SystemctlArgs, SystemctlVerb};
pub use command_runner::{CommandOutput, CommandRunner, FakeRunner, RunError, SystemRunner};
pub use config::{ConfigOverrides, ManagerConfig};
pub use error::{
    InstallError, InstallFailure, RenderError, Result, SdManagerError, StepFailure,
    ValidationError,
};
pub use installer::{INSTALL_COMPLETE, InstallOutcome, install};
pub use process_guard::{ChildRegistry, CommandProcessGroup, ProcessGuard};
pub use service_control::{ServiceControl, run_service_action};
pub use types::{ServiceAction, ServiceConfig, UserActions};
pub use wizard::{SystemBackend, WizardBackend, WizardEvent, WizardSession, WizardState};
