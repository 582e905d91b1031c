//! Type-safe argument contracts for the external utilities.
//!
//! Instead of raw string vectors, each invocation is a struct implementing
//! [`CommandArgs`]. The struct definition is the contract with the utility's
//! command line, so a misspelled verb or flag is a compile error rather than
//! a runtime failure.

use crate::types::ServiceAction;
use strum::Display;

/// Trait for typed command arguments.
///
/// # Contract
///
/// - `program()`: the executable to invoke (name or path, resolved via PATH).
/// - `to_cli_args()`: arguments exactly as the utility expects them.
pub trait CommandArgs {
    /// The executable to run.
    fn program(&self) -> &str;

    /// Convert struct fields to CLI arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Human readable command line, for logs and error messages.
    fn display_command(&self) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.to_cli_args());
        parts.join(" ")
    }
}

/// systemctl sub-commands used by the installer and the control commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SystemctlVerb {
    #[strum(serialize = "daemon-reload")]
    DaemonReload,
    #[strum(serialize = "enable")]
    Enable,
    #[strum(serialize = "start")]
    Start,
    #[strum(serialize = "stop")]
    Stop,
    #[strum(serialize = "restart")]
    Restart,
}

impl From<ServiceAction> for SystemctlVerb {
    fn from(action: ServiceAction) -> Self {
        match action {
            ServiceAction::Start => Self::Start,
            ServiceAction::Stop => Self::Stop,
            ServiceAction::Restart => Self::Restart,
        }
    }
}

/// Arguments for one `systemctl` invocation.
///
/// | Field     | Position | Notes |
/// |-----------|----------|-------|
/// | `verb`    | 1        | sub-command |
/// | `service` | 2        | omitted for `daemon-reload` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemctlArgs {
    pub program: String,
    pub verb: SystemctlVerb,
    pub service: Option<String>,
}

impl SystemctlArgs {
    pub fn daemon_reload(program: &str) -> Self {
        Self {
            program: program.to_string(),
            verb: SystemctlVerb::DaemonReload,
            service: None,
        }
    }

    pub fn for_service(program: &str, verb: SystemctlVerb, service: &str) -> Self {
        Self {
            program: program.to_string(),
            verb,
            service: Some(service.to_string()),
        }
    }
}

impl CommandArgs for SystemctlArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![self.verb.to_string()];
        if let Some(ref service) = self.service {
            args.push(service.clone());
        }
        args
    }
}

/// Arguments for a bounded `journalctl` query in JSON output mode.
///
/// Produces `-n <lines> -u <unit> --output=json --no-pager`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalctlArgs {
    pub program: String,
    pub unit: String,
    pub lines: u32,
}

impl CommandArgs for JournalctlArgs {
    fn program(&self) -> &str {
        &self.program
    }

    fn to_cli_args(&self) -> Vec<String> {
        vec![
            "-n".to_string(),
            self.lines.to_string(),
            "-u".to_string(),
            self.unit.clone(),
            "--output=json".to_string(),
            "--no-pager".to_string(),
        ]
    }
}
