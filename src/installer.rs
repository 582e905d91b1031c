//! Install executor
//!
//! Runs the install sequence for one rendered unit:
//!
//! ```text
//! write unit file
//!     ↓
//! systemctl daemon-reload   (if requested)
//!     ↓
//! systemctl enable <name>   (if requested)
//!     ↓
//! systemctl start <name>    (if requested)
//! ```
//!
//! Every step runs at most once. The first failing step stops the sequence;
//! the messages of the steps that already succeeded are returned alongside
//! the error. Nothing is rolled back: a written unit file stays on disk.

use crate::command_args::{CommandArgs, SystemctlArgs, SystemctlVerb};
use crate::command_runner::CommandRunner;
use crate::error::{InstallError, InstallFailure, StepFailure};
use crate::process_guard::is_cancelled;
use crate::types::{InstallStep, ServiceConfig, UserActions};
use crate::unit_file;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Final line of a successful install log.
pub const INSTALL_COMPLETE: &str = "Installation complete";

/// What happened during one install run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Where the unit file was (or would have been) written.
    pub unit_path: PathBuf,
    /// Steps that finished successfully, in order.
    pub completed: Vec<InstallStep>,
    /// User-facing messages, in order.
    pub log: Vec<String>,
}

impl InstallOutcome {
    fn new(unit_path: PathBuf) -> Self {
        Self {
            unit_path,
            completed: Vec::new(),
            log: Vec::new(),
        }
    }

    /// The log as one block of text.
    pub fn text(&self) -> String {
        self.log.join("\n")
    }

    fn record(&mut self, step: InstallStep, output: &str, message: String) {
        if !output.is_empty() {
            self.log.push(output.to_string());
        }
        self.log.push(message);
        self.completed.push(step);
    }
}

/// Render `config` and perform the install sequence selected in `actions`,
/// invoking `systemctl` through `runner`.
pub fn install<R: CommandRunner>(
    config: &ServiceConfig,
    actions: &UserActions,
    runner: &mut R,
    systemctl: &str,
) -> Result<InstallOutcome, InstallFailure> {
    let path = config.unit_file_path();
    let mut outcome = InstallOutcome::new(path.clone());

    info!(
        "Installing {} (reload={}, enable={}, start={}, overwrite={})",
        path.display(),
        actions.reload_daemon,
        actions.enable_service,
        actions.start_service,
        actions.overwrite
    );

    let written = write_unit(config, &path, actions.overwrite);
    let absolute = match written {
        Ok(absolute) => absolute,
        Err(cause) => return Err(fail(outcome, InstallStep::WriteUnit, cause)),
    };
    outcome.record(
        InstallStep::WriteUnit,
        "",
        format!("Unit file created: {}", absolute.display()),
    );

    let name = config.service_name.as_str();
    let steps = [
        (
            actions.reload_daemon,
            InstallStep::ReloadDaemon,
            SystemctlArgs::daemon_reload(systemctl),
            "Systemd daemon reloaded".to_string(),
        ),
        (
            actions.enable_service,
            InstallStep::Enable,
            SystemctlArgs::for_service(systemctl, SystemctlVerb::Enable, name),
            format!("Service {} enabled", name),
        ),
        (
            actions.start_service,
            InstallStep::Start,
            SystemctlArgs::for_service(systemctl, SystemctlVerb::Start, name),
            format!("Service {} started", name),
        ),
    ];

    for (wanted, step, args, message) in steps {
        if !wanted {
            continue;
        }
        match run_step(runner, &args) {
            Ok(output) => outcome.record(step, &output, message),
            Err(cause) => return Err(fail(outcome, step, cause)),
        }
    }

    outcome.log.push(INSTALL_COMPLETE.to_string());
    info!("Installed {}", path.display());
    Ok(outcome)
}

fn fail(partial: InstallOutcome, step: InstallStep, cause: StepFailure) -> InstallFailure {
    error!("Install step '{}' failed: {}", step, cause);
    InstallFailure {
        partial,
        error: InstallError { step, cause },
    }
}

/// Write the rendered unit to `path`, returning its absolute form.
fn write_unit(config: &ServiceConfig, path: &Path, overwrite: bool) -> Result<PathBuf, StepFailure> {
    if is_cancelled() {
        return Err(StepFailure::Interrupted);
    }
    if !overwrite && path.exists() {
        return Err(StepFailure::AlreadyExists(path.to_path_buf()));
    }

    let contents = unit_file::render(config)?;
    std::fs::write(path, contents).map_err(|source| StepFailure::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// Run one systemctl invocation; a non-zero exit becomes a failure that
/// carries the captured output.
fn run_step<R: CommandRunner>(runner: &mut R, args: &SystemctlArgs) -> Result<String, StepFailure> {
    if is_cancelled() {
        return Err(StepFailure::Interrupted);
    }

    let result = runner.run_args(args)?;
    if result.success {
        Ok(result.output)
    } else {
        Err(StepFailure::Exited {
            program: args.display_command(),
            exit_code: result.exit_code,
            output: result.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_runner::{FakeRunner, RunError};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> ServiceConfig {
        ServiceConfig {
            service_name: "worker1".to_string(),
            working_directory: "/srv/app".to_string(),
            exec_start: "/srv/app/run.sh".to_string(),
            unit_dir: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_steps_succeed() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut runner = FakeRunner::new();

        let outcome = install(&config, &UserActions::default(), &mut runner, "systemctl").unwrap();

        assert_eq!(
            runner.calls,
            vec![
                "systemctl daemon-reload",
                "systemctl enable worker1",
                "systemctl start worker1"
            ]
        );
        assert_eq!(outcome.completed.len(), 4);
        assert_eq!(outcome.log.len(), 5);
        assert!(outcome.log[0].starts_with("Unit file created: "));
        assert_eq!(outcome.log[4], INSTALL_COMPLETE);
        assert!(dir.path().join("worker1.service").exists());
    }

    #[test]
    fn test_output_precedes_confirmation() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut runner = FakeRunner::new();
        runner
            .succeed("")
            .succeed("Created symlink /etc/systemd/system/multi-user.target.wants/worker1.service");

        let actions = UserActions {
            start_service: false,
            ..Default::default()
        };
        let outcome = install(&config, &actions, &mut runner, "systemctl").unwrap();

        assert_eq!(
            &outcome.log[1..],
            &[
                "Systemd daemon reloaded".to_string(),
                "Created symlink /etc/systemd/system/multi-user.target.wants/worker1.service"
                    .to_string(),
                "Service worker1 enabled".to_string(),
                INSTALL_COMPLETE.to_string(),
            ]
        );
    }

    #[test]
    fn test_existing_file_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(config.unit_file_path(), "original").unwrap();
        let mut runner = FakeRunner::new();

        let failure = install(&config, &UserActions::default(), &mut runner, "systemctl").unwrap_err();

        assert_eq!(failure.error.step, InstallStep::WriteUnit);
        assert!(matches!(failure.error.cause, StepFailure::AlreadyExists(_)));
        assert!(failure.partial.log.is_empty());
        assert!(runner.calls.is_empty());
        assert_eq!(
            std::fs::read_to_string(config.unit_file_path()).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_overwrite_replaces_file() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(config.unit_file_path(), "original").unwrap();
        let actions = UserActions {
            overwrite: true,
            reload_daemon: false,
            enable_service: false,
            start_service: false,
        };

        let outcome = install(&config, &actions, &mut FakeRunner::new(), "systemctl").unwrap();

        assert_eq!(outcome.completed, vec![InstallStep::WriteUnit]);
        let written = std::fs::read_to_string(config.unit_file_path()).unwrap();
        assert!(written.starts_with("[Unit]\nDescription=Worker1 Service"));
    }

    #[test]
    fn test_missing_systemctl_is_reported() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let mut runner = FakeRunner::new();
        runner.push(Err(RunError::NotFound("systemctl".to_string())));

        let failure = install(&config, &UserActions::default(), &mut runner, "systemctl").unwrap_err();

        assert_eq!(failure.error.step, InstallStep::ReloadDaemon);
        assert!(failure.to_string().contains("command systemctl not found"));
        assert_eq!(failure.partial.completed, vec![InstallStep::WriteUnit]);
    }
}
