//! External command execution.
//!
//! [`CommandRunner`] is the seam between sdmanager and the operating system:
//! the installer and the control commands only ever see this trait, so they
//! can be driven by a scripted fake in tests. [`SystemRunner`] is the real
//! implementation.
//!
//! # Invariants
//!
//! - One invocation at a time; `run` blocks until the child has exited.
//! - stdout and stderr share a single pipe, so the captured output keeps the
//!   interleaving the user would see in a terminal.
//! - Children run in their own process group and are registered with the
//!   global [`ChildRegistry`] for the duration of the call.

use crate::command_args::CommandArgs;
use crate::process_guard::{ChildRegistry, CommandProcessGroup, is_cancelled};
use std::io::Read;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Result of one finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Combined stdout + stderr, trimmed.
    pub output: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the command exited with status 0.
    pub success: bool,
}

impl CommandOutput {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: Some(0),
            success: true,
        }
    }

    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            exit_code: Some(code),
            success: false,
        }
    }
}

/// Reasons an invocation could not produce a [`CommandOutput`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("command {0} not found")]
    NotFound(String),

    #[error("could not run {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("{0} was interrupted")]
    Interrupted(String),
}

/// Capability for running an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args` and wait for it.
    ///
    /// A non-zero exit is reported as `Ok` with `success == false`; `Err` is
    /// reserved for invocations that never ran or were cancelled.
    fn run(&mut self, program: &str, args: &[String]) -> Result<CommandOutput, RunError>;

    /// Run a typed invocation.
    fn run_args<A: CommandArgs>(&mut self, args: &A) -> Result<CommandOutput, RunError>
    where
        Self: Sized,
    {
        self.run(args.program(), &args.to_cli_args())
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, program: &str, args: &[String]) -> Result<CommandOutput, RunError> {
        (**self).run(program, args)
    }
}

/// Runs commands on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<CommandOutput, RunError> {
        info!("run: {} args={:?}", program, args);

        let (mut reader, writer) = std::io::pipe().map_err(|e| RunError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

        let spawned = {
            let stderr_writer = writer.try_clone().map_err(|e| RunError::Spawn {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr_writer)
                .in_new_process_group();
            // Dropping `cmd` at the end of this block closes our copies of
            // the write end, so the read below sees EOF when the child exits.
            cmd.spawn()
        };

        let mut child = spawned.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RunError::NotFound(program.to_string())
            } else {
                RunError::Spawn {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;
        let pid = child.id();

        let cancelled = ChildRegistry::global()
            .lock()
            .map(|mut registry| !registry.register_or_terminate(pid))
            .unwrap_or(false);
        if cancelled {
            let _ = child.wait();
            warn!("{} interrupted by cancellation", program);
            return Err(RunError::Interrupted(program.to_string()));
        }

        let mut raw = Vec::new();
        if let Err(e) = reader.read_to_end(&mut raw) {
            warn!("Failed reading output of {}: {}", program, e);
        }
        let status = child.wait();

        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.unregister(pid);
        }

        let status = status.map_err(|e| RunError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

        if status.code().is_none() && is_cancelled() {
            warn!("{} interrupted by cancellation", program);
            return Err(RunError::Interrupted(program.to_string()));
        }

        let output = String::from_utf8_lossy(&raw).trim().to_string();
        debug!("{} exited with {:?}", program, status.code());

        Ok(CommandOutput {
            output,
            exit_code: status.code(),
            success: status.success(),
        })
    }
}

/// Scripted runner for tests: records every call and answers from a queue.
#[derive(Debug, Default)]
pub struct FakeRunner {
    /// Every invocation as `program arg1 arg2 ...`.
    pub calls: Vec<String>,
    responses: std::collections::VecDeque<Result<CommandOutput, RunError>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next call. Unqueued calls succeed silently.
    pub fn push(&mut self, response: Result<CommandOutput, RunError>) -> &mut Self {
        self.responses.push_back(response);
        self
    }

    pub fn succeed(&mut self, output: &str) -> &mut Self {
        self.push(Ok(CommandOutput::ok(output)))
    }

    pub fn fail(&mut self, code: i32, output: &str) -> &mut Self {
        self.push(Ok(CommandOutput::failed(code, output)))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, program: &str, args: &[String]) -> Result<CommandOutput, RunError> {
        let mut call = program.to_string();
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        self.calls.push(call);
        self.responses
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::ok("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_args::SystemctlArgs;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_system_runner_captures_combined_output() {
        let mut runner = SystemRunner::new();
        let out = runner
            .run("sh", &strings(&["-c", "echo out; echo err 1>&2"]))
            .expect("sh should run");
        assert!(out.success);
        assert_eq!(out.exit_code, Some(0));
        assert!(out.output.contains("out"));
        assert!(out.output.contains("err"));
    }

    #[test]
    fn test_system_runner_reports_non_zero_exit() {
        let mut runner = SystemRunner::new();
        let out = runner
            .run("sh", &strings(&["-c", "echo denied 1>&2; exit 3"]))
            .expect("sh should run");
        assert!(!out.success);
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.output, "denied");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let mut runner = SystemRunner::new();
        let err = runner
            .run("sdmanager-definitely-missing-binary", &[])
            .unwrap_err();
        assert_eq!(
            err,
            RunError::NotFound("sdmanager-definitely-missing-binary".to_string())
        );
    }

    #[test]
    fn test_fake_runner_records_and_replays() {
        let mut runner = FakeRunner::new();
        runner.fail(1, "boom");

        let first = runner
            .run_args(&SystemctlArgs::daemon_reload("systemctl"))
            .unwrap();
        assert!(!first.success);
        assert_eq!(first.output, "boom");

        let second = runner.run("systemctl", &strings(&["start", "x"])).unwrap();
        assert!(second.success);

        assert_eq!(
            runner.calls,
            vec!["systemctl daemon-reload", "systemctl start x"]
        );
    }
}
