//! Single-shot start / stop / restart.

use crate::command_args::{CommandArgs, SystemctlArgs};
use crate::command_runner::CommandRunner;
use crate::error::{Result, SdManagerError, StepFailure};
use crate::types::ServiceAction;
use crate::validation::validate_service_name;
use crate::wizard::SystemBackend;
use tracing::{info, warn};

/// Capability for the single-shot control commands.
pub trait ServiceControl {
    fn control(&mut self, action: ServiceAction, name: &str) -> Result<String>;
}

impl<R: CommandRunner> ServiceControl for SystemBackend<R> {
    fn control(&mut self, action: ServiceAction, name: &str) -> Result<String> {
        let systemctl = self.systemctl().to_string();
        run_service_action(self.runner_mut(), &systemctl, action, name)
    }
}

/// Run `systemctl <action> <name>` and return the confirmation message,
/// followed by the tool's output when it printed anything.
pub fn run_service_action<R: CommandRunner>(
    runner: &mut R,
    systemctl: &str,
    action: ServiceAction,
    name: &str,
) -> Result<String> {
    validate_service_name(name)?;

    let args = SystemctlArgs::for_service(systemctl, action.into(), name);
    info!("Service control: {}", args.display_command());

    let result = runner
        .run_args(&args)
        .map_err(|e| SdManagerError::command(StepFailure::from(e).to_string()))?;

    if !result.success {
        let failure = StepFailure::Exited {
            program: args.display_command(),
            exit_code: result.exit_code,
            output: result.output,
        };
        warn!("Service control failed: {}", failure);
        return Err(SdManagerError::command(failure.to_string()));
    }

    let mut message = format!("Service {} {}", name, action.past_tense());
    if !result.output.is_empty() {
        message.push('\n');
        message.push_str(&result.output);
    }
    Ok(message)
}
