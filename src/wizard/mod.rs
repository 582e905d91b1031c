//! Install wizard session
//!
//! A [`WizardSession`] is a value: every user event consumes it and returns
//! the next one. Filesystem checks, rendering and installation reach the
//! session through a [`WizardBackend`] so the whole flow can be driven
//! without a terminal or a real systemd.

pub mod state;

pub use state::WizardState;

use crate::command_runner::CommandRunner;
use crate::error::{InstallFailure, RenderError};
use crate::installer::{self, InstallOutcome};
use crate::types::{ActionOption, OPTION_COUNT, ServiceConfig, UserActions, default_action_options};
use crate::unit_file;
use crate::validation;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A single user action fed to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Enter, with the current contents of the text input
    Confirm(String),
    /// Esc / Ctrl+C
    Cancel,
    ToggleOption,
    OptionUp,
    OptionDown,
    ScrollUp(usize),
    ScrollDown(usize),
}

/// Side-effecting capabilities the wizard depends on.
pub trait WizardBackend {
    fn unit_exists(&self, path: &Path) -> bool;

    fn render(&self, config: &ServiceConfig) -> Result<String, RenderError>;

    fn install(
        &mut self,
        config: &ServiceConfig,
        actions: &UserActions,
    ) -> Result<InstallOutcome, InstallFailure>;
}

/// Backend that touches the real filesystem and runs systemctl.
pub struct SystemBackend<R: CommandRunner> {
    runner: R,
    systemctl: String,
}

impl<R: CommandRunner> SystemBackend<R> {
    pub fn new(runner: R, systemctl: impl Into<String>) -> Self {
        Self {
            runner,
            systemctl: systemctl.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut R {
        &mut self.runner
    }

    pub fn systemctl(&self) -> &str {
        &self.systemctl
    }
}

impl<R: CommandRunner> WizardBackend for SystemBackend<R> {
    fn unit_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn render(&self, config: &ServiceConfig) -> Result<String, RenderError> {
        unit_file::render(config)
    }

    fn install(
        &mut self,
        config: &ServiceConfig,
        actions: &UserActions,
    ) -> Result<InstallOutcome, InstallFailure> {
        installer::install(config, actions, &mut self.runner, &self.systemctl)
    }
}

/// Result of applying one confirmed input.
enum Step {
    /// Input rejected; stay and show the message
    Reject(String),
    /// Move to the given state
    Advance(WizardState),
    /// User declined to continue
    Abort,
}

/// One run of the install wizard.
#[derive(Debug, Clone)]
pub struct WizardSession {
    state: WizardState,
    config: ServiceConfig,
    actions: UserActions,
    options: [ActionOption; OPTION_COUNT],
    highlighted: usize,
    error: Option<String>,
    preview: String,
    scroll: usize,
    outcome: Option<InstallOutcome>,
    aborted: bool,
}

impl WizardSession {
    /// Start a session from process defaults: current directory, this
    /// executable, and the given default service name and unit directory.
    pub fn new(default_service_name: &str, unit_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(ServiceConfig::with_process_defaults(
            default_service_name,
            unit_dir,
        ))
    }

    /// Start a session from an explicit initial config.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            state: WizardState::ServiceName,
            config,
            actions: UserActions::default(),
            options: default_action_options(),
            highlighted: 0,
            error: None,
            preview: String::new(),
            scroll: 0,
            outcome: None,
            aborted: false,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn actions(&self) -> &UserActions {
        &self.actions
    }

    pub fn options(&self) -> &[ActionOption] {
        &self.options
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Message currently shown in the active state, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rendered unit, available from PreviewUnit on.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Install result once the session reached Done.
    pub fn outcome(&self) -> Option<&InstallOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// True once no further event will be accepted.
    pub fn is_finished(&self) -> bool {
        self.aborted || self.state.is_terminal()
    }

    /// Prompt for the active state.
    pub fn prompt(&self) -> String {
        match self.state {
            WizardState::Overwrite => format!(
                "File {} already exists. Overwrite? (y/n):",
                self.config.unit_file_path().display()
            ),
            state => state.prompt().to_string(),
        }
    }

    /// Default offered for the active text state; a blank confirm uses it.
    pub fn placeholder(&self) -> String {
        match self.state {
            WizardState::ServiceName => self.config.service_name.clone(),
            WizardState::UserName => self.config.user_name.clone(),
            WizardState::WorkingDirectory => self.config.working_directory.clone(),
            WizardState::ExecStart => self.config.exec_start.clone(),
            WizardState::MemoryHigh | WizardState::MemoryMax => "0".to_string(),
            WizardState::UnitLocation => self.config.unit_dir.display().to_string(),
            _ => String::new(),
        }
    }

    /// Labels of the options that are currently selected.
    pub fn selected_labels(&self) -> Vec<&'static str> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label)
            .collect()
    }

    /// Apply one event and return the resulting session.
    pub fn handle<B: WizardBackend>(mut self, event: WizardEvent, backend: &mut B) -> Self {
        if self.is_finished() {
            return self;
        }

        match event {
            WizardEvent::Cancel => {
                info!("Wizard cancelled in state {}", self.state);
                self.aborted = true;
            }
            WizardEvent::Confirm(_) if self.error.is_some() => {
                // A pending message is acknowledged without attempting the transition.
                self.error = None;
            }
            WizardEvent::Confirm(input) => {
                let step = self.confirm(input, backend);
                self.apply(step);
            }
            WizardEvent::ToggleOption if self.state == WizardState::OptionsSelect => {
                let option = &mut self.options[self.highlighted];
                option.selected = !option.selected;
            }
            WizardEvent::OptionUp if self.state == WizardState::OptionsSelect => {
                self.highlighted = (self.highlighted + OPTION_COUNT - 1) % OPTION_COUNT;
            }
            WizardEvent::OptionDown if self.state == WizardState::OptionsSelect => {
                self.highlighted = (self.highlighted + 1) % OPTION_COUNT;
            }
            WizardEvent::ScrollUp(lines) if self.state == WizardState::PreviewUnit => {
                self.scroll = self.scroll.saturating_sub(lines);
            }
            WizardEvent::ScrollDown(lines) if self.state == WizardState::PreviewUnit => {
                let max = self.preview.lines().count().saturating_sub(1);
                self.scroll = (self.scroll + lines).min(max);
            }
            _ => {}
        }

        self
    }

    fn apply(&mut self, step: Step) {
        match step {
            Step::Reject(message) => {
                debug!("Wizard input rejected in {}: {}", self.state, message);
                self.error = Some(message);
            }
            Step::Advance(to) => {
                debug!("Wizard transition: {} -> {}", self.state, to);
                self.state = to;
            }
            Step::Abort => {
                info!("Wizard aborted by user in state {}", self.state);
                self.aborted = true;
            }
        }
    }

    fn advance(&self) -> Step {
        match self.state.next() {
            Some(next) => Step::Advance(next),
            None => Step::Reject(format!("no state follows {}", self.state)),
        }
    }

    fn confirm<B: WizardBackend>(&mut self, input: String, backend: &mut B) -> Step {
        match self.state {
            WizardState::ServiceName => {
                let name = if input.is_empty() {
                    self.config.service_name.clone()
                } else {
                    input
                };
                if let Err(e) = validation::validate_service_name(&name) {
                    return Step::Reject(e.to_string());
                }
                self.config.service_name = name;
                self.advance()
            }
            WizardState::UserName => {
                if let Err(e) = validation::validate_user_name(&input) {
                    return Step::Reject(e.to_string());
                }
                self.config.user_name = input;
                self.advance()
            }
            WizardState::WorkingDirectory => {
                if !input.is_empty() {
                    if let Err(e) = validation::validate_path(&input) {
                        return Step::Reject(e.to_string());
                    }
                    self.config.working_directory = input;
                }
                self.advance()
            }
            WizardState::ExecStart => {
                let command = if input.is_empty() {
                    self.config.exec_start.clone()
                } else {
                    input.trim().to_string()
                };
                if let Err(e) = validation::validate_exec_start(&command) {
                    return Step::Reject(e.to_string());
                }
                self.config.exec_start = command;
                self.advance()
            }
            WizardState::StandardOutput => {
                self.config.standard_output = input;
                self.advance()
            }
            WizardState::StandardError => {
                self.config.standard_error = input;
                self.advance()
            }
            WizardState::SyslogIdentifier => {
                self.config.syslog_identifier = input;
                self.advance()
            }
            WizardState::MemoryHigh => match validation::parse_non_negative(&input, 0) {
                Ok(value) => {
                    self.config.memory_high = value;
                    self.advance()
                }
                Err(e) => Step::Reject(e.to_string()),
            },
            WizardState::MemoryMax => {
                let value = match validation::parse_non_negative(&input, 0) {
                    Ok(value) => value,
                    Err(e) => return Step::Reject(e.to_string()),
                };
                if let Err(e) = validation::validate_memory_limits(self.config.memory_high, value) {
                    return Step::Reject(e.to_string());
                }
                self.config.memory_max = value;
                self.advance()
            }
            WizardState::UnitLocation => {
                if !input.is_empty() {
                    if let Err(e) = validation::validate_path(&input) {
                        return Step::Reject(e.to_string());
                    }
                    self.config.unit_dir = PathBuf::from(input);
                }
                let target = self.config.unit_file_path();
                if backend.unit_exists(&target) {
                    info!("Unit file {} already exists", target.display());
                    Step::Advance(WizardState::Overwrite)
                } else {
                    Step::Advance(WizardState::OptionsSelect)
                }
            }
            WizardState::Overwrite => {
                if input.starts_with(['y', 'Y']) {
                    self.actions.overwrite = true;
                    self.advance()
                } else {
                    Step::Abort
                }
            }
            WizardState::OptionsSelect => {
                self.actions.reload_daemon = self.options[0].selected;
                self.actions.enable_service = self.options[1].selected;
                self.actions.start_service = self.options[2].selected;

                match backend.render(&self.config) {
                    Ok(preview) => {
                        self.preview = preview;
                        self.scroll = 0;
                        self.advance()
                    }
                    Err(e) => Step::Reject(format!("could not render the unit preview: {}", e)),
                }
            }
            WizardState::PreviewUnit => match backend.install(&self.config, &self.actions) {
                Ok(outcome) => {
                    self.outcome = Some(outcome);
                    self.advance()
                }
                Err(failure) => Step::Reject(failure.to_string()),
            },
            WizardState::Done | WizardState::Error => Step::Advance(self.state),
        }
    }
}
