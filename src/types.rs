//! Core data model for a service definition and the install choices made
//! about it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};

/// Standard location for system unit files.
pub const DEFAULT_UNIT_DIR: &str = "/etc/systemd/system";

/// File extension appended to the service name to form the unit file name.
pub const UNIT_EXTENSION: &str = "service";

/// Fallback used when no default service name is supplied.
pub const FALLBACK_SERVICE_NAME: &str = "myservice";

/// The service descriptor under construction.
///
/// Created with defaults at wizard start, filled in field by field, and only
/// read once it reaches the renderer or the installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    /// Run-as user; empty means the unit has no `User=` line.
    pub user_name: String,
    pub working_directory: String,
    pub exec_start: String,
    pub standard_output: String,
    pub standard_error: String,
    pub syslog_identifier: String,
    /// Soft memory limit in MB, 0 = unset.
    pub memory_high: u64,
    /// Hard memory limit in MB, 0 = unset.
    pub memory_max: u64,
    /// Directory the unit file is written into.
    pub unit_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: FALLBACK_SERVICE_NAME.to_string(),
            user_name: String::new(),
            working_directory: String::new(),
            exec_start: String::new(),
            standard_output: String::new(),
            standard_error: String::new(),
            syslog_identifier: String::new(),
            memory_high: 0,
            memory_max: 0,
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
        }
    }
}

impl ServiceConfig {
    /// Build the initial config for a wizard run: the current directory as
    /// working directory and this executable as the start command.
    pub fn with_process_defaults(service_name: &str, unit_dir: impl Into<PathBuf>) -> Self {
        let working_directory = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let exec_start = std::env::current_exe()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let service_name = if service_name.is_empty() {
            FALLBACK_SERVICE_NAME
        } else {
            service_name
        };

        Self {
            service_name: service_name.to_string(),
            working_directory,
            exec_start,
            unit_dir: unit_dir.into(),
            ..Default::default()
        }
    }

    /// `<unit_dir>/<service_name>.service`
    pub fn unit_file_path(&self) -> PathBuf {
        unit_file_path(&self.unit_dir, &self.service_name)
    }
}

/// Join a unit directory and a service name into the unit file path.
pub fn unit_file_path(dir: &Path, service_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", service_name, UNIT_EXTENSION))
}

/// What to do once the unit file has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActions {
    pub overwrite: bool,
    pub reload_daemon: bool,
    pub enable_service: bool,
    pub start_service: bool,
}

impl Default for UserActions {
    fn default() -> Self {
        Self {
            overwrite: false,
            reload_daemon: true,
            enable_service: true,
            start_service: true,
        }
    }
}

/// A togglable entry in the options list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Number of entries in the options list.
pub const OPTION_COUNT: usize = 3;

/// The options list in display order: reload, enable, start. All start selected.
pub fn default_action_options() -> [ActionOption; OPTION_COUNT] {
    [
        ActionOption {
            label: "Reload systemd daemon",
            selected: true,
        },
        ActionOption {
            label: "Enable service on boot",
            selected: true,
        },
        ActionOption {
            label: "Start service now",
            selected: true,
        },
    ]
}

/// One step of the install sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter)]
pub enum InstallStep {
    #[strum(serialize = "write unit file")]
    WriteUnit,
    #[strum(serialize = "reload systemd daemon")]
    ReloadDaemon,
    #[strum(serialize = "enable service")]
    Enable,
    #[strum(serialize = "start service")]
    Start,
}

/// Single-shot control verbs offered outside the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceAction {
    Start,
    Stop,
    Restart,
}

impl ServiceAction {
    /// Past tense used in the confirmation message.
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Restart => "restarted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_user_actions_default() {
        let actions = UserActions::default();
        assert!(!actions.overwrite);
        assert!(actions.reload_daemon);
        assert!(actions.enable_service);
        assert!(actions.start_service);
    }

    #[test]
    fn test_unit_file_path_appends_extension() {
        let config = ServiceConfig {
            service_name: "worker1".to_string(),
            unit_dir: PathBuf::from("/tmp/units"),
            ..Default::default()
        };
        assert_eq!(
            config.unit_file_path(),
            PathBuf::from("/tmp/units/worker1.service")
        );
    }

    #[test]
    fn test_process_defaults_fall_back_to_myservice() {
        let config = ServiceConfig::with_process_defaults("", DEFAULT_UNIT_DIR);
        assert_eq!(config.service_name, "myservice");
        assert!(!config.exec_start.is_empty());
        assert_eq!(config.memory_high, 0);
        assert_eq!(config.memory_max, 0);
    }

    #[test]
    fn test_install_steps_in_order() {
        let steps: Vec<_> = InstallStep::iter().collect();
        assert_eq!(
            steps,
            vec![
                InstallStep::WriteUnit,
                InstallStep::ReloadDaemon,
                InstallStep::Enable,
                InstallStep::Start
            ]
        );
    }

    #[test]
    fn test_service_action_parse() {
        assert_eq!("restart".parse::<ServiceAction>().ok(), Some(ServiceAction::Restart));
        assert_eq!(ServiceAction::Stop.to_string(), "stop");
        assert_eq!(ServiceAction::Stop.past_tense(), "stopped");
    }

    #[test]
    fn test_default_options_all_selected() {
        let options = default_action_options();
        assert_eq!(options.len(), OPTION_COUNT);
        assert!(options.iter().all(|o| o.selected));
    }
}
