use crate::config::ConfigOverrides;
use crate::error::{Result, SdManagerError};
use crate::types::{DEFAULT_UNIT_DIR, ServiceAction, ServiceConfig};
use crate::validation;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// sdmanager - create, install and control systemd services
#[derive(Parser, Debug)]
#[command(name = "sdmanager")]
#[command(about = "Interactive systemd service installer and controller")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file with manager defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory unit files are written to
    #[arg(long, global = true)]
    pub unit_dir: Option<PathBuf>,

    /// Service name pre-filled in the wizard
    #[arg(long, global = true)]
    pub service_name: Option<String>,

    /// systemctl executable to use
    #[arg(long, global = true)]
    pub systemctl: Option<String>,

    /// journalctl executable to use
    #[arg(long, global = true)]
    pub journalctl: Option<String>,

    /// Write logs to this file (interactive mode logs nowhere otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that override values from the configuration file.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            default_service_name: self.service_name.clone(),
            unit_dir: self.unit_dir.clone(),
            systemctl: self.systemctl.clone(),
            journalctl: self.journalctl.clone(),
        }
    }

    /// True for subcommands that run without the terminal UI.
    pub fn is_headless(&self) -> bool {
        !matches!(self.command, None | Some(Commands::Install))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the install wizard directly, skipping the main menu
    Install,
    /// Start a service
    Start {
        /// Service name
        name: String,
    },
    /// Stop a service
    Stop {
        /// Service name
        name: String,
    },
    /// Restart a service
    Restart {
        /// Service name
        name: String,
    },
    /// Print the latest journal messages of a service
    Logs {
        /// Service name
        name: String,
        /// Number of records to show
        #[arg(short = 'n', long)]
        lines: Option<u32>,
    },
    /// Print the unit file for the given values without installing it
    Render(RenderArgs),
}

impl Commands {
    /// The control verb and service name for start/stop/restart.
    pub fn service_action(&self) -> Option<(ServiceAction, &str)> {
        match self {
            Self::Start { name } => Some((ServiceAction::Start, name)),
            Self::Stop { name } => Some((ServiceAction::Stop, name)),
            Self::Restart { name } => Some((ServiceAction::Restart, name)),
            _ => None,
        }
    }
}

/// Unit values for non-interactive rendering.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Service name
    #[arg(long)]
    pub name: String,

    /// Run-as user
    #[arg(long, default_value = "")]
    pub user: String,

    /// Working directory (defaults to the current directory)
    #[arg(long)]
    pub working_directory: Option<String>,

    /// Start command
    #[arg(long)]
    pub exec_start: String,

    #[arg(long, default_value = "")]
    pub standard_output: String,

    #[arg(long, default_value = "")]
    pub standard_error: String,

    #[arg(long, default_value = "")]
    pub syslog_identifier: String,

    /// Soft memory limit in MB (0 = unset)
    #[arg(long, default_value_t = 0)]
    pub memory_high: u64,

    /// Hard memory limit in MB (0 = unset)
    #[arg(long, default_value_t = 0)]
    pub memory_max: u64,
}

impl RenderArgs {
    /// Validate the values the same way the wizard does and build the config.
    pub fn to_service_config(&self) -> Result<ServiceConfig> {
        validation::validate_service_name(&self.name)?;
        validation::validate_user_name(&self.user)?;
        validation::validate_memory_limits(self.memory_high, self.memory_max)?;

        let working_directory = match &self.working_directory {
            Some(dir) => {
                validation::validate_path(dir)?;
                dir.clone()
            }
            None => std::env::current_dir()
                .map_err(|e| SdManagerError::config(format!("no current directory: {}", e)))?
                .display()
                .to_string(),
        };

        Ok(ServiceConfig {
            service_name: self.name.clone(),
            user_name: self.user.clone(),
            working_directory,
            exec_start: self.exec_start.clone(),
            standard_output: self.standard_output.clone(),
            standard_error: self.standard_error.clone(),
            syslog_identifier: self.syslog_identifier.clone(),
            memory_high: self.memory_high,
            memory_max: self.memory_max,
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["sdmanager"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_headless());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sdmanager",
            "install",
            "--unit-dir",
            "/tmp/units",
            "--service-name",
            "worker1",
            "-vv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Install)));
        assert_eq!(cli.verbose, 2);
        let overrides = cli.overrides();
        assert_eq!(overrides.unit_dir, Some(PathBuf::from("/tmp/units")));
        assert_eq!(overrides.default_service_name.as_deref(), Some("worker1"));
    }

    #[test]
    fn test_service_action_commands() {
        let cli = Cli::try_parse_from(["sdmanager", "restart", "api"]).unwrap();
        assert!(cli.is_headless());
        let command = cli.command.unwrap();
        assert_eq!(command.service_action(), Some((ServiceAction::Restart, "api")));
    }

    #[test]
    fn test_logs_line_count() {
        let cli = Cli::try_parse_from(["sdmanager", "logs", "api", "-n", "10"]).unwrap();
        match cli.command {
            Some(Commands::Logs { name, lines }) => {
                assert_eq!(name, "api");
                assert_eq!(lines, Some(10));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_args_validate() {
        let cli = Cli::try_parse_from([
            "sdmanager",
            "render",
            "--name",
            "worker1",
            "--exec-start",
            "/srv/app/run.sh",
            "--working-directory",
            "/tmp/app",
            "--memory-high",
            "512",
            "--memory-max",
            "256",
        ])
        .unwrap();
        let Some(Commands::Render(args)) = cli.command else {
            panic!("expected render");
        };
        assert!(args.to_service_config().is_err());

        let args = RenderArgs {
            memory_high: 0,
            ..args
        };
        let config = args.to_service_config().unwrap();
        assert_eq!(config.memory_max, 256);
        assert_eq!(config.working_directory, "/tmp/app");
    }
}
