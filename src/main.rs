//! sdmanager - Main entry point
//!
//! Interactive systemd service installer with headless control subcommands.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::{Write, stdout};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use sdmanager::app::{App, AppOutcome};
use sdmanager::cli::{Cli, Commands};
use sdmanager::command_args::JournalctlArgs;
use sdmanager::config::ManagerConfig;
use sdmanager::error::SdManagerError;
use sdmanager::validation::validate_service_name;
use sdmanager::{SystemBackend, SystemRunner, journal, process_guard, run_service_action, unit_file};

/// Initialize tracing.
///
/// Headless subcommands log to stderr. The terminal UI owns the screen, so
/// there logs go to `--log-file` or nowhere.
fn init_tracing(cli: &Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if cli.is_headless() => builder.with_writer(std::io::stderr).init(),
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    info!("sdmanager starting up");

    // Children are killed if we receive SIGINT/SIGTERM
    if let Err(e) = process_guard::init_signal_handlers() {
        warn!("Failed to initialize signal handlers: {}", e);
    }

    let config = ManagerConfig::resolve(cli.config.as_deref(), cli.overrides())?;
    debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Some(command @ (Commands::Start { .. } | Commands::Stop { .. } | Commands::Restart { .. })) => {
            if let Some((action, name)) = command.service_action() {
                let message = run_service_action(&mut SystemRunner, &config.systemctl, action, name)?;
                println!("{}", message);
            }
        }
        Some(Commands::Logs { name, lines }) => {
            print_logs(&config, name, lines.unwrap_or(config.log_lines))?;
        }
        Some(Commands::Render(args)) => {
            let service = args.to_service_config()?;
            print!("{}", unit_file::render(&service)?);
        }
        Some(Commands::Install) => run_tui(&config, true)?,
        None => run_tui(&config, false)?,
    }

    Ok(())
}

/// Stream the last `lines` journal messages of `name` to stdout.
fn print_logs(config: &ManagerConfig, name: &str, lines: u32) -> Result<()> {
    validate_service_name(name)?;
    let args = JournalctlArgs {
        program: config.journalctl.clone(),
        unit: name.to_string(),
        lines,
    };
    let mut out = stdout().lock();
    let count = journal::stream_messages(&args, &mut out)?;
    out.flush()?;
    debug!("Printed {} log messages", count);
    Ok(())
}

/// Run the terminal UI, then act on how it ended.
fn run_tui(config: &ManagerConfig, wizard_only: bool) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| SdManagerError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        SdManagerError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| SdManagerError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| {
            let backend = SystemBackend::new(SystemRunner, config.systemctl.clone());
            let mut app = App::new(
                backend,
                &config.default_service_name,
                config.unit_dir.clone(),
            );
            if wizard_only {
                app.start_wizard();
            }
            app.run(&mut terminal)
        });

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    match result? {
        AppOutcome::Quit => info!("Exited from the main menu"),
        AppOutcome::Message(message) => println!("{}", message),
        AppOutcome::ViewLogs(name) => print_logs(config, &name, config.log_lines)?,
        AppOutcome::Installed(outcome) => println!("{}", outcome.text()),
        AppOutcome::Aborted => {
            error!("Wizard aborted by user");
            eprintln!("Installation aborted by user");
            std::process::exit(1);
        }
    }
    Ok(())
}
