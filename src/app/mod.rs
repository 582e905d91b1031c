//! Application module
//!
//! Contains the terminal shell: main menu, service-name prompt and the host
//! for the install wizard, plus the event loop that drives them.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, TextInput, etc.)
//! - Main module - App struct, key mapping and event loop

mod state;

pub use state::{AppMode, AppOutcome, AppState, MenuAction, TextInput};

use crate::error::Result;
use crate::process_guard::{ProcessGuard, is_cancelled};
use crate::service_control::ServiceControl;
use crate::ui;
use crate::validation::validate_service_name;
use crate::wizard::{WizardBackend, WizardEvent, WizardSession, WizardState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lines moved by PageUp/PageDown in the preview.
pub const PAGE_LINES: usize = 10;

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Translate a key press into a wizard event for `state`.
///
/// Text editing keys are applied to `input` directly and produce no event.
pub fn wizard_event_for_key(
    state: WizardState,
    key: KeyEvent,
    input: &mut TextInput,
) -> Option<WizardEvent> {
    if key.code == KeyCode::Esc || is_ctrl(&key, 'c') {
        return Some(WizardEvent::Cancel);
    }

    match state {
        WizardState::OptionsSelect => match key.code {
            KeyCode::Enter => Some(WizardEvent::Confirm(String::new())),
            KeyCode::Char(' ') => Some(WizardEvent::ToggleOption),
            KeyCode::Up | KeyCode::Char('k') => Some(WizardEvent::OptionUp),
            KeyCode::Down | KeyCode::Char('j') => Some(WizardEvent::OptionDown),
            _ => None,
        },
        WizardState::PreviewUnit => match key.code {
            KeyCode::Enter => Some(WizardEvent::Confirm(String::new())),
            KeyCode::Up | KeyCode::Char('k') => Some(WizardEvent::ScrollUp(1)),
            KeyCode::Down | KeyCode::Char('j') => Some(WizardEvent::ScrollDown(1)),
            KeyCode::PageUp => Some(WizardEvent::ScrollUp(PAGE_LINES)),
            KeyCode::PageDown => Some(WizardEvent::ScrollDown(PAGE_LINES)),
            _ => None,
        },
        state if state.takes_text() => match key.code {
            KeyCode::Enter => Some(WizardEvent::Confirm(input.value.clone())),
            KeyCode::Tab => {
                input.complete();
                None
            }
            KeyCode::Backspace => {
                input.pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(c);
                None
            }
            _ => None,
        },
        _ => None,
    }
}

/// Main application struct
pub struct App<B: WizardBackend + ServiceControl> {
    state: AppState,
    backend: B,
    default_service_name: String,
    unit_dir: PathBuf,
    /// Terminates any tracked child if the shell is left on an error path
    _process_guard: ProcessGuard,
}

impl<B: WizardBackend + ServiceControl> App<B> {
    /// Create a new application instance showing the main menu
    pub fn new(backend: B, default_service_name: &str, unit_dir: impl Into<PathBuf>) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::default(),
            backend,
            default_service_name: default_service_name.to_string(),
            unit_dir: unit_dir.into(),
            _process_guard: ProcessGuard::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Enter the wizard with a session built from process defaults
    pub fn start_wizard(&mut self) {
        let session = WizardSession::new(&self.default_service_name, self.unit_dir.clone());
        self.start_wizard_with(session);
    }

    /// Enter the wizard with a prepared session
    pub fn start_wizard_with(&mut self, session: WizardSession) {
        info!("Starting install wizard");
        self.state.input.reset(session.placeholder());
        self.state.wizard = Some(session);
        self.state.mode = AppMode::Wizard;
    }

    /// Toggle key help visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main application loop
    pub fn run<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> Result<AppOutcome> {
        info!("Starting main application loop");

        loop {
            if is_cancelled() {
                warn!("Cancellation requested, leaving the terminal UI");
                return Ok(match self.state.mode {
                    AppMode::Wizard => AppOutcome::Aborted,
                    _ => AppOutcome::Quit,
                });
            }

            terminal.draw(|f| ui::render(f, &self.state))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Some(outcome) = self.handle_key_event(key_event) {
                        info!("Leaving the terminal UI: {:?}", outcome);
                        return Ok(outcome);
                    }
                }
            }
        }
    }

    /// Handle keyboard input events. Returns the outcome once the session
    /// should end.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<AppOutcome> {
        if is_ctrl(&key_event, 'h') {
            self.toggle_help();
            return None;
        }

        match self.state.mode {
            AppMode::MainMenu => self.handle_menu_key(key_event),
            AppMode::ServicePrompt(action) => self.handle_prompt_key(action, key_event),
            AppMode::Wizard => self.handle_wizard_key(key_event),
        }
    }

    fn handle_menu_key(&mut self, key_event: KeyEvent) -> Option<AppOutcome> {
        let count = MenuAction::all().len();

        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.menu_selection = (self.state.menu_selection + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.menu_selection = (self.state.menu_selection + 1) % count;
            }
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppOutcome::Quit),
            KeyCode::Char('c') if is_ctrl(&key_event, 'c') => return Some(AppOutcome::Quit),
            KeyCode::Enter => {
                let action = self.state.selected_menu_action();
                debug!("Main menu selection: {}", action);
                match action {
                    MenuAction::Exit => return Some(AppOutcome::Quit),
                    MenuAction::Install => self.start_wizard(),
                    _ => {
                        self.state.input.reset(self.default_service_name.clone());
                        self.state.prompt_error = None;
                        self.state.mode = AppMode::ServicePrompt(action);
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn handle_prompt_key(&mut self, action: MenuAction, key_event: KeyEvent) -> Option<AppOutcome> {
        if key_event.code == KeyCode::Esc || is_ctrl(&key_event, 'c') {
            return Some(AppOutcome::Quit);
        }

        match key_event.code {
            KeyCode::Enter => {
                if self.state.prompt_error.take().is_some() {
                    return None;
                }

                let name = self.state.input.value.clone();
                if let Err(e) = validate_service_name(&name) {
                    self.state.prompt_error = Some(e.to_string());
                    return None;
                }

                if action == MenuAction::ViewLogs {
                    return Some(AppOutcome::ViewLogs(name));
                }

                let service_action = action.service_action()?;
                match self.backend.control(service_action, &name) {
                    Ok(message) => return Some(AppOutcome::Message(message)),
                    Err(e) => self.state.prompt_error = Some(e.to_string()),
                }
            }
            KeyCode::Tab => self.state.input.complete(),
            KeyCode::Backspace => self.state.input.pop(),
            KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input.push(c)
            }
            _ => {}
        }
        None
    }

    fn handle_wizard_key(&mut self, key_event: KeyEvent) -> Option<AppOutcome> {
        let session = self.state.wizard.take()?;
        let before = session.state();

        let Some(event) = wizard_event_for_key(before, key_event, &mut self.state.input) else {
            self.state.wizard = Some(session);
            return None;
        };

        let session = session.handle(event, &mut self.backend);

        if session.is_aborted() {
            return Some(AppOutcome::Aborted);
        }
        if let Some(outcome) = session.outcome() {
            return Some(AppOutcome::Installed(outcome.clone()));
        }

        if session.state() != before {
            self.state.input.reset(session.placeholder());
        }
        self.state.wizard = Some(session);
        None
    }
}
