//! Application state definitions
//!
//! Contains the state of the terminal shell: which screen is active, the
//! main menu cursor, the shared text input and the hosted wizard session.

use crate::installer::InstallOutcome;
use crate::types::ServiceAction;
use crate::wizard::WizardSession;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MenuAction {
    #[strum(serialize = "Start service")]
    Start,
    #[strum(serialize = "Stop service")]
    Stop,
    #[strum(serialize = "Restart service")]
    Restart,
    #[strum(serialize = "View service logs")]
    ViewLogs,
    #[strum(serialize = "Install service")]
    Install,
    #[strum(serialize = "Exit")]
    Exit,
}

impl MenuAction {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// The control verb behind Start/Stop/Restart.
    pub const fn service_action(self) -> Option<ServiceAction> {
        match self {
            Self::Start => Some(ServiceAction::Start),
            Self::Stop => Some(ServiceAction::Stop),
            Self::Restart => Some(ServiceAction::Restart),
            _ => None,
        }
    }

    /// Prompt for the service-name screen.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Start => "Enter the name of the service to start:",
            Self::Stop => "Enter the name of the service to stop:",
            Self::Restart => "Enter the name of the service to restart:",
            Self::ViewLogs => "Enter the name of the service to show logs for:",
            Self::Install | Self::Exit => "",
        }
    }
}

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    MainMenu,
    /// Asking for a service name before running the given menu action
    ServicePrompt(MenuAction),
    Wizard,
}

/// Single-line text input with a placeholder offered via Tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub placeholder: String,
}

impl TextInput {
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    /// Copy the placeholder into an empty input.
    pub fn complete(&mut self) {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            self.value = self.placeholder.clone();
        }
    }

    /// Clear the value and set a new placeholder.
    pub fn reset(&mut self, placeholder: impl Into<String>) {
        self.value.clear();
        self.placeholder = placeholder.into();
    }
}

/// How the terminal session ended; the caller acts on it after the
/// terminal has been restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// User left without doing anything
    Quit,
    /// A control command finished; message to print
    Message(String),
    /// Stream the logs of this service
    ViewLogs(String),
    /// Wizard reached Done
    Installed(InstallOutcome),
    /// Wizard was cancelled or overwrite was declined
    Aborted,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Main menu selection index
    pub menu_selection: usize,
    /// Input for the service prompt and the wizard's text states
    pub input: TextInput,
    /// Message shown under the service prompt
    pub prompt_error: Option<String>,
    /// Active wizard run
    pub wizard: Option<WizardSession>,
    /// Whether the key help block is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::MainMenu,
            menu_selection: 0,
            input: TextInput::default(),
            prompt_error: None,
            wizard: None,
            help_visible: false,
        }
    }
}

impl AppState {
    pub fn selected_menu_action(&self) -> MenuAction {
        MenuAction::all()
            .get(self.menu_selection)
            .copied()
            .unwrap_or(MenuAction::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order() {
        let all = MenuAction::all();
        assert_eq!(all.first(), Some(&MenuAction::Start));
        assert_eq!(all.last(), Some(&MenuAction::Exit));
        assert_eq!(all.len(), 6);
        assert_eq!(MenuAction::ViewLogs.to_string(), "View service logs");
    }

    #[test]
    fn test_text_input_completion() {
        let mut input = TextInput::with_placeholder("myservice");
        input.complete();
        assert_eq!(input.value, "myservice");

        input.pop();
        input.push('X');
        input.complete();
        assert_eq!(input.value, "myservicX");

        input.reset("");
        input.complete();
        assert!(input.value.is_empty());
    }

    #[test]
    fn test_selected_menu_action_out_of_range() {
        let state = AppState {
            menu_selection: 99,
            ..Default::default()
        };
        assert_eq!(state.selected_menu_action(), MenuAction::Exit);
    }
}
