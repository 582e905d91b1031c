//! User interface rendering module
//!
//! - `header` - Title bar
//! - `menus` - Main menu and service-name prompt
//! - `wizard` - Install wizard screens
//! - `help` - Key hints and the Ctrl+H help block

mod header;
pub mod help;
mod menus;
pub mod wizard;

use crate::app::{AppMode, AppState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Paragraph,
};

/// Render the whole screen for `state`
pub fn render(f: &mut Frame, state: &AppState) {
    let wizard_state = state.wizard.as_ref().map(|w| w.state());
    let sections = help::help_sections(state.mode, wizard_state);
    let footer_height = if state.help_visible {
        help::help_height(&sections)
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Min(5),                // Screen
            Constraint::Length(footer_height), // Hints or help
        ])
        .split(f.area());

    header::render_title(f, chunks[0], state);

    match state.mode {
        AppMode::MainMenu => menus::render_main_menu(f, chunks[1], state),
        AppMode::ServicePrompt(action) => {
            menus::render_service_prompt(f, chunks[1], state, action)
        }
        AppMode::Wizard => {
            if let Some(session) = &state.wizard {
                wizard::render_wizard(f, chunks[1], session, &state.input);
            }
        }
    }

    if state.help_visible {
        help::render_help(f, chunks[2], &sections);
    } else {
        f.render_widget(Paragraph::new(help::hint_line(&sections)), chunks[2]);
    }
}
