//! Title bar rendering

use crate::app::{AppMode, AppState};
use crate::theme::{Styles, UiText};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Subtitle for the active screen
pub fn screen_title(state: &AppState) -> String {
    match state.mode {
        AppMode::MainMenu => UiText::APP_SUBTITLE.to_string(),
        AppMode::ServicePrompt(action) => action.to_string(),
        AppMode::Wizard => match &state.wizard {
            Some(session) => format!("Install service: {}", session.config().service_name),
            None => "Install service".to_string(),
        },
    }
}

/// Render the title bar
pub fn render_title(f: &mut Frame, area: Rect, state: &AppState) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(UiText::APP_TITLE, Styles::title()),
        Span::styled(" - ", Styles::nav_hint()),
        Span::styled(screen_title(state), Styles::text()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}
