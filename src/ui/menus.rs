//! Main menu and service-name prompt rendering

use crate::app::{AppState, MenuAction, TextInput};
use crate::theme::{Styles, UiText};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Render the main menu list
pub fn render_main_menu(f: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = MenuAction::all()
        .into_iter()
        .map(|action| ListItem::new(action.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Main menu ")
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .style(Styles::text())
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_selection));
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Text input box showing either the value or the muted placeholder
pub fn input_line(input: &TextInput) -> Line<'static> {
    if input.value.is_empty() {
        Line::from(vec![
            Span::styled("> ", Styles::title()),
            Span::styled(input.placeholder.clone(), Styles::text_muted()),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Styles::title()),
            Span::styled(input.value.clone(), Styles::text()),
            Span::styled("_", Styles::text_muted()),
        ])
    }
}

/// Error paragraph used under every input
pub fn error_paragraph(message: &str) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(UiText::ERROR_PREFIX, Styles::error()),
            Span::styled(message.to_string(), Styles::error()),
        ]),
        Line::from(Span::styled(UiText::ACK_HINT, Styles::nav_hint())),
    ])
    .wrap(Wrap { trim: false })
}

/// Render the service-name prompt for a menu action
pub fn render_service_prompt(f: &mut Frame, area: Rect, state: &AppState, action: MenuAction) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Input
            Constraint::Min(0),    // Error
        ])
        .split(area);

    let prompt = Paragraph::new(action.prompt()).style(Styles::text());
    f.render_widget(prompt, chunks[0]);

    let input = Paragraph::new(input_line(&state.input)).block(
        Block::default()
            .title(format!(" {} ", action))
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    );
    f.render_widget(input, chunks[1]);

    if let Some(message) = &state.prompt_error {
        f.render_widget(error_paragraph(message), chunks[2]);
    }
}
