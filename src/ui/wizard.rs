//! Install wizard screens
//!
//! One layout for every state: a step line, the prompt, the state's body
//! (text input, option list or unit preview) and the pending message.

use super::menus::{error_paragraph, input_line};
use crate::app::TextInput;
use crate::theme::{Styles, Theme, UiText};
use crate::wizard::{WizardSession, WizardState};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// "Step 3/14: Working directory"
pub fn step_label(state: WizardState) -> String {
    format!(
        "Step {}/{}: {}",
        state.order() as usize + 1,
        WizardState::all_states().len(),
        state.description()
    )
}

/// Compact progress line: completed steps green, current step highlighted
fn progress_line(state: WizardState) -> Line<'static> {
    let spans: Vec<Span> = WizardState::all_states()
        .iter()
        .map(|s| {
            let marker = if *s == state { "●" } else { "·" };
            Span::styled(
                format!("{} ", marker),
                Theme::step_style(s.order() < state.order(), *s == state),
            )
        })
        .collect();
    Line::from(spans)
}

/// Lines of the options list, cursor marked with `>`
pub fn option_lines(session: &WizardSession) -> Vec<Line<'static>> {
    session
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let text = format!("{} {}", Theme::checkbox(option.selected), option.label);
            if i == session.highlighted() {
                Line::from(Span::styled(format!("> {}", text), Styles::focused()))
            } else {
                Line::from(Span::styled(format!("  {}", text), Styles::text()))
            }
        })
        .collect()
}

/// Summary of the chosen options shown under the preview
pub fn selected_summary(session: &WizardSession) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        UiText::SELECTED_OPTIONS,
        Styles::text_secondary(),
    ))];
    let labels = session.selected_labels();
    if labels.is_empty() {
        lines.push(Line::from(Span::styled(UiText::NO_OPTIONS, Styles::text_muted())));
    }
    for label in labels {
        lines.push(Line::from(Span::styled(format!("✓ {}", label), Styles::success())));
    }
    if session.actions().overwrite {
        lines.push(Line::from(Span::styled(
            "! Existing unit file will be overwritten",
            Styles::warning(),
        )));
    }
    lines
}

/// Render the active wizard state
pub fn render_wizard(f: &mut Frame, area: Rect, session: &WizardSession, input: &TextInput) {
    let state = session.state();
    let error_height = if session.error().is_some() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Step + progress
            Constraint::Length(2),            // Prompt
            Constraint::Min(3),               // Body
            Constraint::Length(error_height), // Error
        ])
        .split(area);

    let step = Paragraph::new(vec![
        Line::from(Span::styled(step_label(state), Styles::title())),
        progress_line(state),
    ]);
    f.render_widget(step, chunks[0]);

    let prompt = Paragraph::new(session.prompt())
        .style(Styles::text())
        .wrap(Wrap { trim: false });
    f.render_widget(prompt, chunks[1]);

    match state {
        WizardState::OptionsSelect => {
            let list = Paragraph::new(option_lines(session)).block(
                Block::default()
                    .title(" Options ")
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            );
            f.render_widget(list, chunks[2]);
        }
        WizardState::PreviewUnit => render_preview(f, chunks[2], session),
        _ => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(chunks[2]);
            let input_box = Paragraph::new(input_line(input)).block(
                Block::default()
                    .title(format!(" {} ", state.description()))
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            );
            f.render_widget(input_box, body[0]);
        }
    }

    if let Some(message) = session.error() {
        f.render_widget(error_paragraph(message), chunks[3]);
    }
}

fn render_preview(f: &mut Frame, area: Rect, session: &WizardSession) {
    let summary = selected_summary(session);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(summary.len() as u16),
        ])
        .split(area);

    let title = format!(" {} ", session.config().unit_file_path().display());
    let preview = Paragraph::new(session.preview().to_string())
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::border_active()),
        )
        .style(Styles::text())
        .scroll((session.scroll().min(u16::MAX as usize) as u16, 0));
    f.render_widget(preview, chunks[0]);

    f.render_widget(Paragraph::new(summary), chunks[1]);
}
