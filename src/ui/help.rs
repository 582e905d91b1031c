//! Context-aware key help
//!
//! The help block toggled with Ctrl+H and the one-line hint under every
//! screen are both built from the same table.

use crate::app::AppMode;
use crate::theme::{Colors, Styles};
use crate::wizard::WizardState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// A titled group of `(key, description)` pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub items: Vec<(&'static str, &'static str)>,
}

fn global_section() -> HelpSection {
    HelpSection {
        title: "Global",
        items: vec![("Ctrl+H", "Show/hide this help"), ("Esc", "Cancel / quit")],
    }
}

/// Help content for the active screen
pub fn help_sections(mode: AppMode, wizard_state: Option<WizardState>) -> Vec<HelpSection> {
    let screen = match (mode, wizard_state) {
        (AppMode::MainMenu, _) => HelpSection {
            title: "Main menu",
            items: vec![
                ("Up/k", "Previous entry"),
                ("Down/j", "Next entry"),
                ("Enter", "Select"),
                ("q", "Quit"),
            ],
        },
        (AppMode::Wizard, Some(WizardState::OptionsSelect)) => HelpSection {
            title: "Options",
            items: vec![
                ("Up/Down", "Move between options"),
                ("Space", "Toggle option"),
                ("Enter", "Render the unit preview"),
            ],
        },
        (AppMode::Wizard, Some(WizardState::PreviewUnit)) => HelpSection {
            title: "Preview",
            items: vec![
                ("Up/Down", "Scroll one line"),
                ("PgUp/PgDn", "Scroll ten lines"),
                ("Enter", "Install the service"),
            ],
        },
        _ => HelpSection {
            title: "Text input",
            items: vec![
                ("Enter", "Confirm (empty uses the default)"),
                ("Tab", "Fill in the default"),
                ("Backspace", "Delete last character"),
            ],
        },
    };

    vec![screen, global_section()]
}

/// One-line key hint for the footer
pub fn hint_line(sections: &[HelpSection]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, desc) in sections.iter().flat_map(|s| s.items.iter()) {
        if !spans.is_empty() {
            spans.push(Span::styled("  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(*key, Styles::key()));
        spans.push(Span::styled(format!(" {}", desc), Styles::nav_hint()));
    }
    Line::from(spans)
}

/// Number of rows the full help block needs, borders included
pub fn help_height(sections: &[HelpSection]) -> u16 {
    let rows: usize = sections.iter().map(|s| s.items.len() + 1).sum();
    rows as u16 + 2
}

/// Render the full help block
pub fn render_help(f: &mut Frame, area: Rect, sections: &[HelpSection]) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for section in sections {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default()
                .fg(Colors::SUCCESS)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in &section.items {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<10}", key), Styles::key()),
                Span::styled(*description, Styles::text()),
            ]));
        }
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive()),
    );
    f.render_widget(help, area);
}
