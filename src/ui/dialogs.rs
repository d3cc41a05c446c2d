//! Dialog rendering module

use crate::app::AppState;
use crate::components::centered_rect;
use crate::theme::Styles;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the add-unit dialog over the form
pub fn render_add_unit_dialog(f: &mut Frame, state: &AppState) {
    let Some(ref dialog) = state.add_unit_dialog else {
        return;
    };

    let area = centered_rect(40, 30, 36, 8, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", dialog.title))
        .border_style(Styles::border_active())
        .style(Styles::panel_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Instructions
            Constraint::Length(1),
            Constraint::Length(1), // Input
            Constraint::Length(1),
            Constraint::Min(1), // Error
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(dialog.instructions.as_str()).style(Styles::text_muted()),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Styles::title()),
            Span::styled(format!("{}_", dialog.input.value()), Styles::text()),
        ])),
        rows[2],
    );
    if let Some(ref error) = dialog.error {
        f.render_widget(Paragraph::new(error.as_str()).style(Styles::error()), rows[4]);
    }
}
