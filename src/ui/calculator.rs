//! Calculator form and result panel
//!
//! Line builders are public and free of `Frame` so they can be tested without
//! a terminal.

use crate::app::{AppMode, AppState, FormRow};
use crate::engine::CalculationResponse;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Cursor shown after the field being edited
const CURSOR: &str = "_";

/// One line per form row: the target, then each unit with its cap
pub fn form_lines(state: &AppState) -> Vec<Line<'static>> {
    let selected = state.selected();
    let editing = state.mode == AppMode::Calculator;

    let mut lines = Vec::with_capacity(state.row_count());

    let target_cursor = if editing && selected == FormRow::Target { CURSOR } else { "" };
    lines.push(Line::from(vec![
        Span::styled("Target GSM: ", Styles::title()),
        Span::styled(format!("{}{}", state.target.value(), target_cursor), Styles::text()),
    ]));

    for &unit in state.catalog.units() {
        let excluded = state.is_excluded(unit);
        let checkbox = if excluded { "[ ]" } else { "[x]" };
        let cap = state
            .cap_inputs
            .get(&unit)
            .map(|input| input.value().to_string())
            .unwrap_or_default();
        let cap_cursor = if editing && selected == FormRow::Unit(unit) { CURSOR } else { "" };
        let unit_style = if excluded { Styles::excluded() } else { Styles::text() };

        lines.push(Line::from(vec![
            Span::styled(format!("{checkbox} "), Styles::text_muted()),
            Span::styled(format!("{unit:>6}"), unit_style),
            Span::styled("   max: ", Styles::text_muted()),
            Span::styled(format!("{cap}{cap_cursor}"), Styles::text()),
        ]));
    }

    lines
}

/// Lines for the result panel
pub fn result_lines(outcome: Option<&CalculationResponse>) -> Vec<Line<'static>> {
    match outcome {
        None => vec![Line::from(Span::styled("No calculation yet", Styles::text_muted()))],
        Some(CalculationResponse::Err { message }) => {
            vec![Line::from(Span::styled(message.clone(), Styles::error()))]
        }
        Some(response @ CalculationResponse::Ok { allocations }) => {
            if allocations.is_empty() {
                return vec![Line::from(Span::styled("No units to combine", Styles::text_muted()))];
            }
            let mut lines: Vec<Line<'static>> = allocations
                .iter()
                .map(|a| Line::from(Span::styled(a.to_string(), Styles::text())))
                .collect();
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Total: {}", response.total()),
                Styles::success(),
            )));
            lines
        }
    }
}

pub fn render_form(f: &mut Frame, state: &AppState, area: Rect) {
    let items: Vec<ListItem> = form_lines(state).into_iter().map(ListItem::new).collect();
    let border = if state.mode == AppMode::Calculator {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Units ")
                .border_style(border),
        )
        .highlight_style(Styles::selected());

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_row));
    f.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_results(f: &mut Frame, state: &AppState, area: Rect) {
    let results = Paragraph::new(result_lines(state.outcome.as_ref()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Result ")
                .border_style(Styles::border_inactive()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(results, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Allocation;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_form_lines_mark_exclusions() {
        let mut state = AppState::default();
        state.excluded.insert(350);
        let lines = form_lines(&state);
        assert_eq!(lines.len(), 6);
        assert!(text(&lines[0]).starts_with("Target GSM: "));
        assert!(text(&lines[1]).starts_with("[x]"));
        assert!(text(&lines[4]).starts_with("[ ]"));
    }

    #[test]
    fn test_result_lines_ok() {
        let response = CalculationResponse::Ok {
            allocations: vec![
                Allocation { unit: 200, multiplier: 2 },
                Allocation { unit: 230, multiplier: 1 },
            ],
        };
        let lines = result_lines(Some(&response));
        assert_eq!(text(&lines[0]), "200 x 2");
        assert_eq!(text(&lines[1]), "230 x 1");
        assert_eq!(text(lines.last().unwrap()), "Total: 630");
    }

    #[test]
    fn test_result_lines_error_verbatim() {
        let response = CalculationResponse::Err {
            message: "Please enter a valid number".to_string(),
        };
        let lines = result_lines(Some(&response));
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "Please enter a valid number");
    }
}
