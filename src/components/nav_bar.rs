//! Bottom navigation bar listing the keys available in the current mode

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// Spans for the bar, items separated by two spaces
    pub fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{}]", item.key_display), Styles::key_hint()));
            spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        }
        spans
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(Line::from(self.spans())), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_layout() {
        let bar = NavBar::new(vec![
            NavBarItem {
                key_display: "Enter".to_string(),
                action_label: "Calculate".to_string(),
            },
            NavBarItem {
                key_display: "Q".to_string(),
                action_label: "Quit".to_string(),
            },
        ]);
        let text: String = bar.spans().iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[Enter] Calculate  [Q] Quit");
    }
}
