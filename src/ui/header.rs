//! Title, status line and the overlays shared by every screen

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::engine::CalculationResponse;
use crate::theme::Styles;
use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const TITLE: &str = "COREPLANT Ply Combination Calculator";

/// Render the title block
pub fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(TITLE)
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_active()))
        .alignment(Alignment::Center)
        .style(Styles::title());
    f.render_widget(title, area);
}

/// Render the one-line status message
pub fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let style = match state.outcome {
        Some(CalculationResponse::Err { .. }) => Styles::error(),
        _ => Styles::text_muted(),
    };
    f.render_widget(Paragraph::new(state.status_message.as_str()).style(style), area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_items = keybinding_ctx.get_nav_items(&state.mode);
    NavBar::new(nav_items).render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
