//! Reusable TUI components

pub mod help_overlay;
pub mod keybindings;
pub mod nav_bar;

use ratatui::layout::Rect;

/// A rectangle of `percent_x` by `percent_y` of `area`, clamped to the given
/// minimum size and centered.
pub fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    area: Rect,
) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent) / 100) as u16;
    let width = scale(area.width, percent_x).max(min_width).min(area.width);
    let height = scale(area.height, percent_y).max(min_height).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
