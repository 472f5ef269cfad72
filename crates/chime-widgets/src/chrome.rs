//! Border chrome for the picker's trigger and floating panel.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Trigger border: cyan while the panel is open, dark gray when disabled,
/// gray otherwise.
pub fn trigger_block(open: bool, disabled: bool) -> Block<'static> {
    let color = if disabled {
        Color::DarkGray
    } else if open {
        Color::Cyan
    } else {
        Color::Gray
    };
    Block::new()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Rounded border for a floating dialog panel, labelled with `title`.
pub fn dialog_block(title: &str) -> Block<'_> {
    Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan))
}
