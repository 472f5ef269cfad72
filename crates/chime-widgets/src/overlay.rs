//! Helpers for panels painted above the normal layout.
//!
//! A floating panel is drawn after everything else, over the whole frame,
//! so no parent layout region clips it. These helpers size the panel from a
//! [`Placement`] and clear the cells beneath it before drawing chrome.

use crate::placement::Placement;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Height a list panel needs: its rows plus the chrome, capped at
/// `max_height`.
pub fn panel_height(rows: usize, block: Option<&Block>, max_height: u16) -> u16 {
    let chrome = match block {
        Some(block) => {
            let sample = Rect::new(0, 0, 100, 100);
            sample.height - block.inner(sample).height
        }
        None => 0,
    };
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.saturating_add(chrome).min(max_height)
}

/// Screen rectangle for a panel at `placement`, clipped to the frame.
pub fn panel_area(placement: &Placement, height: u16, frame: &Frame) -> Rect {
    placement.to_rect(height, frame.area())
}

/// Clear `area` and optionally draw `block` around it.
///
/// Returns the inner area left for content.
pub fn render_overlay(frame: &mut Frame, area: Rect, block: Option<&Block>) -> Rect {
    frame.render_widget(Clear, area);
    if let Some(block) = block {
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);
        inner
    } else {
        area
    }
}
