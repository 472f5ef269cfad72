//! Active-item and scroll-window state for a list taller than its panel.
//!
//! `SelectionState` remembers which item is active (if any) and which slice
//! of the list is on screen. Wheel scrolling moves the window without
//! touching the active item; [`select`](SelectionState::select) moves the
//! window just enough to reveal the newly active item.

use std::ops::Range;

/// Active index plus the visible window over a list of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    active: Option<usize>,
    offset: usize,
    count: usize,
    visible: usize,
}

impl SelectionState {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            active: None,
            offset: 0,
            count,
            visible,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Indices currently inside the window.
    pub fn window(&self) -> Range<usize> {
        self.offset..(self.offset + self.visible).min(self.count)
    }

    /// Mark `index` active (clamped to the list) and scroll it into view.
    /// `None` clears the active item and leaves the window alone.
    pub fn select(&mut self, index: Option<usize>) {
        self.active = match index {
            Some(_) if self.count == 0 => None,
            Some(i) => Some(i.min(self.count - 1)),
            None => None,
        };
        self.reveal_active();
    }

    /// Change the window height, keeping the active item visible. Setting
    /// the current height again leaves a scrolled window where it is.
    pub fn set_visible(&mut self, visible: usize) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        self.clamp_offset();
        self.reveal_active();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines);
        self.clamp_offset();
    }

    fn max_offset(&self) -> usize {
        self.count.saturating_sub(self.visible)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    fn reveal_active(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        if self.visible == 0 {
            return;
        }
        if active < self.offset {
            self.offset = active;
        } else if active >= self.offset + self.visible {
            self.offset = active + 1 - self.visible;
        }
    }
}
