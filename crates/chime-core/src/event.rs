use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

/// Events published on the process-wide host hub.
///
/// Every terminal event read by the runtime is broadcast as a `HostEvent`
/// to all live [`listen`](crate::host::listen) subscriptions. Variants wrap
/// the crossterm payloads so listeners can match on the full crossterm API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event (press, release, drag, move, wheel).
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl HostEvent {
    /// Cell under a mouse button-down, whatever the button.
    pub fn pointer_down(&self) -> Option<Position> {
        match self {
            HostEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }

    /// Cell under a primary (left) button-down.
    pub fn primary_press(&self) -> Option<Position> {
        match self {
            HostEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(Position::new(*column, *row)),
            _ => None,
        }
    }

    /// Wheel direction and cell for any scroll event.
    pub fn scroll(&self) -> Option<(ScrollDirection, Position)> {
        let HostEvent::Mouse(MouseEvent {
            kind, column, row, ..
        }) = self
        else {
            return None;
        };
        let direction = match kind {
            MouseEventKind::ScrollUp => ScrollDirection::Up,
            MouseEventKind::ScrollDown => ScrollDirection::Down,
            MouseEventKind::ScrollLeft => ScrollDirection::Left,
            MouseEventKind::ScrollRight => ScrollDirection::Right,
            _ => return None,
        };
        Some((direction, Position::new(*column, *row)))
    }
}

/// Direction of a wheel/trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl From<crossterm::event::Event> for HostEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => HostEvent::Key(k),
            crossterm::event::Event::Mouse(m) => HostEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => HostEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => HostEvent::FocusGained,
            crossterm::event::Event::FocusLost => HostEvent::FocusLost,
            crossterm::event::Event::Paste(s) => HostEvent::Paste(s),
        }
    }
}
