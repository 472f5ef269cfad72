//! Time-of-day picker: a bordered trigger showing the current value, plus a
//! floating list of `HH:MM` options.
//!
//! The list is generated fresh on every open at the configured interval,
//! painted above everything else, and anchored to the trigger with
//! [`placement::place`]. While the list is open the picker holds a
//! screen-wide host listener (see [`TimePicker::subscriptions`]) that closes
//! it on any press outside both the trigger and the panel, and re-anchors it
//! on resize and scroll. Closing for any reason drops the listener.
//!
//! # Routing
//!
//! The parent forwards left-button presses it receives with
//! [`Message::Click`]; that is how the trigger and the options are activated.
//! The picker's own listener only watches for outside presses, resizes and
//! scrolls, so it is safe for both to see the same press.
//!
//! ```rust,ignore
//! Msg::Mouse(ev) => {
//!     let host = HostEvent::Mouse(ev);
//!     match host.primary_press() {
//!         Some(pos) => self.start.update(time_picker::Message::Click(pos)).map(Msg::Start),
//!         None => Command::none(),
//!     }
//! }
//! Msg::Start(time_picker::Message::Changed(value)) => { self.saved = Some(value); Command::none() }
//! Msg::Start(m) => self.start.update(m).map(Msg::Start),
//! ```

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

use chime_core::command::Command;
use chime_core::component::Component;
use chime_core::event::{HostEvent, ScrollDirection};
use chime_core::host;
use chime_core::subscription::{Subscription, SubscriptionId};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::chrome;
use crate::overlay;
use crate::placement::{self, Bounds, Placement, PlacementConfig};
use crate::selection::SelectionState;
use crate::time_slots::{time_slots, DEFAULT_INTERVAL};

const WHEEL_LINES: usize = 3;
const DIALOG_TITLE: &str = " time ";

static NEXT_PICKER_ID: AtomicU64 = AtomicU64::new(1);

/// Messages for the time picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A primary press routed by the parent. Activates the trigger or an
    /// option when it lands on one.
    Click(Position),
    /// Activate the trigger: open when closed, close when open.
    Toggle,
    /// Activate the option with this label. Ignored while closed.
    Pick(String),
    /// Close the panel without selecting.
    Close,
    /// Any button went down somewhere on screen (from the open listener).
    PointerDown(Position),
    /// The terminal was resized (from the open listener).
    Resized(u16, u16),
    /// A wheel scroll happened somewhere on screen (from the open listener).
    Scrolled(ScrollDirection, Position),
    /// Emitted once per selection with the picked `HH:MM` label.
    Changed(String),
}

/// Why the panel closed. Logged, and handy in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Selected,
    OutsidePress,
    Toggled,
    Requested,
    Disabled,
}

/// Visual style configuration for [`TimePicker`].
#[derive(Debug, Clone)]
pub struct TimePickerStyle {
    /// Trigger text when a value is set.
    pub value: Style,
    /// Trigger text when no value is set.
    pub placeholder: Style,
    /// Trigger text while disabled.
    pub disabled: Style,
    /// The open/closed arrow after the trigger text.
    pub indicator: Style,
    /// Option rows.
    pub option: Style,
    /// The option matching the current value.
    pub active_option: Style,
}

impl Default for TimePickerStyle {
    fn default() -> Self {
        Self {
            value: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            indicator: Style::default().fg(Color::DarkGray),
            option: Style::default(),
            active_option: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Everything that exists only while the panel is open.
struct OpenState {
    slots: Vec<String>,
    /// Window height follows the rows actually painted.
    list: Cell<SelectionState>,
    placement: Cell<Option<Placement>>,
    /// Set by open/resize/scroll; the next `view` re-measures the trigger.
    remeasure: Cell<bool>,
    panel_area: Cell<Rect>,
    list_area: Cell<Rect>,
}

/// A time-of-day picker with a floating option list.
///
/// # Example
///
/// ```ignore
/// use chime_widgets::time_picker::TimePicker;
///
/// let picker = TimePicker::new()
///     .with_value("09:30")
///     .with_placeholder("Start time")
///     .with_interval(15);
/// ```
pub struct TimePicker {
    id: u64,
    value: Option<String>,
    placeholder: String,
    interval: u32,
    disabled: bool,
    placement_config: PlacementConfig,
    style: TimePickerStyle,
    block: Option<Block<'static>>,
    overlay_block: Block<'static>,
    open: Option<OpenState>,
    trigger_area: Cell<Rect>,
    screen: Cell<Rect>,
}

impl TimePicker {
    /// Create a closed picker with no value and a 30 minute interval.
    pub fn new() -> Self {
        Self {
            id: NEXT_PICKER_ID.fetch_add(1, Ordering::Relaxed),
            value: None,
            placeholder: "Select time".to_string(),
            interval: DEFAULT_INTERVAL,
            disabled: false,
            placement_config: PlacementConfig::TERMINAL,
            style: TimePickerStyle::default(),
            block: None,
            overlay_block: chrome::dialog_block(DIALOG_TITLE),
            open: None,
            trigger_area: Cell::new(Rect::default()),
            screen: Cell::new(Rect::default()),
        }
    }

    /// Set the initial value. An empty string means no value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the text shown when no value is selected.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the minutes between generated options.
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Start disabled (activation does nothing).
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Override the panel dimensions used for placement.
    pub fn with_placement(mut self, config: PlacementConfig) -> Self {
        self.placement_config = config;
        self
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: TimePickerStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the trigger border. Without one the trigger uses
    /// [`chrome::trigger_block`].
    pub fn with_block(mut self, block: Block<'static>) -> Self {
        self.block = Some(block);
        self
    }

    /// Replace the floating panel's border.
    pub fn with_overlay_block(mut self, block: Block<'static>) -> Self {
        self.overlay_block = block;
        self
    }

    /// The selected `HH:MM` label, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the working value (controlled usage). An empty string clears
    /// it. No change message is emitted.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = (!value.is_empty()).then_some(value);
        if let Some(open) = self.open.as_mut() {
            let active = active_index(&open.slots, self.value.as_deref());
            open.list.get_mut().select(active);
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the picker. Disabling closes an open panel.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close(CloseReason::Disabled);
        }
    }

    /// Whether the floating panel is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Labels in the open panel; `None` while closed.
    pub fn options(&self) -> Option<&[String]> {
        self.open.as_ref().map(|open| open.slots.as_slice())
    }

    /// Current panel placement; `None` while closed or before the trigger
    /// has been measured.
    pub fn placement(&self) -> Option<Placement> {
        self.open.as_ref().and_then(|open| open.placement.get())
    }

    /// Trigger area recorded by the last `view`.
    pub fn trigger_area(&self) -> Rect {
        self.trigger_area.get()
    }

    /// Panel area painted by the last `view`; `None` while closed or not
    /// yet painted.
    pub fn overlay_area(&self) -> Option<Rect> {
        self.open
            .as_ref()
            .map(|open| open.panel_area.get())
            .filter(|area| !area.is_empty())
    }

    /// Identity of the screen-wide listener held while open.
    pub fn listener_id(&self) -> SubscriptionId {
        SubscriptionId::new::<TimePicker>(self.id)
    }

    /// Open the panel unless disabled or already open.
    pub fn open(&mut self) {
        if self.disabled {
            tracing::trace!(picker = self.id, "activation ignored: disabled");
            return;
        }
        if self.open.is_some() {
            return;
        }

        let slots = time_slots(self.interval);
        let mut list = SelectionState::new(slots.len(), self.visible_rows(slots.len()));
        list.select(active_index(&slots, self.value.as_deref()));

        let placement = self.compute_placement();
        tracing::debug!(
            picker = self.id,
            options = slots.len(),
            ?placement,
            "time picker opened"
        );
        self.open = Some(OpenState {
            slots,
            list: Cell::new(list),
            placement: Cell::new(placement),
            remeasure: Cell::new(true),
            panel_area: Cell::new(Rect::default()),
            list_area: Cell::new(Rect::default()),
        });
    }

    /// Close the panel if open.
    pub fn close(&mut self, reason: CloseReason) {
        if self.open.take().is_some() {
            tracing::debug!(picker = self.id, ?reason, "time picker closed");
        }
    }

    fn toggle(&mut self) {
        if self.disabled {
            tracing::trace!(picker = self.id, "activation ignored: disabled");
            return;
        }
        if self.open.is_some() {
            self.close(CloseReason::Toggled);
        } else {
            self.open();
        }
    }

    fn pick(&mut self, label: String) -> Command<Message> {
        if self.open.is_none() {
            return Command::none();
        }
        tracing::debug!(picker = self.id, value = %label, "time selected");
        self.value = Some(label.clone());
        self.close(CloseReason::Selected);
        Command::message(Message::Changed(label))
    }

    fn option_at(&self, pos: Position) -> Option<String> {
        let open = self.open.as_ref()?;
        let list_area = open.list_area.get();
        if !list_area.contains(pos) {
            return None;
        }
        let index = open.list.get().offset() + usize::from(pos.y - list_area.y);
        open.slots.get(index).cloned()
    }

    fn is_inside(&self, pos: Position) -> bool {
        let in_trigger = self.trigger_area.get().contains(pos);
        let in_panel = self
            .open
            .as_ref()
            .is_some_and(|open| open.panel_area.get().contains(pos));
        in_trigger || in_panel
    }

    fn compute_placement(&self) -> Option<Placement> {
        let placement = Bounds::measure(self.trigger_area.get()).map(|trigger| {
            placement::place(trigger, self.screen.get().into(), &self.placement_config)
        });
        if placement.is_none() {
            tracing::trace!(picker = self.id, "trigger not measured; placement skipped");
        }
        placement
    }

    fn reposition(&mut self) {
        let placement = self.compute_placement();
        if let Some(open) = self.open.as_mut() {
            if placement.is_some() {
                open.placement.set(placement);
            }
            open.remeasure.set(true);
        }
    }

    fn max_panel_height(&self) -> u16 {
        self.placement_config
            .estimated_height
            .round()
            .clamp(0.0, f64::from(u16::MAX)) as u16
    }

    fn visible_rows(&self, count: usize) -> usize {
        let chrome = overlay::panel_height(0, Some(&self.overlay_block), u16::MAX);
        let height = overlay::panel_height(count, Some(&self.overlay_block), self.max_panel_height());
        usize::from(height.saturating_sub(chrome))
    }

    fn view_trigger(&self, frame: &mut Frame, area: Rect) {
        let block = self
            .block
            .clone()
            .unwrap_or_else(|| chrome::trigger_block(self.is_open(), self.disabled));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (text, style) = match (&self.value, self.disabled) {
            (_, true) => (
                self.value.as_deref().unwrap_or(&self.placeholder),
                self.style.disabled,
            ),
            (Some(value), false) => (value.as_str(), self.style.value),
            (None, false) => (self.placeholder.as_str(), self.style.placeholder),
        };
        let indicator = if self.is_open() { " ▾" } else { " ▸" };
        let room = usize::from(inner.width).saturating_sub(indicator.width());

        let line = Line::from(vec![
            Span::styled(truncate_to_width(text, room), style),
            Span::styled(indicator, self.style.indicator),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn view_panel(&self, frame: &mut Frame, open: &OpenState, trigger: Rect) {
        let Some(bounds) = Bounds::measure(trigger) else {
            tracing::trace!(picker = self.id, "panel not painted: trigger not measurable");
            open.placement.set(None);
            open.remeasure.set(true);
            open.panel_area.set(Rect::default());
            open.list_area.set(Rect::default());
            return;
        };
        let placement = match open.placement.get() {
            Some(placement) if !open.remeasure.get() => placement,
            _ => {
                let fresh = placement::place(bounds, frame.area().into(), &self.placement_config);
                open.placement.set(Some(fresh));
                open.remeasure.set(false);
                fresh
            }
        };

        let height = overlay::panel_height(
            open.slots.len(),
            Some(&self.overlay_block),
            self.max_panel_height(),
        );
        let area = overlay::panel_area(&placement, height, frame);
        open.panel_area.set(area);
        if area.is_empty() {
            open.list_area.set(Rect::default());
            return;
        }

        let inner = overlay::render_overlay(frame, area, Some(&self.overlay_block));
        open.list_area.set(inner);

        let mut list = open.list.get();
        list.set_visible(usize::from(inner.height));
        open.list.set(list);

        let active = list.active();
        for (row, index) in list.window().enumerate() {
            let label = &open.slots[index];
            let is_active = active == Some(index);
            let (prefix, style) = if is_active {
                ("▸ ", self.style.active_option)
            } else {
                ("  ", self.style.option)
            };
            let row_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("{prefix}{label}"), style)),
                row_area,
            );
        }
    }
}

impl Default for TimePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TimePicker {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Click(pos) => {
                if self.trigger_area.get().contains(pos) {
                    self.toggle();
                } else if let Some(label) = self.option_at(pos) {
                    return self.pick(label);
                }
                Command::none()
            }
            Message::Toggle => {
                self.toggle();
                Command::none()
            }
            Message::Pick(label) => self.pick(label),
            Message::Close => {
                self.close(CloseReason::Requested);
                Command::none()
            }
            Message::PointerDown(pos) => {
                if self.is_open() && !self.is_inside(pos) {
                    self.close(CloseReason::OutsidePress);
                }
                Command::none()
            }
            Message::Resized(width, height) => {
                self.screen.set(Rect::new(0, 0, width, height));
                self.reposition();
                Command::none()
            }
            Message::Scrolled(direction, pos) => {
                if let Some(open) = self.open.as_mut() {
                    if open.panel_area.get().contains(pos) {
                        match direction {
                            ScrollDirection::Up => open.list.get_mut().scroll_up(WHEEL_LINES),
                            ScrollDirection::Down => open.list.get_mut().scroll_down(WHEEL_LINES),
                            ScrollDirection::Left | ScrollDirection::Right => {}
                        }
                    }
                }
                self.reposition();
                Command::none()
            }
            Message::Changed(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.trigger_area.set(area);
        self.screen.set(frame.area());
        self.view_trigger(frame, area);
        if let Some(open) = self.open.as_ref() {
            self.view_panel(frame, open, area);
        }
    }

    /// The screen-wide listener, present only while the panel is open.
    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.open.is_none() {
            return vec![];
        }
        vec![host::listen(self.listener_id(), listener_message)]
    }
}

/// Map a host event to what the open panel's listener cares about.
pub fn listener_message(event: HostEvent) -> Option<Message> {
    if let Some(pos) = event.pointer_down() {
        return Some(Message::PointerDown(pos));
    }
    if let Some((direction, pos)) = event.scroll() {
        return Some(Message::Scrolled(direction, pos));
    }
    match event {
        HostEvent::Resize(width, height) => Some(Message::Resized(width, height)),
        _ => None,
    }
}

fn active_index(slots: &[String], value: Option<&str>) -> Option<usize> {
    let value = value?;
    slots.iter().position(|slot| slot == value)
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::testing::buffer_to_string;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    const TRIGGER: Rect = Rect::new(2, 2, 20, 3);

    fn render(picker: &TimePicker, width: u16, height: u16, trigger: Rect) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| picker.view(frame, trigger)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn opened(picker: &mut TimePicker) {
        render(picker, 80, 24, TRIGGER);
        picker.update(Message::Click(Position::new(5, 3)));
        render(picker, 80, 24, TRIGGER);
        assert!(picker.is_open());
    }

    #[test]
    fn starts_closed_with_placeholder() {
        let picker = TimePicker::new();
        assert!(!picker.is_open());
        assert_eq!(picker.value(), None);
        assert!(picker.options().is_none());
        assert!(render(&picker, 40, 5, TRIGGER).contains("Select time ▸"));
    }

    #[test]
    fn trigger_shows_value_over_placeholder() {
        let picker = TimePicker::new().with_value("14:00").with_placeholder("Start");
        let out = render(&picker, 40, 5, TRIGGER);
        assert!(out.contains("14:00"));
        assert!(!out.contains("Start"));
    }

    #[test]
    fn empty_value_means_none() {
        let mut picker = TimePicker::new().with_value("08:00");
        picker.set_value("");
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn click_on_trigger_opens_with_fresh_options() {
        let mut picker = TimePicker::new().with_interval(60);
        opened(&mut picker);
        let options = picker.options().unwrap();
        assert_eq!(options.len(), 24);
        assert_eq!(options[0], "00:00");
    }

    #[test]
    fn options_follow_interval_changes_between_opens() {
        let mut picker = TimePicker::new();
        picker.update(Message::Toggle);
        assert_eq!(picker.options().map(<[String]>::len), Some(48));
        picker.update(Message::Toggle);
        assert!(picker.options().is_none());

        picker = picker.with_interval(15);
        picker.update(Message::Toggle);
        assert_eq!(picker.options().map(<[String]>::len), Some(96));
    }

    #[test]
    fn disabled_trigger_never_opens() {
        let mut picker = TimePicker::new().with_disabled(true);
        render(&picker, 80, 24, TRIGGER);
        picker.update(Message::Click(Position::new(5, 3)));
        picker.update(Message::Toggle);
        picker.open();
        assert!(!picker.is_open());
        assert!(picker.subscriptions().is_empty());
    }

    #[test]
    fn disabling_closes_an_open_panel() {
        let mut picker = TimePicker::new();
        picker.update(Message::Toggle);
        picker.set_disabled(true);
        assert!(!picker.is_open());
    }

    #[test]
    fn clicking_trigger_again_closes() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        picker.update(Message::Click(Position::new(5, 3)));
        assert!(!picker.is_open());
    }

    #[test]
    fn panel_opens_below_trigger() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        let placement = picker.placement().unwrap();
        assert_eq!((placement.top, placement.left), (6, 2));
        assert_eq!(picker.overlay_area(), Some(Rect::new(2, 6, 16, 12)));
    }

    #[test]
    fn panel_flips_above_trigger_near_bottom() {
        let mut picker = TimePicker::new();
        let low = Rect::new(2, 18, 20, 3);
        render(&picker, 80, 24, low);
        picker.update(Message::Toggle);
        render(&picker, 80, 24, low);
        let placement = picker.placement().unwrap();
        assert_eq!(placement.top, 18 - 12 - 1);
        assert_eq!(placement.side, placement::Side::Above);
    }

    #[test]
    fn unmeasured_trigger_skips_placement() {
        let mut picker = TimePicker::new();
        picker.update(Message::Toggle);
        assert!(picker.is_open());
        assert_eq!(picker.placement(), None);

        render(&picker, 80, 24, Rect::new(2, 2, 0, 0));
        assert_eq!(picker.placement(), None);
        assert_eq!(picker.overlay_area(), None);
    }

    #[test]
    fn trigger_lost_after_measuring_hides_the_panel() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        assert!(picker.overlay_area().is_some());

        // The parent scrolled the trigger out of its layout.
        picker.update(Message::Scrolled(ScrollDirection::Down, Position::new(70, 1)));
        let out = render(&picker, 80, 24, Rect::default());
        assert!(picker.is_open());
        assert_eq!(picker.placement(), None);
        assert_eq!(picker.overlay_area(), None);
        assert!(!out.contains("00:00"));

        render(&picker, 80, 24, TRIGGER);
        assert_eq!(picker.overlay_area(), Some(Rect::new(2, 6, 16, 12)));
    }

    const TOP_TRIGGER: Rect = Rect::new(2, 0, 20, 3);

    #[test]
    fn clipped_panel_reveals_active_value_on_open() {
        let mut picker = TimePicker::new().with_value("23:30");
        render(&picker, 80, 10, TOP_TRIGGER);
        picker.update(Message::Toggle);
        let out = render(&picker, 80, 10, TOP_TRIGGER);
        assert_eq!(picker.overlay_area(), Some(Rect::new(2, 4, 16, 6)));
        assert!(out.contains("▸ 23:30"));
    }

    #[test]
    fn clipped_panel_scrolls_to_the_last_option() {
        let mut picker = TimePicker::new();
        render(&picker, 80, 10, TOP_TRIGGER);
        picker.update(Message::Toggle);
        render(&picker, 80, 10, TOP_TRIGGER);
        for _ in 0..40 {
            picker.update(Message::Scrolled(ScrollDirection::Down, Position::new(5, 6)));
        }
        let out = render(&picker, 80, 10, TOP_TRIGGER);
        assert!(out.contains("23:30"));

        // Fourth and last painted row.
        let cmd = picker.update(Message::Click(Position::new(5, 8)));
        assert_eq!(cmd.into_messages(), vec![Message::Changed("23:30".into())]);
    }

    #[test]
    fn panel_lists_times_and_highlights_value() {
        let mut picker = TimePicker::new().with_value("09:30");
        opened(&mut picker);
        let out = render(&picker, 80, 24, TRIGGER);
        assert!(out.contains("▸ 09:30"));
        assert!(out.contains("  09:00"));
        assert!(!out.contains("00:00"));
    }

    #[test]
    fn clicking_an_option_selects_it_once_and_closes() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        let list = Rect::new(3, 7, 14, 10);
        // First visible row is 00:00, second is 00:30.
        let cmd = picker.update(Message::Click(Position::new(list.x + 2, list.y + 1)));
        assert_eq!(cmd.into_messages(), vec![Message::Changed("00:30".into())]);
        assert_eq!(picker.value(), Some("00:30"));
        assert!(!picker.is_open());
    }

    #[test]
    fn pick_emits_exact_label_once() {
        let mut picker = TimePicker::new();
        picker.update(Message::Toggle);
        let cmd = picker.update(Message::Pick("09:30".into()));
        assert_eq!(cmd.into_messages(), vec![Message::Changed("09:30".into())]);
        assert!(!picker.is_open());
        assert_eq!(picker.value(), Some("09:30"));
    }

    #[test]
    fn pick_while_closed_is_ignored() {
        let mut picker = TimePicker::new();
        let cmd = picker.update(Message::Pick("09:30".into()));
        assert!(cmd.is_none());
        assert_eq!(picker.value(), None);
    }

    #[test]
    fn outside_press_closes() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        picker.update(Message::PointerDown(Position::new(60, 20)));
        assert!(!picker.is_open());
    }

    #[test]
    fn press_inside_trigger_or_panel_keeps_open() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        picker.update(Message::PointerDown(Position::new(3, 3)));
        assert!(picker.is_open());
        picker.update(Message::PointerDown(Position::new(10, 12)));
        assert!(picker.is_open());
    }

    #[test]
    fn listener_exists_only_while_open() {
        let mut picker = TimePicker::new();
        assert!(picker.subscriptions().is_empty());

        picker.update(Message::Toggle);
        let subs = picker.subscriptions();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id(), &picker.listener_id());

        picker.update(Message::Close);
        assert!(picker.subscriptions().is_empty());
    }

    #[test]
    fn pickers_have_distinct_listeners() {
        assert_ne!(TimePicker::new().listener_id(), TimePicker::new().listener_id());
    }

    #[test]
    fn resize_repositions() {
        let mut picker = TimePicker::new();
        let trigger = Rect::new(60, 2, 18, 3);
        render(&picker, 100, 24, trigger);
        picker.update(Message::Toggle);
        assert_eq!(picker.placement().map(|p| p.left), Some(60));

        picker.update(Message::Resized(70, 24));
        assert_eq!(picker.placement().map(|p| p.left), Some(70 - 16 - 1));
    }

    #[test]
    fn scroll_remeasures_moved_trigger() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        assert_eq!(picker.placement().map(|p| p.top), Some(6));

        // The parent scrolled its content; the trigger now sits lower.
        let moved = Rect::new(2, 4, 20, 3);
        picker.update(Message::Scrolled(ScrollDirection::Down, Position::new(70, 1)));
        render(&picker, 80, 24, moved);
        assert_eq!(picker.placement().map(|p| p.top), Some(8));
    }

    #[test]
    fn wheel_over_panel_scrolls_the_list() {
        let mut picker = TimePicker::new();
        opened(&mut picker);
        picker.update(Message::Scrolled(ScrollDirection::Down, Position::new(5, 10)));
        let out = render(&picker, 80, 24, TRIGGER);
        assert!(out.contains("01:30"));
        assert!(!out.contains("00:00"));
    }

    #[test]
    fn listener_maps_relevant_host_events() {
        let press = HostEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 9,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            listener_message(press),
            Some(Message::PointerDown(Position::new(9, 4)))
        );
        assert_eq!(
            listener_message(HostEvent::Resize(100, 40)),
            Some(Message::Resized(100, 40))
        );
        assert_eq!(listener_message(HostEvent::FocusLost), None);
    }

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate_to_width("Select time", 6), "Selec…");
        assert_eq!(truncate_to_width("09:30", 5), "09:30");
        assert_eq!(truncate_to_width("09:30", 0), "");
    }
}
