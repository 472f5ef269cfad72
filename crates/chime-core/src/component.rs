use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the `area` its parent laid out for it.
/// Widgets that need their own screen geometry (hit testing, anchoring an
/// overlay) record that area while rendering.
///
/// # Composition pattern
///
/// Wrap the component's message type in a parent variant and lift commands
/// and subscriptions with `map`:
///
/// ```rust,ignore
/// use chime_core::{Command, Component, Model, Subscription};
/// use chime_widgets::time_picker::{self, TimePicker};
///
/// struct Form { start: TimePicker }
///
/// enum Msg { Start(time_picker::Message) }
///
/// impl Model for Form {
///     type Message = Msg;
///     type Flags = ();
///
///     fn init(_: ()) -> (Self, Command<Msg>) {
///         (Form { start: TimePicker::new() }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Start(m) => self.start.update(m).map(Msg::Start),
///         }
///     }
///
///     fn view(&self, frame: &mut ratatui::Frame) {
///         self.start.view(frame, ratatui::layout::Rect::new(2, 2, 20, 3));
///     }
///
///     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///         self.start
///             .subscriptions()
///             .into_iter()
///             .map(|sub| sub.map(Msg::Start))
///             .collect()
///     }
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`].
    ///
    /// The parent lifts the returned command into its own message type with
    /// [`.map()`](Command::map).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the [`Frame`].
    ///
    /// Overlay-style components may paint outside `area` (over the whole
    /// frame); everything else should stay inside it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare the subscriptions this component needs right now.
    ///
    /// The parent includes these in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions). When a parent
    /// stops returning them (state change or the component is dropped) the
    /// runtime aborts them.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
