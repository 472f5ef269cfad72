//! **chime** -- a terminal time-of-day picker for [`ratatui`], with the small
//! Elm-architecture runtime that drives it.
//!
//! ```toml
//! [dependencies]
//! chime = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`chime_core`] are available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`listen`], [`run`], [`run_with`], etc.).
//! * The [`widgets`] module re-exports [`chime_widgets`], including
//!   [`TimePicker`](widgets::TimePicker).
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use chime::widgets::time_picker::{self, TimePicker};
//! use chime::{Command, Component, HostEvent, Model, Subscription, SubscriptionId};
//! use ratatui::Frame;
//!
//! struct Form {
//!     start: TimePicker,
//! }
//!
//! enum Msg {
//!     Start(time_picker::Message),
//!     Host(HostEvent),
//! }
//!
//! impl Model for Form {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         (Form { start: TimePicker::new() }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Host(ev) => match ev.primary_press() {
//!                 Some(pos) => self.start.update(time_picker::Message::Click(pos)).map(Msg::Start),
//!                 None => Command::none(),
//!             },
//!             Msg::Start(m) => self.start.update(m).map(Msg::Start),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         self.start.view(frame, ratatui::layout::Rect::new(2, 1, 20, 3));
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         let mut subs = vec![chime::listen(SubscriptionId::of::<Form>(), |ev| Some(Msg::Host(ev)))];
//!         subs.extend(self.start.subscriptions().into_iter().map(|s| s.map(Msg::Start)));
//!         subs
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     chime::run::<Form>(()).await.unwrap();
//! }
//! ```

pub use chime_core::*;
pub mod widgets {
    pub use chime_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
