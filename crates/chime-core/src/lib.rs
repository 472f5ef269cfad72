//! Core runtime for **chime**.
//!
//! `chime-core` is a small [Elm Architecture] runtime for ratatui: programs
//! are an **init -> update -> view** cycle, with side effects returned as
//! [`Command`]s and long-lived event sources declared as [`Subscription`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect executed by the runtime |
//! | [`Subscription`] | Long-lived event source, started and stopped by diffing |
//! | [`host`] | Process-wide event hub; [`listen`] attaches a screen-wide listener |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for tests |
//!
//! # Listener lifetime
//!
//! Subscriptions are re-declared after every update. Returning a [`listen`]
//! subscription only while some state holds (an overlay is open, say) means
//! the listener is attached on entering that state and released on every way
//! out of it, including the owner simply no longer being rendered.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod host;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::{HostEvent, ScrollDirection};
pub use host::listen;
pub use model::Model;
pub use runtime::{init_logging, Program, ProgramError, ProgramOptions};
pub use subscription::{Subscription, SubscriptionId};

/// Run a chime application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
