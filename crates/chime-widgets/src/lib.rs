//! Widgets for the **chime** runtime.
//!
//! The centrepiece is [`time_picker::TimePicker`], a [`chime_core::Component`]
//! that shows the selected time in a bordered trigger and opens a floating
//! list of `HH:MM` options anchored to it.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`time_picker`] | Time-of-day picker with a floating option list |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`time_slots`] | `HH:MM` label generation at a minute interval |
//! | [`placement`] | Viewport-aware anchoring of a panel to a trigger |
//! | [`overlay`] | Sizing and painting panels above the normal layout |
//! | [`selection`] | Active item plus scroll window over a long list |
//! | [`chrome`] | Border styles for triggers and floating panels |

pub mod chrome;
pub mod overlay;
pub mod placement;
pub mod selection;
pub mod time_picker;
pub mod time_slots;

pub use time_picker::{TimePicker, TimePickerStyle};
pub use time_slots::{time_slots, TimeSlots};
