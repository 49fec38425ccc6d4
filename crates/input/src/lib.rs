//! Terminal input for the pixel grid.
//!
//! Translates `crossterm` events into the two things an
//! [`EventHub`](crate::core::EventHub) delivers: key-down events, forwarded
//! unfiltered, and left-button clicks as pointer positions relative to the
//! surface. The hub, not this crate, owns the listeners.

pub mod map;
pub mod translate;

pub use pixel_grid_core as core;
pub use pixel_grid_types as types;

pub use map::{is_key_down, should_quit};
pub use translate::{InputEvent, InputTranslator, TermHub};
