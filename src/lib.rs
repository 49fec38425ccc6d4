//! Pixel grid (workspace facade crate).
//!
//! Re-exports the member crates as `pixel_grid::{core,input,term,types}` and
//! holds the pieces of the paint demo that are worth testing outside a
//! terminal: its configuration and its key/action mapping.

pub mod config;
pub mod paint;

pub use pixel_grid_core as core;
pub use pixel_grid_input as input;
pub use pixel_grid_term as term;
pub use pixel_grid_types as types;
