//! Terminal backend for the pixel grid.
//!
//! A [`TerminalSurface`] implements [`core::Surface`] by keeping a physical
//! pixel plane and flushing it through crossterm as half-block glyphs, two
//! pixel rows per terminal row. Rendering is split into a pure part
//! ([`fb`], [`renderer`]) that builds frames and command bytes, and the surface
//! that owns the writer.
//!
//! Fills are buffered until [`TerminalSurface::present`]; after a present the
//! terminal shows exactly what an unbuffered surface would.

pub mod fb;
pub mod renderer;
pub mod surface;

pub use pixel_grid_core as core;
pub use pixel_grid_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into};
pub use surface::TerminalSurface;
