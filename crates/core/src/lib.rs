//! Pixel grid core - pure, synchronous and testable
//!
//! This crate holds the grid itself and the two seams it talks through. It has
//! **no** I/O and no dependency on a terminal or windowing backend.
//!
//! # Module Structure
//!
//! - [`grid`]: [`PixelGrid`], the logical buffer and its drawing operations
//! - [`raster`]: Bresenham line and midpoint circle point walks
//! - [`surface`]: the [`Surface`] trait and the in-memory [`MemorySurface`]
//! - [`events`]: the [`EventSource`] trait and the shared [`EventHub`]
//!
//! # Example
//!
//! ```
//! use pixel_grid_core::{MemorySurface, PixelGrid};
//! use pixel_grid_types::Rgb;
//!
//! let mut grid = PixelGrid::with_cell_size(MemorySurface::new(), 16, 16, 2).unwrap();
//! grid.draw_line(0, 0, 15, 15, Rgb::WHITE);
//! grid.draw_circle(8, 8, 5, Rgb::RED);
//!
//! assert_eq!(grid.get_pixel(3, 3), Some(Rgb::WHITE));
//! assert_eq!(grid.get_pixel(16, 0), None);
//! // The surface holds the same picture scaled by the cell size.
//! assert_eq!(grid.surface().get(7, 7), Some(Rgb::WHITE));
//! ```

pub mod events;
pub mod grid;
pub mod raster;
pub mod surface;

pub use pixel_grid_types as types;

pub use events::{ClickListener, EventHub, EventSource, KeyListener, ListenerId, NoEvents, PointerPos};
pub use grid::{grid_cell_at, GridError, PixelGrid};
pub use raster::{circle_points, CirclePoints, LinePoints};
pub use surface::{MemorySurface, Surface};
