//! PixelGrid: a logical color grid mirrored onto a scaled surface.
//!
//! Every drawing operation reduces to [`PixelGrid::set_pixel`], the single
//! bounds check in the crate. A write updates the buffer and immediately
//! issues one `cell_size x cell_size` fill to the surface.

use std::fmt;

use log::{debug, trace};

use crate::events::{EventSource, ListenerId, NoEvents, PointerPos};
use crate::raster::{circle_points, clamp_i32, LinePoints};
use crate::surface::Surface;
use crate::types::{Rgb, Sprite, DEFAULT_BACKGROUND, DEFAULT_CELL_SIZE};

/// Rejected construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width, height and cell size must all be non-zero.
    ZeroDimension {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    /// The grid or its physical surface size does not fit the coordinate types.
    TooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroDimension {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "grid dimensions must be non-zero (got {width}x{height}, cell size {cell_size})"
            ),
            GridError::TooLarge {
                width,
                height,
                cell_size,
            } => write!(
                f,
                "grid {width}x{height} with cell size {cell_size} is too large"
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// Map a surface-relative pointer position to the grid cell under it.
///
/// Rounds toward negative infinity, so a click just left of or above the
/// surface lands in cell -1. No bounds check is applied.
pub fn grid_cell_at(pos: PointerPos, cell_size: u32) -> (i32, i32) {
    let cell = i64::from(cell_size.max(1));
    let gx = i64::from(pos.x).div_euclid(cell);
    let gy = i64::from(pos.y).div_euclid(cell);
    // |result| <= |input|, so the narrowing never truncates.
    (gx as i32, gy as i32)
}

/// A `width x height` grid of colors bound to a drawing surface.
pub struct PixelGrid<S, E = NoEvents> {
    surface: S,
    events: E,
    width: u32,
    height: u32,
    cell_size: u32,
    buffer: Vec<Rgb>,
}

impl<S: Surface> PixelGrid<S> {
    /// Grid with the default cell size and no input.
    pub fn new(surface: S, width: u32, height: u32) -> Result<Self, GridError> {
        Self::with_cell_size(surface, width, height, DEFAULT_CELL_SIZE)
    }

    pub fn with_cell_size(
        surface: S,
        width: u32,
        height: u32,
        cell_size: u32,
    ) -> Result<Self, GridError> {
        PixelGrid::with_events(surface, width, height, cell_size, NoEvents)
    }
}

impl<S: Surface, E> PixelGrid<S, E> {
    /// Bind a surface and an event source.
    ///
    /// Resizes the surface to `width*cell_size` by `height*cell_size` and
    /// clears it to the default background.
    pub fn with_events(
        mut surface: S,
        width: u32,
        height: u32,
        cell_size: u32,
        events: E,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 || cell_size == 0 {
            return Err(GridError::ZeroDimension {
                width,
                height,
                cell_size,
            });
        }

        let too_large = GridError::TooLarge {
            width,
            height,
            cell_size,
        };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large);
        }
        let (Some(phys_w), Some(phys_h)) =
            (width.checked_mul(cell_size), height.checked_mul(cell_size))
        else {
            return Err(too_large);
        };
        let Some(len) = (width as usize).checked_mul(height as usize) else {
            return Err(too_large);
        };

        surface.resize(phys_w, phys_h);
        debug!(
            "pixel grid {}x{} cell={} surface={}x{}",
            width, height, cell_size, phys_w, phys_h
        );

        let mut grid = Self {
            surface,
            events,
            width,
            height,
            cell_size,
            buffer: vec![DEFAULT_BACKGROUND; len],
        };
        grid.clear_default();
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Row-major view of the buffer (`index = y * width + x`).
    pub fn pixels(&self) -> &[Rgb] {
        &self.buffer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to flush a buffered backend.
    ///
    /// Fills issued directly through this are not reflected in the grid.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Paint every cell and the whole surface with `color`.
    pub fn clear(&mut self, color: Rgb) {
        trace!("clear {}", color);
        self.buffer.fill(color);
        self.surface.fill_rect(
            0,
            0,
            self.width * self.cell_size,
            self.height * self.cell_size,
            color,
        );
    }

    pub fn clear_default(&mut self) {
        self.clear(DEFAULT_BACKGROUND);
    }

    /// Write one cell. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        let Some(i) = self.idx(x, y) else {
            return;
        };
        self.buffer[i] = color;
        let cs = self.cell_size;
        // In range, and construction checked width * cell_size fits.
        self.surface
            .fill_rect(x as u32 * cs, y as u32 * cs, cs, cs, color);
    }

    /// Color at `(x, y)`, or `None` outside the grid.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.idx(x, y).map(|i| self.buffer[i])
    }

    /// Fill the `w x h` block whose top-left is `(x, y)`.
    ///
    /// Non-positive `w` or `h` draws nothing. Cells off the grid are skipped.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        if w <= 0 || h <= 0 {
            return;
        }
        // Only the part that intersects the grid can produce writes.
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px as i32, py as i32, color);
            }
        }
    }

    /// Bresenham line between two cells, both endpoints included.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb) {
        for (x, y) in LinePoints::new(x1, y1, x2, y2) {
            self.set_pixel(x, y, color);
        }
    }

    /// Midpoint circle outline centred on `(x0, y0)`.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32, color: Rgb) {
        for (x, y) in circle_points(x0, y0, radius) {
            self.set_pixel(x, y, color);
        }
    }

    /// Blit a sprite with its top-left at `(x, y)`; transparent cells are skipped.
    pub fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite) {
        for (dy, row) in sprite.rows().iter().enumerate() {
            let py = clamp_i32(i64::from(y) + dy as i64);
            for (dx, cell) in row.iter().enumerate() {
                if let Some(color) = *cell {
                    let px = clamp_i32(i64::from(x) + dx as i64);
                    self.set_pixel(px, py, color);
                }
            }
        }
    }
}

impl<S, E: EventSource> PixelGrid<S, E> {
    pub fn events(&self) -> &E {
        &self.events
    }

    /// Forward every key-down event from the bound source to `callback`.
    pub fn on_key_down<F>(&self, callback: F) -> ListenerId
    where
        F: FnMut(&E::Key) + 'static,
    {
        self.events.add_key_listener(Box::new(callback))
    }

    /// Call `callback(gx, gy)` with the grid cell under each click.
    ///
    /// The cell is not bounds checked: clicks on padding around the surface
    /// report coordinates outside the grid.
    pub fn on_mouse_click<F>(&self, mut callback: F) -> ListenerId
    where
        F: FnMut(i32, i32) + 'static,
    {
        let cell_size = self.cell_size;
        self.events.add_click_listener(Box::new(move |pos| {
            let (gx, gy) = grid_cell_at(pos, cell_size);
            callback(gx, gy);
        }))
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.events.remove_listener(id)
    }
}

impl<S, E> fmt::Debug for PixelGrid<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .finish_non_exhaustive()
    }
}
