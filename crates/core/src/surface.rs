//! Drawing surfaces the grid mirrors into.
//!
//! A surface only needs two primitives: a settable physical size and a solid
//! rectangle fill. Coordinates are physical pixels, origin at the top-left.

use crate::types::Rgb;

/// A 2D drawable the grid issues fill commands to.
pub trait Surface {
    /// Set the physical size in pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Fill a solid rectangle. Implementations clip to their own bounds.
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        (**self).fill_rect(x, y, w, h, color);
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height);
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        (**self).fill_rect(x, y, w, h, color);
    }
}

/// In-memory physical pixel plane.
///
/// Useful headless and in tests: it keeps every physical pixel and counts the
/// fill commands it received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    fill_calls: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Number of `fill_rect` calls since creation or the last reset.
    pub fn fill_calls(&self) -> usize {
        self.fill_calls
    }

    pub fn reset_fill_calls(&mut self) {
        self.fill_calls = 0;
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }
}

impl Surface for MemorySurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(len, Rgb::default());
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        self.fill_calls += 1;
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        let stride = self.width as usize;
        for py in y..y_end {
            let row = (py as usize) * stride;
            if x < x_end {
                self.pixels[row + x as usize..row + x_end as usize].fill(color);
            }
        }
    }
}
