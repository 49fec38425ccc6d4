//! TerminalSurface: a [`Surface`] drawn with half-block glyphs.
//!
//! Fills land in an in-memory physical pixel plane. [`TerminalSurface::present`]
//! packs each pair of pixel rows into one terminal row and writes only the
//! runs that changed since the previous present. The first present (and any
//! present after [`TerminalSurface::invalidate`]) is a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::ResetColor,
    terminal, QueueableCommand,
};
use log::{debug, trace};

use crate::core::Surface;
use crate::fb::{Cell, FrameBuffer, Rgb};
use crate::renderer::{encode_diff_into, encode_full_into};
use crate::types::{Origin, TERM_PIXELS_PER_ROW};

pub struct TerminalSurface<W: Write = io::Stdout> {
    out: W,
    origin: Origin,
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    frame: FrameBuffer,
    last: Option<FrameBuffer>,
    needs_clear: bool,
    dirty: bool,
    buf: Vec<u8>,
}

impl TerminalSurface<io::Stdout> {
    pub fn new(origin: Origin) -> Self {
        Self::with_writer(io::stdout(), origin)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_writer(out: W, origin: Origin) -> Self {
        Self {
            out,
            origin,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            frame: FrameBuffer::new(0, 0),
            last: None,
            needs_clear: false,
            dirty: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch the terminal into raw mode on the alternate screen, with mouse
    /// capture so clicks reach the input translator.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        self.invalidate();
        debug!("terminal surface entered at {:?}", self.origin);
        Ok(())
    }

    /// Restore the terminal state changed by [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        debug!("terminal surface exited");
        Ok(())
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Move the surface; the next present clears the screen and redraws.
    pub fn set_origin(&mut self, origin: Origin) {
        if origin != self.origin {
            self.origin = origin;
            self.invalidate();
            self.needs_clear = true;
        }
    }

    /// Force the next present to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
        self.dirty = true;
    }

    /// Physical size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Terminal columns and rows the surface occupies.
    pub fn term_size(&self) -> (u16, u16) {
        term_dims(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y as usize) * (self.width as usize) + (x as usize)])
    }

    /// The frame composed by the most recent present.
    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.last.as_ref()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Write pending changes to the terminal.
    pub fn present(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.compose();

        self.buf.clear();
        if self.needs_clear {
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        match self.last.take() {
            Some(mut prev) if prev.width() == self.frame.width() && prev.height() == self.frame.height() => {
                encode_diff_into(&prev, &self.frame, self.origin, &mut self.buf)?;
                // Swap so the next present diffs without cloning.
                std::mem::swap(&mut prev, &mut self.frame);
                self.last = Some(prev);
            }
            _ => {
                encode_full_into(&self.frame, self.origin, &mut self.buf)?;
                self.last = Some(self.frame.clone());
            }
        }
        trace!("present: {} bytes", self.buf.len());
        if let Err(e) = self.flush_buf() {
            // The terminal may hold any prefix of the frame now.
            self.invalidate();
            return Err(e);
        }
        self.needs_clear = false;
        self.dirty = false;
        Ok(())
    }

    fn compose(&mut self) {
        let (cols, rows) = term_dims(self.width, self.height);
        self.frame.resize(cols, rows);
        let per_row = u32::from(TERM_PIXELS_PER_ROW);
        for row in 0..rows {
            let top = u32::from(row) * per_row;
            for col in 0..cols {
                let x = u32::from(col);
                let upper = self.pixel(x, top).unwrap_or_default();
                let lower = self.pixel(x, top + 1).unwrap_or_default();
                self.frame.set(col, row, Cell::half_block(upper, lower));
            }
        }
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

fn term_dims(width: u32, height: u32) -> (u16, u16) {
    let per_row = u32::from(TERM_PIXELS_PER_ROW);
    let cols = width.min(u32::from(u16::MAX)) as u16;
    let rows = height.div_ceil(per_row).min(u32::from(u16::MAX)) as u16;
    (cols, rows)
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(len, Rgb::default());
        self.invalidate();
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }
        let stride = self.width as usize;
        for py in y..y_end {
            let row = (py as usize) * stride;
            self.pixels[row + x as usize..row + x_end as usize].fill(color);
        }
        self.dirty = true;
    }
}
