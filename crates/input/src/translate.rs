//! crossterm event -> hub event translation.

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use log::trace;

use crate::core::{EventHub, PointerPos};
use crate::map::is_key_down;
use crate::types::{Origin, TERM_PIXELS_PER_ROW};

/// Event hub keyed by crossterm key events.
pub type TermHub = EventHub<KeyEvent>;

/// A terminal event the grid cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyEvent),
    Click(PointerPos),
}

/// Maps terminal events onto a surface drawn at `origin`.
///
/// Click positions come out in the surface's physical pixels. One terminal
/// row holds [`TERM_PIXELS_PER_ROW`] pixel rows; a click reports the upper
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputTranslator {
    origin: Origin,
}

impl InputTranslator {
    pub fn new(origin: Origin) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Origin) {
        self.origin = origin;
    }

    pub fn translate(&self, event: &Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if is_key_down(key) => Some(InputEvent::KeyDown(*key)),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(InputEvent::Click(self.pointer_at(*column, *row))),
            _ => None,
        }
    }

    /// Surface-relative physical position of terminal cell `(column, row)`.
    pub fn pointer_at(&self, column: u16, row: u16) -> PointerPos {
        let x = i32::from(column) - i32::from(self.origin.col);
        let y = (i32::from(row) - i32::from(self.origin.row)) * i32::from(TERM_PIXELS_PER_ROW);
        PointerPos::new(x, y)
    }

    /// Translate `event` and deliver it to `hub`. Returns true if delivered.
    pub fn pump(&self, hub: &TermHub, event: &Event) -> bool {
        match self.translate(event) {
            Some(InputEvent::KeyDown(key)) => {
                trace!("key down {:?}", key.code);
                hub.emit_key(&key);
                true
            }
            Some(InputEvent::Click(pos)) => {
                trace!("click at {:?}", pos);
                hub.emit_click(pos);
                true
            }
            None => false,
        }
    }
}
