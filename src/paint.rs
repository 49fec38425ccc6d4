//! Paint demo: key mapping and the actions it drives on a grid.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | ← → ↑ ↓ or H J K L | Move the brush cursor |
//! | Space | Plot at the cursor |
//! | Left click | Plot at the clicked cell |
//! | N | Next palette color |
//! | A | Set line anchor at the cursor |
//! | L (shift) / Enter | Line from anchor to cursor |
//! | O | Circle of radius 4 around the cursor |
//! | R | 4x3 rectangle at the cursor |
//! | S | Stamp the sprite at the cursor |
//! | C | Clear to the background |
//! | Q / Esc / Ctrl+C | Quit |

use crossterm::event::{KeyCode, KeyEvent};

use crate::core::{PixelGrid, Surface};
use crate::types::{Rgb, Sprite, DEFAULT_BACKGROUND};

/// Sprite stamped by `S`, in the nested-array JSON form.
pub const STAMP_JSON: &str = r##"[
  ["transparent", "#ffcc00", "#ffcc00", "transparent"],
  ["#ffcc00", "#000000", "#000000", "#ffcc00"],
  ["#ffcc00", "#ffcc00", "#ffcc00", "#ffcc00"],
  ["#ffcc00", "transparent", "transparent", "#ffcc00"]
]"##;

pub const CIRCLE_RADIUS: i32 = 4;

const PALETTE: [Rgb; 6] = [
    Rgb::WHITE,
    Rgb::RED,
    Rgb::GREEN,
    Rgb::BLUE,
    Rgb::new(255, 204, 0),
    Rgb::new(200, 0, 200),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintAction {
    Move { dx: i32, dy: i32 },
    Plot,
    PaintAt { x: i32, y: i32 },
    NextColor,
    SetAnchor,
    LineToCursor,
    Circle,
    Rect,
    Stamp,
    Clear,
}

/// Map keyboard input to paint actions.
pub fn handle_key_event(key: &KeyEvent) -> Option<PaintAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(PaintAction::Move { dx: -1, dy: 0 }),
        KeyCode::Right | KeyCode::Char('l') => Some(PaintAction::Move { dx: 1, dy: 0 }),
        KeyCode::Up | KeyCode::Char('k') => Some(PaintAction::Move { dx: 0, dy: -1 }),
        KeyCode::Down | KeyCode::Char('j') => Some(PaintAction::Move { dx: 0, dy: 1 }),

        KeyCode::Char(' ') => Some(PaintAction::Plot),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(PaintAction::NextColor),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(PaintAction::SetAnchor),
        KeyCode::Enter | KeyCode::Char('L') => Some(PaintAction::LineToCursor),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(PaintAction::Circle),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PaintAction::Rect),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(PaintAction::Stamp),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(PaintAction::Clear),

        _ => None,
    }
}

/// Brush state for the paint demo.
#[derive(Debug, Clone)]
pub struct Painter {
    cursor: (i32, i32),
    anchor: (i32, i32),
    color_index: usize,
    stamp: Sprite,
}

impl Painter {
    pub fn new(stamp: Sprite) -> Self {
        Self {
            cursor: (0, 0),
            anchor: (0, 0),
            color_index: 0,
            stamp,
        }
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn color(&self) -> Rgb {
        PALETTE[self.color_index % PALETTE.len()]
    }

    pub fn apply<S: Surface, E>(&mut self, grid: &mut PixelGrid<S, E>, action: PaintAction) {
        let color = self.color();
        let (cx, cy) = self.cursor;
        match action {
            PaintAction::Move { dx, dy } => {
                let max_x = grid.width() as i32 - 1;
                let max_y = grid.height() as i32 - 1;
                self.cursor = ((cx + dx).clamp(0, max_x), (cy + dy).clamp(0, max_y));
            }
            PaintAction::Plot => grid.set_pixel(cx, cy, color),
            PaintAction::PaintAt { x, y } => {
                // Clicks on the border land off-grid; set_pixel drops them.
                grid.set_pixel(x, y, color);
                if grid.get_pixel(x, y).is_some() {
                    self.cursor = (x, y);
                }
            }
            PaintAction::NextColor => self.color_index = (self.color_index + 1) % PALETTE.len(),
            PaintAction::SetAnchor => self.anchor = self.cursor,
            PaintAction::LineToCursor => {
                let (ax, ay) = self.anchor;
                grid.draw_line(ax, ay, cx, cy, color);
                self.anchor = self.cursor;
            }
            PaintAction::Circle => grid.draw_circle(cx, cy, CIRCLE_RADIUS, color),
            PaintAction::Rect => grid.draw_rect(cx, cy, 4, 3, color),
            PaintAction::Stamp => grid.draw_sprite(cx, cy, &self.stamp),
            PaintAction::Clear => grid.clear(DEFAULT_BACKGROUND),
        }
    }
}
