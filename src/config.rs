//! Demo configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PIXEL_GRID_WIDTH` | 40 | grid width in cells |
//! | `PIXEL_GRID_HEIGHT` | 20 | grid height in cells |
//! | `PIXEL_GRID_CELL_SIZE` | 2 | physical pixels per cell edge |
//! | `PIXEL_GRID_LOG_PATH` | unset | write logs to this file instead of stderr |
//!
//! Unparsable or zero values fall back to the default and are reported in
//! [`DemoConfig::ignored`] so the caller can log them once logging is up.
//!
//! A terminal row is two pixels tall and a click reports the upper one, so
//! only an even cell size lets clicks reach every grid row. See
//! [`DemoConfig::clicks_reach_every_row`].

use std::env;
use std::path::PathBuf;

use crate::types::TERM_PIXELS_PER_ROW;

pub const DEFAULT_WIDTH: u32 = 40;
pub const DEFAULT_HEIGHT: u32 = 20;
pub const DEFAULT_DEMO_CELL_SIZE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub log_path: Option<PathBuf>,
    /// `(variable, value)` pairs that were rejected.
    pub ignored: Vec<(&'static str, String)>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_DEMO_CELL_SIZE,
            log_path: None,
            ignored: Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        let positive = |key: &'static str, slot: &mut u32, ignored: &mut Vec<(&'static str, String)>| {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u32>() {
                    Ok(v) if v > 0 => *slot = v,
                    _ => ignored.push((key, raw)),
                }
            }
        };
        positive("PIXEL_GRID_WIDTH", &mut config.width, &mut config.ignored);
        positive("PIXEL_GRID_HEIGHT", &mut config.height, &mut config.ignored);
        positive("PIXEL_GRID_CELL_SIZE", &mut config.cell_size, &mut config.ignored);

        config.log_path = lookup("PIXEL_GRID_LOG_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        config
    }

    /// False when some grid rows can never be hit by a terminal click.
    pub fn clicks_reach_every_row(&self) -> bool {
        self.cell_size % u32::from(TERM_PIXELS_PER_ROW) == 0
    }
}
