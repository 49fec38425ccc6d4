//! Shared data types for the pixel grid.
//!
//! Everything in this crate is plain data: colors, sprites and the handful of
//! constants the grid and its backends agree on. Nothing here performs I/O or
//! knows about a particular drawing surface.
//!
//! # Colors
//!
//! [`Rgb`] is a 24-bit color compared only by equality. It parses from the
//! usual hex notations and the CSS basic color keywords:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `#ff8800` | full form |
//! | `ff8800` | full form, no hash |
//! | `#f80` | short form, each digit doubled |
//! | `red`, `Navy` | CSS keyword, any case |
//!
//! # Sprites
//!
//! A [`Sprite`] is a row-major block of `Option<Rgb>` where `None` is the
//! transparent cell. In text and JSON form the transparent cell is spelled
//! [`TRANSPARENT`].
//!
//! # Examples
//!
//! ```
//! use pixel_grid_types::{Rgb, Sprite};
//!
//! let red: Rgb = "#ff0000".parse().unwrap();
//! assert_eq!(red, Rgb::new(255, 0, 0));
//! assert_eq!(red.to_hex(), "#ff0000");
//!
//! let sprite = Sprite::from_hex_rows(&[
//!     &["transparent", "#fff"],
//!     &["#fff", "transparent"],
//! ])
//! .unwrap();
//! assert_eq!(sprite.width(), 2);
//! assert_eq!(sprite.get(1, 0), Some(Rgb::WHITE));
//! assert_eq!(sprite.get(0, 0), None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Physical pixels per grid cell edge when none is given.
pub const DEFAULT_CELL_SIZE: u32 = 4;

/// Color every grid starts with and the color `clear_default` paints.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::BLACK;

/// Textual spelling of a transparent sprite cell.
pub const TRANSPARENT: &str = "transparent";

/// Physical pixel rows packed into one terminal row by the half-block backend.
pub const TERM_PIXELS_PER_ROW: u16 = 2;

/// Terminal cell (column, row) where a surface's top-left corner is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin {
    pub col: u16,
    pub row: u16,
}

impl Origin {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color (`#rrggbb`, `rrggbb`, `#rgb` or `rgb`, any case).
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseColorError::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(bad));
        }

        // All digits are ASCII from here on, so byte slicing is safe.
        match digits.len() {
            6 => Ok(Self::new(
                hex_byte(&digits[0..2]),
                hex_byte(&digits[2..4]),
                hex_byte(&digits[4..6]),
            )),
            3 => {
                let nib = |i: usize| hex_byte(&digits[i..i + 1]) * 0x11;
                Ok(Self::new(nib(0), nib(1), nib(2)))
            }
            n => Err(ParseColorError::InvalidLength(n)),
        }
    }

    /// Look up a CSS basic color keyword (case-insensitive), plus `grey` and
    /// `orange`.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }

    /// Parse a color keyword or any form [`from_hex`](Self::from_hex) accepts.
    pub fn parse(s: &str) -> Result<Self, ParseColorError> {
        if let Some(c) = Self::from_name(s) {
            return Ok(c);
        }
        match Self::from_hex(s) {
            Err(ParseColorError::InvalidDigit(_))
                if !s.starts_with('#') && s.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                Err(ParseColorError::UnknownName(s.to_string()))
            }
            r => r,
        }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const NAMED_COLORS: [(&str, Rgb); 18] = [
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("silver", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
    ("grey", Rgb::new(0x80, 0x80, 0x80)),
    ("white", Rgb::new(0xff, 0xff, 0xff)),
    ("maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("red", Rgb::new(0xff, 0x00, 0x00)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("fuchsia", Rgb::new(0xff, 0x00, 0xff)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("lime", Rgb::new(0x00, 0xff, 0x00)),
    ("olive", Rgb::new(0x80, 0x80, 0x00)),
    ("yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("blue", Rgb::new(0x00, 0x00, 0xff)),
    ("teal", Rgb::new(0x00, 0x80, 0x80)),
    ("aqua", Rgb::new(0x00, 0xff, 0xff)),
    ("orange", Rgb::new(0xff, 0xa5, 0x00)),
];

#[inline]
fn hex_byte(s: &str) -> u8 {
    // Callers only pass one or two validated hex digits.
    u8::from_str_radix(s, 16).unwrap_or(0)
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

/// Why a string is not a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    Empty,
    InvalidDigit(char),
    InvalidLength(usize),
    /// A bare word that is neither hex nor a known keyword.
    UnknownName(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::Empty => write!(f, "empty color string"),
            ParseColorError::InvalidDigit(c) => write!(f, "invalid hex digit {c:?}"),
            ParseColorError::InvalidLength(n) => {
                write!(f, "expected 3 or 6 hex digits, found {n}")
            }
            ParseColorError::UnknownName(name) => write!(f, "unknown color name {name:?}"),
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Parse one sprite cell: a color or [`TRANSPARENT`] (case-insensitive).
pub fn parse_sprite_cell(s: &str) -> Result<Option<Rgb>, ParseColorError> {
    if s.eq_ignore_ascii_case(TRANSPARENT) {
        return Ok(None);
    }
    Rgb::parse(s).map(Some)
}

/// Row-major block of colors where `None` is transparent.
///
/// Rows are not required to be equal length. Blitting walks each row by its
/// own length, so a jagged sprite draws exactly the cells it lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")]
pub struct Sprite {
    rows: Vec<Vec<Option<Rgb>>>,
}

impl Sprite {
    pub fn new(rows: Vec<Vec<Option<Rgb>>>) -> Self {
        Self { rows }
    }

    /// Build a sprite from rows of hex strings, with [`TRANSPARENT`] cells.
    pub fn from_hex_rows<R: AsRef<[S]>, S: AsRef<str>>(rows: &[R]) -> Result<Self, SpriteError> {
        let mut out = Vec::with_capacity(rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            let mut parsed = Vec::with_capacity(cells.len());
            for (col, cell) in cells.iter().enumerate() {
                let color = parse_sprite_cell(cell.as_ref())
                    .map_err(|source| SpriteError { row, col, source })?;
                parsed.push(color);
            }
            out.push(parsed);
        }
        Ok(Self { rows: out })
    }

    /// Nominal width: the length of the first row (0 for an empty sprite).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when every row has the nominal width.
    pub fn is_rectangular(&self) -> bool {
        let w = self.width();
        self.rows.iter().all(|r| r.len() == w)
    }

    pub fn rows(&self) -> &[Vec<Option<Rgb>>] {
        &self.rows
    }

    /// Cell at column `x`, row `y`; `None` when transparent or absent.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.rows.get(y).and_then(|r| r.get(x).copied().flatten())
    }
}

impl TryFrom<Vec<Vec<String>>> for Sprite {
    type Error = SpriteError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Self::from_hex_rows(&rows)
    }
}

impl From<Sprite> for Vec<Vec<String>> {
    fn from(sprite: Sprite) -> Self {
        sprite
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|c| c.map_or_else(|| TRANSPARENT.to_string(), Rgb::to_hex))
                    .collect()
            })
            .collect()
    }
}

/// A sprite cell that did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteError {
    pub row: usize,
    pub col: usize,
    pub source: ParseColorError,
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite cell ({}, {}): {}", self.col, self.row, self.source)
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms_parse() {
        assert_eq!(Rgb::from_hex("#102030"), Ok(Rgb::new(0x10, 0x20, 0x30)));
        assert_eq!(Rgb::from_hex("A0B0C0"), Ok(Rgb::new(0xa0, 0xb0, 0xc0)));
        assert_eq!(Rgb::from_hex("#f80"), Ok(Rgb::new(0xff, 0x88, 0x00)));
        assert_eq!("#FFFFFF".parse::<Rgb>(), Ok(Rgb::WHITE));
    }

    #[test]
    fn hex_errors() {
        assert_eq!(Rgb::from_hex("#"), Err(ParseColorError::Empty));
        assert_eq!(Rgb::from_hex(""), Err(ParseColorError::Empty));
        assert_eq!(Rgb::from_hex("#12345"), Err(ParseColorError::InvalidLength(5)));
        assert_eq!(Rgb::from_hex("#12345g"), Err(ParseColorError::InvalidDigit('g')));
        assert_eq!(Rgb::from_hex("#ééé"), Err(ParseColorError::InvalidDigit('é')));
    }

    #[test]
    fn parses_color_names() {
        assert_eq!("red".parse::<Rgb>(), Ok(Rgb::RED));
        assert_eq!(Rgb::parse("Navy"), Ok(Rgb::new(0, 0, 0x80)));
        assert_eq!(Rgb::parse("green"), Ok(Rgb::new(0, 0x80, 0)));
        assert_eq!(Rgb::from_name("grey"), Rgb::from_name("gray"));
        // Hex wins for words made of hex digits.
        assert_eq!(Rgb::parse("fab"), Ok(Rgb::new(0xff, 0xaa, 0xbb)));
        assert_eq!(Rgb::from_hex("red"), Err(ParseColorError::InvalidDigit('r')));
        assert_eq!(
            Rgb::parse("reddish"),
            Err(ParseColorError::UnknownName("reddish".to_string()))
        );
        assert_eq!(Rgb::parse("#red"), Err(ParseColorError::InvalidDigit('r')));
    }

    #[test]
    fn sprite_cells_accept_names() {
        let s: Sprite = serde_json::from_str(r#"[["red", "transparent"]]"#).unwrap();
        assert_eq!(s.get(0, 0), Some(Rgb::RED));
        assert_eq!(s.get(1, 0), None);
        // Names normalize to hex on the way out.
        assert_eq!(serde_json::to_string(&s).unwrap(), r##"[["#ff0000","transparent"]]"##);
    }

    #[test]
    fn display_matches_to_hex() {
        let c = Rgb::new(1, 171, 255);
        assert_eq!(c.to_string(), "#01abff");
        assert_eq!(c.to_hex(), c.to_string());
    }

    #[test]
    fn default_background_is_black() {
        assert_eq!(DEFAULT_BACKGROUND, Rgb::new(0, 0, 0));
        assert_eq!(DEFAULT_CELL_SIZE, 4);
    }

    #[test]
    fn transparent_is_case_insensitive() {
        assert_eq!(parse_sprite_cell("transparent"), Ok(None));
        assert_eq!(parse_sprite_cell("Transparent"), Ok(None));
        assert_eq!(parse_sprite_cell("#000"), Ok(Some(Rgb::BLACK)));
    }

    #[test]
    fn sprite_reports_bad_cell_position() {
        let err = Sprite::from_hex_rows(&[&["#fff", "#fff"][..], &["#fff", "nope"][..]])
            .unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(err.col, 1);
        assert_eq!(err.source, ParseColorError::UnknownName("nope".to_string()));
    }

    #[test]
    fn jagged_sprite_width_comes_from_first_row() {
        let s = Sprite::new(vec![vec![Some(Rgb::RED)], vec![Some(Rgb::RED), None, None]]);
        assert_eq!(s.width(), 1);
        assert_eq!(s.height(), 2);
        assert!(!s.is_rectangular());
        assert_eq!(s.get(0, 1), Some(Rgb::RED));
        assert_eq!(s.get(2, 1), None);
        assert_eq!(s.get(5, 5), None);
    }

    #[test]
    fn empty_sprite() {
        let s = Sprite::default();
        assert_eq!(s.width(), 0);
        assert_eq!(s.height(), 0);
        assert!(s.is_rectangular());
    }

    #[test]
    fn sprite_json_form() {
        let json = r##"[["#ff0000","transparent"],["transparent","#00f"]]"##;
        let s: Sprite = serde_json::from_str(json).unwrap();
        assert_eq!(s.get(0, 0), Some(Rgb::RED));
        assert_eq!(s.get(1, 0), None);
        assert_eq!(s.get(1, 1), Some(Rgb::BLUE));

        let back = serde_json::to_string(&s).unwrap();
        assert_eq!(back, r##"[["#ff0000","transparent"],["transparent","#0000ff"]]"##);
    }

    #[test]
    fn sprite_json_rejects_bad_color() {
        let json = r#"[["crimsonish"]]"#;
        assert!(serde_json::from_str::<Sprite>(json).is_err());
    }
}
