//! Colors and the document color table.
//!
//! RTF does not embed color values inline; cells and borders reference
//! entries of a document-wide color table by 1-based index (index 0 is the
//! reserved "auto" slot). Colors are registered while the content model is
//! imported, and the table is emitted once in the document header.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use once_cell::sync::Lazy;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Named colors accepted by [`Color::parse`].
static NAMED_COLORS: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("black", Color::BLACK),
        ("white", Color::WHITE),
        ("red", Color::rgb(255, 0, 0)),
        ("green", Color::rgb(0, 128, 0)),
        ("blue", Color::rgb(0, 0, 255)),
        ("yellow", Color::rgb(255, 255, 0)),
        ("gray", Color::rgb(128, 128, 128)),
        ("silver", Color::rgb(192, 192, 192)),
    ])
});

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from RGB components.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse a color from `#rgb`, `#rrggbb` or a small named palette.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] for empty input, malformed hex digits or
    /// unknown names.
    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex)
                .ok_or_else(|| ColorParseError::InvalidHex(value.to_string()));
        }
        NAMED_COLORS
            .get(value.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ColorParseError::UnknownColor(value.to_string()))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            3 => {
                let mut digits = hex.chars().map(|c| c.to_digit(16));
                let r = digits.next()??;
                let g = digits.next()??;
                let b = digits.next()??;
                Some(Self::rgb((r * 17) as u8, (g * 17) as u8, (b * 17) as u8))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// The document color table.
///
/// Entries are deduplicated; indices are 1-based because RTF reserves the
/// first (empty) color-table slot for "auto".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<Color>,
}

impl ColorTable {
    /// Create an empty color table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a color, returning its 1-based table index.
    ///
    /// Registering an already-present color returns the existing index.
    pub fn register(&mut self, color: Color) -> usize {
        if let Some(pos) = self.entries.iter().position(|c| *c == color) {
            return pos + 1;
        }
        self.entries.push(color);
        self.entries.len()
    }

    /// Look up the 1-based index of a registered color.
    #[must_use]
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.entries.iter().position(|c| *c == color).map(|p| p + 1)
    }

    /// Number of registered colors (excluding the auto slot).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all registered colors. Called when the writer resets.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Emit the `\colortbl` group.
    ///
    /// The leading bare `;` is the auto slot every reference index skips.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    pub fn write<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(b"{\\colortbl;")?;
        for color in &self.entries {
            write!(out, "\\red{}\\green{}\\blue{};", color.red, color.green, color.blue)?;
        }
        out.write_all(b"}")
    }
}
