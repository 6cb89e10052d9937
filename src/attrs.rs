//! Visual attribute records and the merge fold
//!
//! `TextAttributes` is a paired style record with nullable fields; merging is
//! a pure fold where a later record's defined fields override earlier ones.

use crate::scheme::ColorScheme;

/// Opaque style identifier resolved against a color scheme.
/// Dotted names follow capture-name conventions ("keyword", "punctuation.delimiter").
pub type StyleKey = &'static str;

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        // Byte-indexed slicing below requires ASCII input; multi-byte
        // chars would split on a non-boundary and panic
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        match s.len() {
            6 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: 255,
            }),
            8 => Ok(Color {
                r: u8::from_str_radix(&s[0..2], 16).map_err(|e| e.to_string())?,
                g: u8::from_str_radix(&s[2..4], 16).map_err(|e| e.to_string())?,
                b: u8::from_str_radix(&s[4..6], 16).map_err(|e| e.to_string())?,
                a: u8::from_str_radix(&s[6..8], 16).map_err(|e| e.to_string())?,
            }),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Visual attribute record with nullable fields.
///
/// `None` means "no opinion from this record"; the default value is the
/// fully unstyled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAttributes {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl TextAttributes {
    /// Merge `over` onto `self`: fields defined in `over` win,
    /// undefined fields keep `self`'s value.
    pub fn merge(self, over: &TextAttributes) -> TextAttributes {
        TextAttributes {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            bold: over.bold.or(self.bold),
            italic: over.italic.or(self.italic),
            underline: over.underline.or(self.underline),
        }
    }

    pub fn is_unstyled(&self) -> bool {
        *self == TextAttributes::default()
    }
}

/// Fold a key list into one attribute record.
///
/// Each key is resolved against the scheme (unresolved keys contribute
/// nothing) and merged in order, so later keys' defined fields override
/// earlier ones. An empty key list yields the default (unstyled) record.
pub fn merge_keys(scheme: &ColorScheme, keys: &[StyleKey]) -> TextAttributes {
    let mut attrs = TextAttributes::default();
    for key in keys {
        if let Some(over) = scheme.attributes_for(key) {
            attrs = attrs.merge(over);
        }
    }
    attrs
}
