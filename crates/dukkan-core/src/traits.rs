//! The contracts between pipeline stages
//!
//! - [`FontRef`] - Font data and metrics
//! - [`TextShaper`] - Logical text in, drawable visual-order text out
//! - [`Exporter`] - Laid-out pages in, document bytes out

use crate::{error::Result, types::*};

/// Your window into font data
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Advance of a glyph in thousandths of an em
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Name and vertical metrics used when embedding the font
    fn metrics(&self) -> FontMetrics {
        FontMetrics::default()
    }

    /// Characters from `chars` this font has no glyph for
    fn missing_chars(&self, chars: &[char]) -> Vec<char> {
        chars
            .iter()
            .copied()
            .filter(|ch| self.glyph_id(*ch).map_or(true, |gid| gid == 0))
            .collect()
    }
}

/// Turns logical-order text into what a left-to-right glyph painter must draw
///
/// Shaping never fails: characters it does not understand pass through.
pub trait TextShaper: Send + Sync {
    /// Identify yourself in logs
    fn name(&self) -> &'static str;

    /// Reshape and reorder one string
    fn shape(&self, text: &str) -> String;
}

/// The final step: pages become files
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the page, embedding `font`, as document bytes
    fn export(&self, page: &Page, font: &dyn FontRef) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
