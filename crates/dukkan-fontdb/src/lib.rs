//! Fonts for the invoice: loading, metrics and coverage
//!
//! A font is useless to the renderer unless it can draw the presentation
//! forms the shaper produces. [`ensure_rtl_coverage`] checks that up front so
//! a bad font stops generation before a single line is drawn.
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create a parser view on demand. The same
//! bytes are later embedded into the PDF as-is.

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{string::StringId, MetadataProvider};

use dukkan_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::{FontMetrics, GlyphId},
};

pub mod discovery;

pub use discovery::{discover_rtl_font, resolve_font};

/// Characters a font must map before it is trusted with an invoice:
/// the base letters plus the presentation forms the shaper emits most.
pub const RTL_PROBE: &[char] = &[
    '\u{0627}', // alef
    '\u{0644}', // lam
    '\u{0645}', // meem
    '\u{FE8D}', // alef isolated
    '\u{FE8E}', // alef final
    '\u{FEDF}', // lam initial
    '\u{FEE3}', // meem initial
    '\u{FEFB}', // lam-alef isolated
];

/// A font brought into memory, ready to measure and embed
pub struct Font {
    data: Vec<u8>,
    units_per_em: u16,
    name: String,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;

        let font = Self::from_data(data)?;
        log::debug!(
            "Loaded font {} from {} ({} glyphs)",
            font.name,
            path.display(),
            font.glyph_count().unwrap_or(0)
        );
        Ok(font)
    }

    /// Turns raw font bytes into something we can work with
    ///
    /// The bytes become the PDF's `FontFile2` stream unchanged, so a
    /// `.ttc`/`.otc` collection is refused with [`FontLoadError::Collection`].
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        if is_collection(&data) {
            return Err(FontLoadError::Collection.into());
        }
        let font_ref = ReadFontRef::new(&data).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let name = skrifa::FontRef::new(&data)
            .ok()
            .and_then(|font| {
                font.localized_strings(StringId::POSTSCRIPT_NAME)
                    .english_or_first()
                    .map(|name| name.to_string())
            })
            .map(|name| sanitize_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "DukkanFont".to_string());

        Ok(Font {
            data,
            units_per_em,
            name,
        })
    }

    /// PostScript name, stripped to characters PDF names accept
    pub fn name(&self) -> &str {
        &self.name
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::new(&self.data).ok()
    }

    fn to_milli_em(&self, units: f32) -> f32 {
        units / self.units_per_em as f32 * 1000.0
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Advance of a glyph in thousandths of an em
    pub fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;

                use read_fonts::types::GlyphId as ReadGlyphId;
                let advance = hmtx.advance(ReadGlyphId::new(glyph_id))?;
                Some(self.to_milli_em(advance as f32))
            })
            .unwrap_or(500.0)
    }

    /// Counts how many different glyphs this font contains
    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }

    /// Name, bounding box and vertical metrics scaled to 1000 units/em
    pub fn metrics(&self) -> FontMetrics {
        let mut metrics = FontMetrics {
            postscript_name: self.name.clone(),
            ..FontMetrics::default()
        };
        let Some(font) = self.font_ref() else {
            return metrics;
        };

        if let Ok(head) = font.head() {
            metrics.bbox = [
                self.to_milli_em(head.x_min() as f32),
                self.to_milli_em(head.y_min() as f32),
                self.to_milli_em(head.x_max() as f32),
                self.to_milli_em(head.y_max() as f32),
            ];
        }
        if let Ok(hhea) = font.hhea() {
            metrics.ascent = self.to_milli_em(hhea.ascender().to_i16() as f32);
            metrics.descent = self.to_milli_em(hhea.descender().to_i16() as f32);
            metrics.cap_height = metrics.ascent;
        }
        if let Some(cap_height) = font.os2().ok().and_then(|os2| os2.s_cap_height()) {
            metrics.cap_height = self.to_milli_em(cap_height as f32);
        }
        metrics
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        self.advance_width(glyph_id)
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics()
    }
}

/// True when the bytes start with the `ttcf` collection header
pub fn is_collection(data: &[u8]) -> bool {
    data.starts_with(b"ttcf")
}

/// Fails with [`FontLoadError::MissingGlyphs`] unless `font` covers [`RTL_PROBE`]
pub fn ensure_rtl_coverage(font: &dyn FontRef) -> Result<()> {
    let missing = font.missing_chars(RTL_PROBE);
    if missing.is_empty() {
        return Ok(());
    }
    let name = font.metrics().postscript_name;
    log::error!("Font {} lacks {} right-to-left glyphs", name, missing.len());
    Err(FontLoadError::MissingGlyphs {
        font: name,
        missing,
    }
    .into())
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '+'))
        .collect()
}
