//! Single-page PDF output with an embedded TrueType font
//!
//! Text is drawn as glyph ids through a Type0 font with Identity-H encoding,
//! so any glyph the font has can be placed without a code page. A ToUnicode
//! CMap maps each used glyph back to the character it was drawn for, which
//! keeps the document searchable and lets [`crate::extract_text`] read it.

use std::collections::BTreeMap;
use std::io::Write;

use flate2::{write::ZlibEncoder, Compression};
use lopdf::{
    content::{Content, Operation},
    dictionary, Document, Object, ObjectId, Stream, StringFormat,
};

use dukkan_core::{
    error::{ExportError, Result},
    traits::{Exporter, FontRef},
    types::{GlyphId, Page, TextLine},
};

/// Resource name the page uses for its only font
pub const FONT_RESOURCE: &str = "F1";

const PRODUCER: &str = concat!("dukkan ", env!("CARGO_PKG_VERSION"));

/// Writes a [`Page`] as a one-page PDF document
#[derive(Debug, Clone, Copy)]
pub struct PdfExporter {
    compression: Compression,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self {
            compression: Compression::default(),
        }
    }

    /// Zlib level used for the embedded font program
    pub fn with_compression(level: u32) -> Self {
        Self {
            compression: Compression::new(level.min(9)),
        }
    }

    fn embed_font(
        &self,
        doc: &mut Document,
        font: &dyn FontRef,
        used: &BTreeMap<GlyphId, char>,
    ) -> Result<ObjectId> {
        let metrics = font.metrics();
        let base_font = metrics.postscript_name.as_str();

        let program = deflate(font.data(), self.compression)?;
        let font_file_id = doc.add_object(Stream::new(
            dictionary! {
                "Length1" => Object::Integer(font.data().len() as i64),
                "Filter" => "FlateDecode",
            },
            program,
        ));

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => base_font,
            "Flags" => Object::Integer(4),
            "FontBBox" => metrics.bbox.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
            "ItalicAngle" => Object::Integer(0),
            "Ascent" => Object::Real(metrics.ascent),
            "Descent" => Object::Real(metrics.descent),
            "CapHeight" => Object::Real(metrics.cap_height),
            "StemV" => Object::Integer(80),
            "FontFile2" => font_file_id,
        });

        let widths: Vec<Object> = used
            .keys()
            .flat_map(|gid| {
                [
                    Object::Integer(i64::from(*gid)),
                    Object::Array(vec![Object::Real(font.advance_width(*gid))]),
                ]
            })
            .collect();

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => base_font,
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => Object::Integer(0),
            },
            "FontDescriptor" => descriptor_id,
            "DW" => Object::Integer(1000),
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode_cmap(used)));

        Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => base_font,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        }))
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for PdfExporter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn export(&self, page: &Page, font: &dyn FontRef) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let used = used_glyphs(page);
        let font_id = self.embed_font(&mut doc, font, &used)?;

        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width),
                Object::Real(page.height),
            ],
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_RESOURCE => font_id },
            },
            "Contents" => content_id,
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => Object::Integer(1),
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&page.title),
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;
        log::debug!(
            "Encoded PDF page: {} lines, {} glyphs, {} bytes",
            page.lines.len(),
            used.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }
}

/// Every glyph the page draws, with the first character it stood for
fn used_glyphs(page: &Page) -> BTreeMap<GlyphId, char> {
    let mut used = BTreeMap::new();
    for line in &page.lines {
        for (gid, ch) in line.glyphs.iter().zip(line.text.chars()) {
            used.entry(*gid).or_insert(ch);
        }
    }
    used
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.extend(line_operations(line));
    }
    operations
}

fn line_operations(line: &TextLine) -> [Operation; 5] {
    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                Object::Real(line.size),
            ],
        ),
        Operation::new("Td", vec![Object::Real(line.x), Object::Real(line.y)]),
        Operation::new("Tj", vec![glyph_string(&line.glyphs)]),
        Operation::new("ET", vec![]),
    ]
}

/// Two bytes per glyph, as Identity-H expects
fn glyph_string(glyphs: &[GlyphId]) -> Object {
    let bytes = glyphs
        .iter()
        .flat_map(|gid| u16::try_from(*gid).unwrap_or(0).to_be_bytes())
        .collect();
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// UTF-16BE with BOM, the PDF encoding for text strings outside Latin-1
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend(unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn to_unicode_cmap(used: &BTreeMap<GlyphId, char>) -> Vec<u8> {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(u16, char)> = used
        .iter()
        .filter_map(|(gid, ch)| u16::try_from(*gid).ok().map(|gid| (gid, *ch)))
        .collect();

    // bfchar blocks hold at most 100 entries
    for block in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{:04X}", unit))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, hex));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap.into_bytes()
}

fn deflate(data: &[u8], level: Compression) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level);
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
