//! Reads drawn text back out of a PDF through its ToUnicode maps

use std::collections::HashMap;

use lopdf::{content::Content, Document, Object, ObjectId};

use dukkan_core::error::{ExportError, Result};

type GlyphMap = HashMap<u16, String>;

fn parse_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::ParseFailed(err.to_string())
}

/// Every `Tj` string on every page, in drawing order
///
/// Glyphs without a ToUnicode entry come back as U+FFFD.
pub fn extract_text(bytes: &[u8]) -> Result<Vec<String>> {
    let doc = Document::load_mem(bytes).map_err(parse_error)?;
    let mut lines = Vec::new();

    for page_id in doc.get_pages().into_values() {
        let maps = page_glyph_maps(&doc, page_id)?;
        let content = doc.get_page_content(page_id).map_err(parse_error)?;
        let operations = Content::decode(&content).map_err(parse_error)?.operations;

        let mut current: Option<&GlyphMap> = None;
        for operation in &operations {
            match operation.operator.as_str() {
                "Tf" => {
                    current = operation
                        .operands
                        .first()
                        .and_then(|name| name.as_name().ok())
                        .and_then(|name| maps.get(name));
                },
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operation.operands.first() {
                        lines.push(decode_glyphs(bytes, current));
                    }
                },
                _ => {},
            }
        }
    }

    Ok(lines)
}

/// Number of pages in the document
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    let doc = Document::load_mem(bytes).map_err(parse_error)?;
    Ok(doc.get_pages().len())
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Result<&'a Object> {
    match object {
        Object::Reference(id) => Ok(doc.get_object(*id).map_err(parse_error)?),
        other => Ok(other),
    }
}

fn page_glyph_maps(doc: &Document, page_id: ObjectId) -> Result<HashMap<Vec<u8>, GlyphMap>> {
    let page = doc.get_dictionary(page_id).map_err(parse_error)?;
    let resources = resolve(doc, page.get(b"Resources").map_err(parse_error)?)?
        .as_dict()
        .map_err(parse_error)?;

    let mut maps = HashMap::new();
    let Ok(fonts) = resources.get(b"Font") else {
        return Ok(maps);
    };
    let fonts = resolve(doc, fonts)?.as_dict().map_err(parse_error)?;

    for (name, font) in fonts.iter() {
        let font = resolve(doc, font)?.as_dict().map_err(parse_error)?;
        let Ok(to_unicode) = font.get(b"ToUnicode") else {
            continue;
        };
        let stream = resolve(doc, to_unicode)?.as_stream().map_err(parse_error)?;
        let data = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        maps.insert(name.clone(), parse_bfchar(&String::from_utf8_lossy(&data)));
    }

    Ok(maps)
}

/// Reads `<src> <dst>` pairs from every bfchar block
fn parse_bfchar(cmap: &str) -> GlyphMap {
    let mut map = GlyphMap::new();
    let mut in_block = false;

    for line in cmap.lines().map(str::trim) {
        if line.ends_with("beginbfchar") {
            in_block = true;
            continue;
        }
        if line == "endbfchar" {
            in_block = false;
            continue;
        }
        if !in_block {
            continue;
        }

        let tokens: Vec<&str> = line
            .split(['<', '>'])
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();
        if let [source, target] = tokens[..] {
            if let (Ok(gid), Some(text)) = (u16::from_str_radix(source, 16), utf16_hex(target)) {
                map.insert(gid, text);
            }
        }
    }

    map
}

fn utf16_hex(hex: &str) -> Option<String> {
    if hex.len() % 4 != 0 {
        return None;
    }
    let units = (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(&hex[i..i + 4], 16).ok())
        .collect::<Option<Vec<u16>>>()?;
    String::from_utf16(&units).ok()
}

fn decode_glyphs(bytes: &[u8], map: Option<&GlyphMap>) -> String {
    bytes
        .chunks(2)
        .map(|pair| {
            let gid = u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]);
            map.and_then(|map| map.get(&gid))
                .map(String::as_str)
                .unwrap_or("\u{FFFD}")
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bfchar_blocks_are_parsed() {
        let cmap = "begincmap\n2 beginbfchar\n<0003> <0041>\n<02BC> <FEFB>\nendbfchar\nendcmap\n";
        let map = parse_bfchar(cmap);
        assert_eq!(map.get(&3).map(String::as_str), Some("A"));
        assert_eq!(map.get(&0x2BC).map(String::as_str), Some("\u{FEFB}"));
    }

    #[test]
    fn lines_outside_blocks_are_ignored() {
        let map = parse_bfchar("1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n");
        assert!(map.is_empty());
    }

    #[test]
    fn unknown_glyphs_become_replacement_chars() {
        let map: GlyphMap = [(1u16, "x".to_string())].into_iter().collect();
        assert_eq!(decode_glyphs(&[0, 1, 0, 2], Some(&map)), "x\u{FFFD}");
        assert_eq!(decode_glyphs(&[0, 1], None), "\u{FFFD}");
    }

    #[test]
    fn surrogate_pairs_decode() {
        assert_eq!(utf16_hex("D83CDF89").as_deref(), Some("🎉"));
        assert_eq!(utf16_hex("123"), None);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(extract_text(b"not a pdf").is_err());
    }
}
