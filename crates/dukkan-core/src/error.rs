//! Error types for Dukkan

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DukkanError>;

/// Main error type for Dukkan
#[derive(Debug, Error)]
pub enum DukkanError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font collections cannot be embedded, pick a single-face font file")]
    Collection,

    #[error("Font {font} cannot draw right-to-left text, missing glyphs for {}", format_missing(.missing))]
    MissingGlyphs { font: String, missing: Vec<char> },

    #[error("System font not found: {0}")]
    SystemFontNotFound(String),
}

/// Order and customer validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Quantity must be at least 1 for {0}")]
    ZeroQuantity(String),

    #[error("Price must be a finite, non-negative amount for {0}")]
    InvalidPrice(String),

    #[error("No product at catalog index {0}")]
    UnknownProduct(usize),

    #[error("Invalid item spec {0:?}, expected <INDEX>:<QTY>")]
    InvalidItemSpec(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Parse failed: {0}")]
    ParseFailed(String),
}

fn format_missing(missing: &[char]) -> String {
    missing
        .iter()
        .map(|ch| format!("U+{:04X}", *ch as u32))
        .collect::<Vec<_>>()
        .join(", ")
}
