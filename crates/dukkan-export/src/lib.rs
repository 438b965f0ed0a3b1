//! Export module for Dukkan
//!
//! Turns a laid-out [`dukkan_core::types::Page`] into a PDF and reads the
//! text of such a PDF back.

pub mod extract;
pub mod pdf;

pub use extract::{extract_text, page_count};
pub use pdf::PdfExporter;
