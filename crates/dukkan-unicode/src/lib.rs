// this_file: crates/dukkan-unicode/src/lib.rs

//! Right-to-left text shaping for painters that only know left-to-right.
//!
//! Two passes, always in this order:
//!
//! 1. [`joining::reshape`] swaps Arabic letters for their contextual
//!    presentation forms, fusing lam-alef pairs.
//! 2. [`bidi::visual_order`] runs the Unicode bidirectional algorithm and
//!    emits the characters in visual order.
//!
//! ```
//! use dukkan_unicode::shape;
//!
//! assert_eq!(shape("Hello 42"), "Hello 42");
//! assert!(shape("قميص × 12").contains("12"));
//! ```

use dukkan_core::{traits::TextShaper, types::ShapeOptions};

pub mod bidi;
pub mod joining;

pub use bidi::visual_order;
pub use joining::reshape;

/// Reshapes then reorders `text` with default options
pub fn shape(text: &str) -> String {
    ArabicShaper::default().shape(text)
}

/// The shaper every invoice line goes through
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicShaper {
    options: ShapeOptions,
}

impl ArabicShaper {
    pub fn new(options: ShapeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ShapeOptions {
        &self.options
    }
}

impl TextShaper for ArabicShaper {
    fn name(&self) -> &'static str {
        "arabic-bidi"
    }

    fn shape(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        visual_order(&reshape(text, &self.options))
    }
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
