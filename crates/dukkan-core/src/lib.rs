//! Dukkan Core: from cart to printed invoice
//!
//! This crate holds the data every other Dukkan crate passes around and the
//! traits that let each stage be swapped without touching the rest.
//!
//! ## The Pipeline
//!
//! 1. **Cart** - Products and quantities accumulate into a [`cart::Cart`]
//! 2. **Totals** - A [`order::DiscountPolicy`] turns the subtotal into [`order::OrderTotals`]
//! 3. **Shaping** - Every string is reshaped and reordered by a [`TextShaper`]
//! 4. **Layout** - Shaped lines are measured with a [`traits::FontRef`] and placed on a [`types::Page`]
//! 5. **Export** - An [`Exporter`] writes the page as a document file
//!
//! ```rust
//! use dukkan_core::{cart::Cart, order::{CartLine, DiscountPolicy}};
//!
//! let mut cart = Cart::new();
//! cart.add_line(CartLine::new("A", 300.0, 1))?;
//! cart.add_line(CartLine::new("B", 250.0, 1))?;
//!
//! let totals = cart.totals(&DiscountPolicy::default());
//! assert_eq!(totals.discount, 55.0);
//! assert_eq!(totals.payable, 495.0);
//! # Ok::<(), dukkan_core::DukkanError>(())
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod order;
pub mod traits;

pub use config::StoreConfig;
pub use error::{DukkanError, Result};
pub use traits::{Exporter, FontRef, TextShaper};

/// The data structures passed between stages
pub mod types {
    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// ISO A4 in PDF points
    pub const A4_WIDTH: f32 = 595.0;
    pub const A4_HEIGHT: f32 = 842.0;

    /// Which point of a line its anchor x coordinate names
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Align {
        Left,
        Center,
        Right,
    }

    /// A shaped line with glyphs resolved and its baseline origin fixed
    #[derive(Debug, Clone, PartialEq)]
    pub struct TextLine {
        /// Visual-order text exactly as drawn
        pub text: String,
        pub glyphs: Vec<GlyphId>,
        pub size: f32,
        /// Left edge of the drawn run
        pub x: f32,
        /// Baseline, measured up from the bottom of the page
        pub y: f32,
        pub width: f32,
    }

    /// One fixed-size page of positioned text
    #[derive(Debug, Clone, PartialEq)]
    pub struct Page {
        pub width: f32,
        pub height: f32,
        pub title: String,
        pub lines: Vec<TextLine>,
    }

    impl Page {
        pub fn a4(title: impl Into<String>) -> Self {
            Self {
                width: A4_WIDTH,
                height: A4_HEIGHT,
                title: title.into(),
                lines: Vec::new(),
            }
        }
    }

    /// Vertical metrics in thousandths of an em, as PDF font descriptors expect
    #[derive(Debug, Clone, PartialEq)]
    pub struct FontMetrics {
        pub postscript_name: String,
        pub ascent: f32,
        pub descent: f32,
        pub cap_height: f32,
        /// x_min, y_min, x_max, y_max
        pub bbox: [f32; 4],
    }

    impl Default for FontMetrics {
        fn default() -> Self {
            Self {
                postscript_name: "DukkanFont".to_string(),
                ascent: 800.0,
                descent: -200.0,
                cap_height: 700.0,
                bbox: [0.0, -200.0, 1000.0, 800.0],
            }
        }
    }

    /// Knobs for the text shaper
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ShapeOptions {
        /// Drop Arabic diacritics instead of passing them through
        pub delete_harakat: bool,
        /// Fuse lam + alef into their ligature forms
        pub ligatures: bool,
    }

    impl Default for ShapeOptions {
        fn default() -> Self {
            Self {
                delete_harakat: true,
                ligatures: true,
            }
        }
    }
}
