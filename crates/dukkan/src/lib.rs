//! Dukkan: right-to-left PDF invoices for a small storefront
//!
//! This crate ties the pipeline together. A [`Storefront`] collects cart
//! lines, applies the discount rule and hands confirmed orders to an
//! [`InvoiceRenderer`], which shapes every string, places it on an A4 page
//! and writes `invoice_<YYYYMMDD_HHMMSS>.pdf` into the output directory.
//!
//! ```rust,no_run
//! use dukkan::{InvoiceRenderer, Storefront, StoreConfig};
//! use dukkan::order::Customer;
//!
//! let config = StoreConfig::from_env()?;
//! let policy = config.discount;
//! let renderer = InvoiceRenderer::from_config(config)?;
//! let mut store = Storefront::with_policy(renderer, policy);
//! store.add_product(0, 2)?;
//! let path = store.checkout(&Customer::new("Omar", "01012345678", "Cairo"))?;
//! println!("{}", path.display());
//! # Ok::<(), dukkan::DukkanError>(())
//! ```

pub mod id;
pub mod layout;
pub mod renderer;
pub mod store;
pub mod storefront;

pub use dukkan_core::{
    cart, catalog, config, error, order, traits, types, DukkanError, Result, StoreConfig,
};
pub use dukkan_export::{extract_text, page_count, PdfExporter};
pub use dukkan_fontdb::{discover_rtl_font, ensure_rtl_coverage, resolve_font, Font};
pub use dukkan_unicode::{shape, ArabicShaper};

pub use id::InvoiceIdGenerator;
pub use renderer::{InvoiceRenderer, InvoiceSink};
pub use store::{InvoiceStore, StoredInvoice};
pub use storefront::Storefront;
