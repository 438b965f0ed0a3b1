//! Command-line interface for Dukkan
//!
//! The `dukkan` binary lists the catalog, previews shaped text, places
//! orders that end in a PDF invoice, reads invoices back and prunes old ones.

pub mod cli;
pub mod commands;
