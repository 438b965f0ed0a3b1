//! Turns a confirmed order into a PDF file on disk

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;

use dukkan_core::{
    order::{CartLine, Customer, Invoice, InvoiceId, OrderTotals},
    traits::{Exporter, FontRef, TextShaper},
    types::Page,
    Result, StoreConfig,
};
use dukkan_export::PdfExporter;
use dukkan_fontdb::{ensure_rtl_coverage, resolve_font};
use dukkan_unicode::ArabicShaper;

use crate::{id::InvoiceIdGenerator, layout::layout_invoice};

/// Anything that can turn a confirmed order into a stored invoice
pub trait InvoiceSink {
    /// Stores the invoice and returns where it went
    fn issue(&self, customer: &Customer, lines: &[CartLine], totals: &OrderTotals)
        -> Result<PathBuf>;
}

/// Renders invoices with one font, one shaper and one exporter
pub struct InvoiceRenderer {
    font: Arc<dyn FontRef>,
    shaper: Arc<dyn TextShaper>,
    exporter: Arc<dyn Exporter>,
    config: StoreConfig,
    ids: InvoiceIdGenerator,
}

impl InvoiceRenderer {
    /// Fails if the font cannot draw Arabic letters or their presentation forms
    pub fn new(font: Arc<dyn FontRef>, config: StoreConfig) -> Result<Self> {
        ensure_rtl_coverage(font.as_ref())?;
        Ok(Self {
            font,
            shaper: Arc::new(ArabicShaper::new(config.shaping)),
            exporter: Arc::new(PdfExporter::new()),
            config,
            ids: InvoiceIdGenerator::new(),
        })
    }

    /// Resolves the configured font, or discovers one, then builds the renderer
    pub fn from_config(config: StoreConfig) -> Result<Self> {
        let font = resolve_font(config.font_path.as_deref())?;
        Self::new(font, config)
    }

    pub fn with_shaper(mut self, shaper: Arc<dyn TextShaper>) -> Self {
        self.shaper = shaper;
        self
    }

    pub fn with_exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Where the invoice with `id` is written
    pub fn path_for(&self, id: &InvoiceId) -> PathBuf {
        self.config
            .output_dir
            .join(id.file_name(self.exporter.extension()))
    }

    /// Freezes an order at a fixed time; equal timestamps give equal ids
    pub fn invoice_at(
        &self,
        generated_at: NaiveDateTime,
        customer: &Customer,
        lines: &[CartLine],
        totals: &OrderTotals,
    ) -> Invoice {
        Invoice {
            id: InvoiceId::from_timestamp(&generated_at),
            customer: customer.clone(),
            lines: lines.to_vec(),
            totals: *totals,
            generated_at,
        }
    }

    /// Freezes an order now, with an id no earlier call of this renderer used
    pub fn invoice_now(
        &self,
        customer: &Customer,
        lines: &[CartLine],
        totals: &OrderTotals,
    ) -> Invoice {
        let (id, generated_at) = self.ids.next_now();
        Invoice {
            id,
            customer: customer.clone(),
            lines: lines.to_vec(),
            totals: *totals,
            generated_at,
        }
    }

    pub fn layout(&self, invoice: &Invoice) -> Page {
        layout_invoice(
            invoice,
            &self.config,
            self.shaper.as_ref(),
            self.font.as_ref(),
        )
    }

    /// Lays out, encodes and writes one invoice
    ///
    /// The output directory is created when missing. The document is written
    /// to a temporary sibling and renamed into place, so the final path
    /// either holds a complete file or does not exist.
    pub fn render_invoice(&self, invoice: &Invoice) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir)?;

        let page = self.layout(invoice);
        let bytes = self.exporter.export(&page, self.font.as_ref())?;

        let path = self.path_for(&invoice.id);
        let partial = path.with_extension(format!("{}.part", self.exporter.extension()));
        fs::write(&partial, &bytes)?;
        if let Err(err) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(err.into());
        }

        log::info!(
            "Wrote invoice {} ({} bytes) to {}",
            invoice.id,
            bytes.len(),
            path.display()
        );
        Ok(path)
    }

    /// Renders with the clock forced to `generated_at`
    ///
    /// Two calls with the same timestamp write to the same path, the later
    /// one replacing the earlier file.
    pub fn render_at(
        &self,
        generated_at: NaiveDateTime,
        customer: &Customer,
        lines: &[CartLine],
        totals: &OrderTotals,
    ) -> Result<PathBuf> {
        self.render_invoice(&self.invoice_at(generated_at, customer, lines, totals))
    }

    /// Renders an invoice stamped with the current local time
    ///
    /// Totals are printed as given; nothing is recomputed from the lines.
    pub fn save_invoice(
        &self,
        customer: &Customer,
        lines: &[CartLine],
        totals: &OrderTotals,
    ) -> Result<PathBuf> {
        self.render_invoice(&self.invoice_now(customer, lines, totals))
    }
}

impl InvoiceSink for InvoiceRenderer {
    fn issue(
        &self,
        customer: &Customer,
        lines: &[CartLine],
        totals: &OrderTotals,
    ) -> Result<PathBuf> {
        self.save_invoice(customer, lines, totals)
    }
}

impl std::fmt::Debug for InvoiceRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceRenderer")
            .field("shaper", &self.shaper.name())
            .field("exporter", &self.exporter.name())
            .field("output_dir", &self.config.output_dir)
            .finish_non_exhaustive()
    }
}
