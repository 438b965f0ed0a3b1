//! Listing and pruning the invoices already written to disk

use std::fs;
use std::path::{Path, PathBuf};

use dukkan_core::{order::InvoiceId, Result};

/// One invoice file found in the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInvoice {
    pub id: InvoiceId,
    pub path: PathBuf,
}

/// The invoice files of one output directory
#[derive(Debug, Clone)]
pub struct InvoiceStore {
    dir: PathBuf,
    extension: String,
}

impl InvoiceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_extension(dir, "pdf")
    }

    pub fn with_extension(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every invoice file, newest first; a missing directory holds none
    pub fn list(&self) -> Result<Vec<StoredInvoice>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut invoices = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(id) = name
                .to_str()
                .and_then(|name| InvoiceId::from_file_name(name, &self.extension))
            else {
                continue;
            };
            invoices.push(StoredInvoice {
                id,
                path: entry.path(),
            });
        }

        invoices.sort_by(|a, b| sort_key(&b.id).cmp(&sort_key(&a.id)));
        Ok(invoices)
    }

    /// Deletes all but the `keep` newest invoices and returns what was removed
    pub fn prune(&self, keep: usize) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for invoice in self.list()?.into_iter().skip(keep) {
            fs::remove_file(&invoice.path)?;
            log::info!("Removed invoice {}", invoice.path.display());
            removed.push(invoice.path);
        }
        Ok(removed)
    }
}

/// Timestamp first, then the repeat counter as a number so `_10` follows `_9`
fn sort_key(id: &InvoiceId) -> (&str, u32) {
    let id = id.as_str();
    match id.get(15..).and_then(|rest| rest.strip_prefix('_')) {
        Some(sequence) => (&id[..15], sequence.parse().unwrap_or(0)),
        None => (id, 0),
    }
}
