//! Prune command implementation

use anyhow::Result;
use dukkan::InvoiceStore;

use crate::cli::PruneArgs;

pub fn run(args: &PruneArgs) -> Result<()> {
    let config = super::config_with_dir(args.out_dir.as_ref())?;
    let store = InvoiceStore::new(&config.output_dir);

    let removed = store.prune(args.keep)?;
    println!(
        "Removed {} invoice(s) from {}",
        removed.len(),
        store.dir().display()
    );
    Ok(())
}
