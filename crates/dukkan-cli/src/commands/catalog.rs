//! Catalog command implementation

use anyhow::Result;
use dukkan::{catalog::Catalog, layout::format_amount, StoreConfig};

pub fn run() -> Result<()> {
    let config = StoreConfig::from_env()?;
    for (index, product) in Catalog::default().iter().enumerate() {
        println!(
            "{:>2}  {}  {} {}",
            index,
            product.name,
            format_amount(product.price),
            config.currency_label
        );
    }
    Ok(())
}
