//! Order command implementation

use anyhow::{Context, Result};
use dukkan::{
    catalog::Catalog,
    layout::format_amount,
    order::{CartLine, Customer},
    DukkanError, InvoiceRenderer, Storefront,
};

use crate::cli::OrderArgs;

pub fn run(args: &OrderArgs) -> Result<()> {
    if args.items.is_empty() {
        return Err(DukkanError::EmptyCart.into());
    }

    let customer = Customer::new(&args.name, &args.phone, &args.address);
    customer.validate()?;

    // Check the items before a font is looked up
    let catalog = Catalog::default();
    let lines = args
        .items
        .iter()
        .map(|item| -> dukkan::Result<CartLine> {
            let line = catalog.require(item.index)?.to_line(item.quantity);
            line.validate()?;
            Ok(line)
        })
        .collect::<dukkan::Result<Vec<_>>>()?;

    let mut config = super::config_with_dir(args.out_dir.as_ref())?;
    if let Some(font) = &args.font {
        config.font_path = Some(font.clone());
    }
    let currency = config.currency_label.clone();
    let policy = config.discount;

    let renderer = InvoiceRenderer::from_config(config).context("Cannot set up invoice rendering")?;
    let mut store = Storefront::with_policy(renderer, policy);
    for line in lines {
        store.add_line(line)?;
    }

    let totals = store.totals();
    let path = store.checkout(&customer)?;

    println!("Subtotal: {} {}", format_amount(totals.subtotal), currency);
    println!("Discount: {} {}", format_amount(totals.discount), currency);
    println!("Payable:  {} {}", format_amount(totals.payable), currency);
    println!("✓ Invoice written to {}", path.display());
    Ok(())
}
