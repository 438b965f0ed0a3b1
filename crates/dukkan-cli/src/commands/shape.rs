//! Shape command implementation
//!
//! Prints the visual-order, presentation-form text exactly as the invoice
//! renderer would draw it.

use anyhow::Result;
use dukkan::{traits::TextShaper, types::ShapeOptions, ArabicShaper};

use crate::cli::ShapeArgs;

pub fn run(args: &ShapeArgs) -> Result<()> {
    let shaper = ArabicShaper::new(ShapeOptions {
        delete_harakat: !args.keep_harakat,
        ligatures: !args.no_ligatures,
    });
    println!("{}", shaper.shape(&args.text));
    Ok(())
}
