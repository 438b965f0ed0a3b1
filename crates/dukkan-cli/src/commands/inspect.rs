//! Inspect command implementation

use anyhow::{Context, Result};
use dukkan::{extract_text, page_count};

use crate::cli::InspectArgs;

pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("Cannot read {}", args.path.display()))?;

    println!("Pages: {}", page_count(&bytes)?);
    for line in extract_text(&bytes)? {
        println!("{}", line);
    }
    Ok(())
}
