//! One module per subcommand

pub mod catalog;
pub mod inspect;
pub mod order;
pub mod prune;
pub mod shape;

use std::path::PathBuf;

use dukkan::{Result, StoreConfig};

/// Environment configuration with an optional output directory override
pub(crate) fn config_with_dir(out_dir: Option<&PathBuf>) -> Result<StoreConfig> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = out_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}
