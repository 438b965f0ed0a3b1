// this_file: crates/dukkan-cli/src/main.rs

//! Dukkan CLI: catalog, orders and invoices from the terminal

use anyhow::Result;
use clap::Parser;
use dukkan_cli::{
    cli::{Cli, Commands},
    commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Catalog => commands::catalog::run(),
        Commands::Shape(args) => commands::shape::run(&args),
        Commands::Order(args) => commands::order::run(&args),
        Commands::Inspect(args) => commands::inspect::run(&args),
        Commands::Prune(args) => commands::prune::run(&args),
    }
}
