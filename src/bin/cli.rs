// src/bin/cli.rs
use clap::Parser;
use credstats::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();
    credstats::log::init(args.verbose);
    cli::run(args)
}
