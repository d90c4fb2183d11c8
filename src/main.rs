//! CLI entry point for border-matching tile reassembly

use clap::Parser;
use edgestitch::io::cli::{Cli, FileProcessor};

fn main() -> edgestitch::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .parse_default_env()
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}
