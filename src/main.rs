//! CLI entry point for folder-wide cluster multiplicity analysis

use clap::Parser;
use multiplicity::io::cli::{Cli, FolderAnalysis};
use multiplicity::io::logging::setup_logging;

fn main() -> multiplicity::Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;
    let analysis = FolderAnalysis::new(cli);
    analysis.process()
}
