//! CLI entry point for the Wi-Fi signal grid tools

use clap::Parser;
use signalgrid::io::cli::{Cli, Runner};
use signalgrid::io::logging::init_logging;

fn main() -> signalgrid::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);
    Runner::new(cli)?.run()
}
