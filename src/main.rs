//! CLI entry point for overlapping-window wave function collapse

use clap::Parser;
use collapsegrid::io::cli::{Cli, Generator};
use collapsegrid::io::configuration::DEFAULT_LOG_FILTER;

fn main() -> collapsegrid::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let cli = Cli::parse();
    let mut generator = Generator::new(cli);
    generator.run()
}
