use anyhow::Result;
use clap::Parser;

use shroud::cli::args::CliArgs;
use shroud::cli::driver;

fn main() -> Result<()> {
    // Initialize tracing if SHROUD_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports SHROUD_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    shroud::tracing_config::init_tracing();

    let args = CliArgs::parse();
    driver::run(&args)
}
