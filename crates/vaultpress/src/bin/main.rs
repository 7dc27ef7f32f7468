//! Vaultpress CLI

use anyhow::Context;
use clap::Parser;
use vaultpress::cli::Args;
use vaultpress::logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level, args.log_format);

    log::info!("Vaultpress v{}", env!("CARGO_PKG_VERSION"));

    let config = args.to_config().context("Failed to resolve configuration")?;
    let report = vaultpress::publish(&config).context("Publishing aborted")?;

    if !report.is_clean() {
        log::warn!("{} notes could not be published", report.total_failed());
    }

    print!("{}", report.render(args.report)?);
    Ok(())
}
