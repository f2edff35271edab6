use clap::Parser;
use shotlist::{load_config, setup_logging, BatchRunner, Cli};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Clap rejects a missing or unrecognized profile with a usage
    // diagnostic and non-zero exit before anything below runs
    let args = Cli::parse();

    setup_logging(args.verbose)?;

    info!("starting shotlist v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args).await?;

    info!("profile: {}", args.profile);
    info!("input: {}", config.input.display());
    info!("output directory: {}", config.output_dir.display());

    let runner = BatchRunner::new(config, args.profile);
    let summary = runner.run().await?;

    info!("processed {} URLs", summary.processed());

    // Per-URL failures are not surfaced in the exit code; re-running the
    // batch retries exactly the URLs that produced no output
    Ok(())
}
