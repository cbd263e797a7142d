use clap::Parser;

use lanpeer_lib::bootstrap::{self, config::default_data_dir};
use lanpeer_lib::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let config = bootstrap::resolve_config(args.config, &default_data_dir())?;
    let log_dir = Some(config.logging.log_dir.as_path()).filter(|p| !p.as_os_str().is_empty());
    bootstrap::tracing::init_tracing_subscriber(log_dir, args.verbose)?;

    let runtime = bootstrap::build_runtime(config).await?;
    cli::run(args.command, runtime).await
}
