use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dynoscale::cli::OutputFormat;
use dynoscale::prelude::*;
use dynoscale::{Cli, Global};

fn init_tracing(global: &Global) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| global.default_log_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    match global.format {
        OutputFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        OutputFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(err) = dynoscale::run(cli).await {
        aeprintln!("{} {}", p_r("Error:"), err);
        std::process::exit(err.exit_code());
    }
}
