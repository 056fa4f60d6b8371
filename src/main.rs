use clap::{Args, Parser};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

use where_ip::{setup_logging, ServiceConfig, WhereIpService};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CommonArgs {
    /// Path to the config file, layered lookup under config/ when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dump default config and exit
    #[arg(long = "dump-default-config")]
    dump_default: bool,
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line args
    let cli = Cli::parse();

    if cli.common.dump_default {
        let config = ServiceConfig::default();
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    // Load config
    let config = match cli.common.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::new()?,
    };

    // Initialize logging
    let _log_guard = setup_logging(&config.logging)?;

    info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let service = Arc::new(WhereIpService::new(config)?);

    let signal_service = Arc::clone(&service);
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("Shutdown signal received");
        signal_service.shutdown();
    });

    service.run().await?;

    info!("Service stopped");
    Ok(())
}
