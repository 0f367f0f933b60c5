//! kitchen-monitor server binary

#![allow(missing_docs)]

use clap::Parser;
use kitchen_monitor::{Config, Result, server, utils};
use std::path::PathBuf;
use std::process::ExitCode;

/// Kitchen management API with built-in monitoring
#[derive(Debug, Parser)]
#[command(name = "kitchen-monitor", version, about)]
struct Args {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "KITCHEN_MONITOR_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

async fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = utils::init_logging(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the multi-line bind hints readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
