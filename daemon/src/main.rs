//! Credence daemon — entry point for running the verification service.

use clap::Parser;
use credence_rpc::RpcServer;
use credence_service::{
    init_logging, write_signing_key, LogFormat, Service, ServiceConfig, ShutdownController,
};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "credence-daemon", about = "Credence business verification service")]
struct Cli {
    /// Address for the HTTP API (host:port).
    #[arg(long, env = "CREDENCE_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CREDENCE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CREDENCE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to the hex-encoded certificate signing key.
    #[arg(long, env = "CREDENCE_SIGNING_KEY_FILE")]
    signing_key_file: Option<PathBuf>,

    /// Path to a TOML configuration file. File settings are used as the
    /// base; CLI flags and env vars override them.
    #[arg(long, env = "CREDENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the verification service.
    Run,

    /// Generate a signing keypair: write the secret key (hex) to a file and
    /// print the public key.
    Keygen {
        /// Output path for the secret key.
        #[arg(long, default_value = "./credence-signing.key")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Keygen { ref out } => {
            let public = write_signing_key(out)?;
            println!("wrote secret key to {}", out.display());
            println!("public key: {}", public.to_hex());
            Ok(())
        }
        Command::Run => run(cli).await,
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A config file that was asked for but cannot be loaded is fatal;
    // silently running on defaults would mask a misconfigured deployment.
    let file_config = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(&path.to_string_lossy())?,
        None => ServiceConfig::default(),
    };

    let config = ServiceConfig {
        listen_addr: cli.listen_addr.unwrap_or(file_config.listen_addr),
        log_format: cli.log_format.unwrap_or(file_config.log_format),
        log_level: cli.log_level.unwrap_or(file_config.log_level),
        signing_key_file: cli.signing_key_file.or(file_config.signing_key_file),
        ..file_config
    };

    init_logging(LogFormat::parse(&config.log_format), &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let service = Service::build(config)?;
    let addr: SocketAddr = service.config.listen_addr.parse()?;
    tracing::info!(
        %addr,
        agents = service.orchestrator.registry().len(),
        "starting credence service"
    );

    let server = RpcServer::new(addr, service.orchestrator.clone(), service.metrics.clone());

    let shutdown = ShutdownController::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move { shutdown.wait_for_signal().await });

    server.serve(rx).await?;

    tracing::info!("credence daemon exited cleanly");
    Ok(())
}
