//! Linkguard - malicious URL classification service.
//!
//! Loads the pre-trained classifier once at startup and serves the HTTP
//! API. A missing or unloadable model aborts startup instead of serving
//! degraded responses.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use linkguard_server::{Server, ServerConfig};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Linkguard - malicious URL classification service
#[derive(Parser, Debug)]
#[command(name = "linkguard", version, about)]
struct Args {
    /// Host to bind the API server to
    #[arg(long, default_value = linkguard_server::DEFAULT_HOST)]
    host: String,

    /// Port to bind the API server to
    #[arg(long, default_value_t = linkguard_server::DEFAULT_PORT)]
    port: u16,

    /// Path to the ONNX model artifact
    #[arg(long, default_value = linkguard_server::DEFAULT_MODEL_PATH)]
    model: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log to console only, skip the rotating file appender
    #[arg(long)]
    no_log_file: bool,
}

/// Get the logs directory path.
fn logs_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "linkguard", "Linkguard").map(|dirs| dirs.data_dir().join("logs"))
}

/// Initialize logging with file rotation.
fn init_logging(args: &Args) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_level = if args.debug { "debug" } else { &args.log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,linkguard_app={level},linkguard_core={level},linkguard_server={level}",
            level = log_level
        ))
    });

    if !args.no_log_file {
        if let Some(log_dir) = logs_dir() {
            if std::fs::create_dir_all(&log_dir).is_ok() {
                // Rolling file appender (rotates daily, keeps files)
                let file_appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .max_log_files(5)
                    .filename_prefix("linkguard")
                    .filename_suffix("log")
                    .build(&log_dir)
                    .ok();

                if let Some(appender) = file_appender {
                    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(fmt::layer().with_writer(std::io::stdout))
                        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                        .init();

                    tracing::info!("Logging to {:?}", log_dir);
                    return Some(guard);
                }
            }
        }
    }

    // Console logging only
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args);

    tracing::info!("Starting Linkguard v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        model_path: args.model.clone(),
    };

    // Fail fast: no model, no service.
    let server = Server::new(config)
        .with_context(|| format!("failed to load classification model from {}", args.model))?;

    tracing::info!("Model loaded, serving on {}", server.addr());

    server.run().await.context("server exited with error")?;

    Ok(())
}
