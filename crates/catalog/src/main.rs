use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::{net::TcpListener, signal};

use catalog::{app::create_app, config::LogFormat, telemetry::init_tracing, AppState, Config};

/// Catalog - Product CRUD over DynamoDB
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run under the AWS Lambda runtime (default)
    Lambda,
    /// Run a local HTTP server
    Serve {
        /// Host address to bind the server to
        #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
        host: String,

        /// Port to listen on
        #[arg(long, short, default_value = "3000", env = "PORT")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing comes first so that configuration errors are logged
    init_tracing(LogFormat::from_env());

    let config = Config::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "Invalid configuration"))?;

    // Built once per cold start and reused by every invocation
    let state = AppState::from_config(&config).await?;

    match cli.command.unwrap_or(Command::Lambda) {
        Command::Lambda => {
            tracing::info!(table = %config.table_name, "Starting Lambda runtime");
            catalog::lambda::run(state)
                .await
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        Command::Serve { host, port } => serve(state, &host, port).await?,
    }

    Ok(())
}

async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = create_app(state);

    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install signal handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
