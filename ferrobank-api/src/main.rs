use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;

use ferrobank_api::{router, ApiConfig, AppState};
use ferrobank_core::{init_tracing, load};
use ferrobank_persistence::{connect, MIGRATOR};

/// The ferrobank HTTP API.
#[derive(Parser)]
#[clap(name = "ferrobank", version = "0.1.0", about = "Multi-currency accounts, transfers and sessions over HTTP.")]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply migrations and run the HTTP server (the default).
    Serve,

    /// Apply database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load::<ApiConfig>();
    let pool = connect(&config.db_source, &config.database)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            MIGRATOR.run(&pool).await?;
            info!(target: "api", "migrations applied");
        }
        Commands::Serve => {
            MIGRATOR.run(&pool).await?;

            let state = AppState::new(pool, &config)?;
            let app = router(state);

            let shutdown = CancellationToken::new();
            let signal_token = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!(target: "api", "shutdown signal received");
                    signal_token.cancel();
                }
            });

            let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
            info!(target: "api", "listening on {}", config.server_address);
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown.cancelled_owned())
                .await?;
        }
    }

    Ok(())
}
