//! druglens web server
//!
//! Run with: cargo run -p druglens-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use druglens_common::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("druglens_web=info,druglens_molecules=info,tower_http=info")),
        )
        .init();

    info!("Starting druglens web server, version {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("RDKit interpreter: {} (timeout {}s)", config.rdkit.python, config.rdkit.timeout_secs);

    let state = druglens_web::state::AppState::from_config(&config)?;
    let app = druglens_web::router::build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
