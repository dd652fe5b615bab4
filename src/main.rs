use pokedex_api::{config, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    server::init_tracing();

    let config = config::config();
    tracing::info!(
        "Starting pokedex-api in {:?} mode with {:?} store",
        config.environment,
        config.database.backend
    );

    server::serve(config).await
}
