use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::auth::JwtAuthenticator;
use crate::config::{self, AppConfig, SecurityConfig, StoreBackend};
use crate::database::{MemoryPokedexStore, PgPokedexStore, PokedexStore};
use crate::handlers::{protected::pokedex, public};
use crate::middleware::require_token;
use crate::state::AppState;

/// fmt subscriber honouring RUST_LOG, defaulting to info plus request traces
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Full router: public routes plus the token-protected pokedex resource
pub fn app(state: AppState) -> Router {
    let settings = config::config();

    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(pokedex_routes(state.clone()))
        .layer(DefaultBodyLimit::max(settings.server.max_request_size_bytes))
        .layer(cors_layer(&settings.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn pokedex_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/pokedex",
            get(pokedex::pokedex_list).post(pokedex::pokedex_create),
        )
        .route(
            "/pokedex/:id",
            get(pokedex::pokedex_show)
                .patch(pokedex::pokedex_update)
                .delete(pokedex::pokedex_delete),
        )
        // route_layer: unmatched paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, require_token))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Build the configured store, bind, and serve until the process exits
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let store: Arc<dyn PokedexStore> = match config.database.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; records are lost on restart");
            Arc::new(MemoryPokedexStore::new())
        }
        StoreBackend::Postgres => {
            let store = PgPokedexStore::connect(&config.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            store.ensure_schema().await.context("failed to prepare schema")?;
            Arc::new(store)
        }
    };

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every protected request will be rejected");
    }

    let state = AppState::new(store, Arc::new(JwtAuthenticator::from_config(&config.security)));

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Pokedex API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
