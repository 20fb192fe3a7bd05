use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use pokecard_api::app::{app, AppState};
use pokecard_api::config;
use pokecard_api::model;
use pokecard_api::store::memory::MemoryStore;
use pokecard_api::store::postgres::PgStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Pokecard API in {:?} mode", config.environment);

    let state = build_state().await;
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Pokecard API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Wire one store per resource family. With DATABASE_URL set the stores share
/// a Postgres pool; without it the server falls back to in-memory stores so
/// it can run standalone.
async fn build_state() -> AppState {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let db = &config::config().database;
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .acquire_timeout(Duration::from_secs(db.connection_timeout))
                .connect(&url)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));

            tracing::info!("Connected to Postgres");
            AppState {
                attacks: Arc::new(PgStore::new(&model::ATTACK, pool.clone())),
                decks: Arc::new(PgStore::new(&model::DECK, pool.clone())),
                pokemon_cards: Arc::new(PgStore::new(&model::POKEMON_CARD, pool)),
            }
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, serving from in-memory stores");
            AppState {
                attacks: Arc::new(MemoryStore::default()),
                decks: Arc::new(MemoryStore::default()),
                pokemon_cards: Arc::new(MemoryStore::default()),
            }
        }
    }
}
