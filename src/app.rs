use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::resource::{routes, ResourceHandler};
use crate::model;
use crate::store::ResourceStore;

/// One injected store handle per resource family. Handlers hold no other
/// state; everything mutable lives behind the Storage Gateway.
#[derive(Clone)]
pub struct AppState {
    pub attacks: Arc<dyn ResourceStore>,
    pub decks: Arc<dyn ResourceStore>,
    pub pokemon_cards: Arc<dyn ResourceStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resource families
        .merge(routes("/attacks", ResourceHandler::new(&model::ATTACK, state.attacks)))
        .merge(routes("/decks", ResourceHandler::new(&model::DECK, state.decks)))
        .merge(routes(
            "/pokemon-cards",
            ResourceHandler::new(&model::POKEMON_CARD, state.pokemon_cards),
        ))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Pokecard API",
        "version": version,
        "description": "CRUD backend for pokemon card game entities",
        "endpoints": {
            "attacks": "/attacks[/:id]",
            "decks": "/decks[/:id]",
            "pokemon_cards": "/pokemon-cards[/:id]",
            "health": "/health",
        },
        "auth": "POST/PATCH/DELETE require an Authorization: Bearer token",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}
