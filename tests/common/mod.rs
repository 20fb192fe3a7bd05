#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use pokecard_api::app::{app, AppState};
use pokecard_api::auth::{generate_token, Claims};
use pokecard_api::store::memory::MemoryStore;
use pokecard_api::store::{ResourceStore, StoreError};

type Script<T> = Mutex<Option<Result<T, String>>>;

/// Scripted stand-in for the persistence engine, one per resource family.
/// Each operation returns whatever the test scripted for it (consumed on
/// use); unscripted calls fail. Calls and write payloads are recorded so
/// tests can assert that storage was, or was not, invoked.
#[derive(Default)]
pub struct StubStore {
    on_find_many: Script<Vec<Value>>,
    on_find_by_id: Script<Option<Value>>,
    on_create: Script<Value>,
    on_update: Script<Value>,
    on_delete: Script<()>,

    calls: Mutex<Vec<&'static str>>,
    pub last_create: Mutex<Option<Map<String, Value>>>,
    pub last_update: Mutex<Option<(i64, Map<String, Value>)>>,
}

impl StubStore {
    pub async fn resolve_find_many(&self, rows: Value) {
        let rows = rows.as_array().cloned().expect("find_many script takes an array");
        *self.on_find_many.lock().await = Some(Ok(rows));
    }

    pub async fn reject_find_many(&self) {
        *self.on_find_many.lock().await = Some(Err("Database error".to_string()));
    }

    pub async fn resolve_find_by_id(&self, row: Option<Value>) {
        *self.on_find_by_id.lock().await = Some(Ok(row));
    }

    pub async fn reject_find_by_id(&self) {
        *self.on_find_by_id.lock().await = Some(Err("Database error".to_string()));
    }

    pub async fn resolve_create(&self, row: Value) {
        *self.on_create.lock().await = Some(Ok(row));
    }

    pub async fn reject_create(&self) {
        *self.on_create.lock().await = Some(Err("Database error".to_string()));
    }

    pub async fn resolve_update(&self, row: Value) {
        *self.on_update.lock().await = Some(Ok(row));
    }

    pub async fn reject_update(&self) {
        *self.on_update.lock().await = Some(Err("Database error".to_string()));
    }

    pub async fn resolve_delete(&self) {
        *self.on_delete.lock().await = Some(Ok(()));
    }

    pub async fn reject_delete(&self) {
        *self.on_delete.lock().await = Some(Err("Database error".to_string()));
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn take<T>(&self, op: &'static str, slot: &Script<T>) -> Result<T, StoreError> {
        self.calls.lock().await.push(op);
        match slot.lock().await.take() {
            Some(Ok(value)) => Ok(value),
            Some(Err(msg)) => Err(StoreError::Backend(msg)),
            None => Err(StoreError::Backend(format!("unscripted {} call", op))),
        }
    }
}

#[async_trait]
impl ResourceStore for StubStore {
    async fn find_many(&self) -> Result<Vec<Value>, StoreError> {
        self.take("find_many", &self.on_find_many).await
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Value>, StoreError> {
        self.take("find_by_id", &self.on_find_by_id).await
    }

    async fn create(&self, draft: Map<String, Value>) -> Result<Value, StoreError> {
        *self.last_create.lock().await = Some(draft);
        self.take("create", &self.on_create).await
    }

    async fn update(&self, id: i64, patch: Map<String, Value>) -> Result<Value, StoreError> {
        *self.last_update.lock().await = Some((id, patch));
        self.take("update", &self.on_update).await
    }

    async fn delete(&self, _id: i64) -> Result<(), StoreError> {
        self.take("delete", &self.on_delete).await
    }
}

/// In-process server with one scripted stub store per resource.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub attacks: Arc<StubStore>,
    pub decks: Arc<StubStore>,
    pub pokemon_cards: Arc<StubStore>,
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        let attacks = Arc::new(StubStore::default());
        let decks = Arc::new(StubStore::default());
        let pokemon_cards = Arc::new(StubStore::default());

        let state = AppState {
            attacks: attacks.clone(),
            decks: decks.clone(),
            pokemon_cards: pokemon_cards.clone(),
        };
        let base_url = serve(state).await?;

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            attacks,
            decks,
            pokemon_cards,
        })
    }

    /// Server backed by real in-memory stores, for end-to-end flows.
    pub async fn spawn_memory() -> Result<(String, reqwest::Client)> {
        let state = AppState {
            attacks: Arc::new(MemoryStore::default()),
            decks: Arc::new(MemoryStore::default()),
            pokemon_cards: Arc::new(MemoryStore::default()),
        };
        Ok((serve(state).await?, reqwest::Client::new()))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn serve(state: AppState) -> Result<String> {
    // Ephemeral port keeps parallel test binaries isolated
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("test server");
    });
    Ok(format!("http://{}", addr))
}

/// A credential the auth middleware accepts (development-config secret).
pub fn auth_token() -> String {
    generate_token(Claims::new(1)).expect("token")
}
