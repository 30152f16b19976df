use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use log::{error, trace};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

type Documents = Arc<RwLock<HashMap<String, Map<String, Value>>>>;

/// Stores one JSON document per user. `PATCH /users/{id}.json` merges top level fields, `GET` returns the document.
#[derive(Debug, Clone, Default)]
pub struct MockProfileStore {
    documents: Documents,
}

impl MockProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves until the listener fails.
    pub async fn serve(&self, listener: TcpListener) {
        let app = Router::new()
            .route("/users/{document}", get(Self::fetch).patch(Self::merge))
            .with_state(self.documents.clone());

        if let Err(error) = axum::serve(listener, app).await {
            error!("Mock profile store stopped: {error}");
        }
    }

    /// A copy of a user's document, as it would be returned over HTTP.
    pub async fn document(&self, identity_id: &str) -> Option<Map<String, Value>> {
        self.documents.read().await.get(identity_id).cloned()
    }

    async fn fetch(
        State(documents): State<Documents>,
        Path(document): Path<String>,
    ) -> impl IntoResponse {
        let Some(identity_id) = document.strip_suffix(".json") else {
            return (StatusCode::NOT_FOUND, Json(Value::Null));
        };

        let documents = documents.read().await;
        match documents.get(identity_id) {
            Some(fields) => (StatusCode::OK, Json(Value::Object(fields.clone()))),
            None => (StatusCode::OK, Json(Value::Null)),
        }
    }

    async fn merge(
        State(documents): State<Documents>,
        Path(document): Path<String>,
        Json(fields): Json<Map<String, Value>>,
    ) -> impl IntoResponse {
        let Some(identity_id) = document.strip_suffix(".json") else {
            return (StatusCode::NOT_FOUND, Json(Value::Null));
        };

        trace!("C: PATCH {identity_id} {}", Value::Object(fields.clone()));

        let mut documents = documents.write().await;
        let stored = documents.entry(identity_id.to_string()).or_default();
        for (name, value) in fields {
            stored.insert(name, Self::resolve_server_value(value));
        }

        (StatusCode::OK, Json(Value::Object(stored.clone())))
    }

    fn resolve_server_value(value: Value) -> Value {
        if value == json!({ ".sv": "timestamp" }) {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or(0);

            return Value::from(millis);
        }

        value
    }
}
