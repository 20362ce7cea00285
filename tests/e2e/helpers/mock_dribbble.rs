use super::fixtures;
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Player names that make the mock misbehave
pub const BROKEN_PLAYER: &str = "broken";
pub const GARBAGE_PLAYER: &str = "garbage";
pub const ODD_SHAPE_PLAYER: &str = "oddshape";
pub const SLOW_PLAYER: &str = "slow";
pub const LONELY_PLAYER: &str = "lonely";

/// Fake Dribbble API recording every request target it receives
pub struct MockDribbble {
    pub port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDribbble {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/players/:user/shots/following", get(following_shots))
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
                .unwrap();
        });

        MockDribbble {
            port,
            requests,
            shutdown_tx: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Request targets (path and query) seen so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockDribbble {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn following_shots(
    State(requests): State<Arc<Mutex<Vec<String>>>>,
    Path(user): Path<String>,
    uri: Uri,
) -> Response {
    requests.lock().unwrap().push(uri.to_string());

    match user.as_str() {
        BROKEN_PLAYER => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        GARBAGE_PLAYER => (StatusCode::OK, "<html>not json</html>").into_response(),
        ODD_SHAPE_PLAYER => Json(json!({"shots": "nope"})).into_response(),
        LONELY_PLAYER => Json(json!({"page": 1, "pages": 0, "total": 0, "shots": []})).into_response(),
        SLOW_PLAYER => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(fixtures::following_shots(&user)).into_response()
        }
        _ => Json(fixtures::following_shots(&user)).into_response(),
    }
}
