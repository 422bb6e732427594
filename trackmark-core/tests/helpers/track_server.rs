//! In-process HTTP server serving manifest and track fixtures

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use trackmark_common::SourceConfig;
use trackmark_core::TrackClient;

#[derive(Clone)]
struct Fixture {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct ServerState {
    fixtures: HashMap<String, Fixture>,
    hits: AtomicUsize,
}

/// Builder for a fixture server; paths are absolute, e.g. `/geojson/a.json`
#[derive(Default)]
pub struct TrackServerBuilder {
    fixtures: HashMap<String, Fixture>,
}

impl TrackServerBuilder {
    pub fn json(mut self, path: &str, body: impl ToString) -> Self {
        self.fixtures.insert(
            path.to_string(),
            Fixture {
                status: StatusCode::OK,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    pub fn delayed_json(mut self, path: &str, body: impl ToString, delay: Duration) -> Self {
        self.fixtures.insert(
            path.to_string(),
            Fixture {
                status: StatusCode::OK,
                body: body.to_string(),
                delay: Some(delay),
            },
        );
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.fixtures.insert(
            path.to_string(),
            Fixture {
                status: StatusCode::from_u16(status).unwrap(),
                body: String::new(),
                delay: None,
            },
        );
        self
    }

    pub async fn start(self) -> TrackServer {
        let state = Arc::new(ServerState {
            fixtures: self.fixtures,
            hits: AtomicUsize::new(0),
        });

        let app = Router::new().fallback(serve_fixture).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TrackServer {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }
}

async fn serve_fixture(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let Some(fixture) = state.fixtures.get(uri.path()).cloned() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(delay) = fixture.delay {
        tokio::time::sleep(delay).await;
    }

    (
        fixture.status,
        [(header::CONTENT_TYPE, "application/json")],
        fixture.body,
    )
        .into_response()
}

/// Running fixture server; aborted on drop
pub struct TrackServer {
    pub base_url: String,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl TrackServer {
    pub fn builder() -> TrackServerBuilder {
        TrackServerBuilder::default()
    }

    /// Source configuration pointing at this server's `/geojson` folder
    pub fn config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            ..SourceConfig::default()
        }
    }

    pub fn client(&self) -> TrackClient {
        TrackClient::new(self.config()).unwrap()
    }

    /// Number of requests served so far
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TrackServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
