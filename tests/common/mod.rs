//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

use iframe_relay::{HttpServer, RelayConfig};

/// One request as observed by a mock upstream.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

/// Reply a mock upstream is scripted to produce.
#[derive(Clone, Debug)]
pub struct ScriptedReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ScriptedReply {
    pub fn ok(content_type: &'static str, body: &str) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: String::new(),
        }
    }
}

/// Mock upstream that records every request it sees and answers from a
/// script.
#[derive(Clone)]
pub struct MockUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    reply: Arc<Mutex<ScriptedReply>>,
}

impl MockUpstream {
    /// Bind an ephemeral port and start serving.
    pub async fn start(reply: ScriptedReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mock = Self {
            addr,
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: Arc::new(Mutex::new(reply)),
        };
        let router = Router::new().fallback(record).with_state(mock.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        mock
    }

    /// Origin (`http://127.0.0.1:<port>`) for pointing relay config here.
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .last()
            .cloned()
            .expect("mock upstream saw no requests")
    }
}

async fn record(State(mock): State<MockUpstream>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    mock.requests.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let reply = mock.reply.lock().unwrap().clone();
    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
        .into_response()
}

/// Relay config pointing both upstream origins at mocks, with a fixed
/// public URL so rewrite output is predictable.
pub fn relay_config(video: &MockUpstream, cdn_playlist: &MockUpstream) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.public_url = "http://relay.test".to_string();
    config.upstream.video_origin = video.origin();
    config.upstream.cdn_playlist_origin = cdn_playlist.origin();
    config
}

/// Start the relay on an ephemeral port and return the client-facing
/// address.
pub async fn start_relay(config: RelayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    addr
}
