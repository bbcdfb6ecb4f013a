//! HTTP + WebSocket front door for the predictor.
//!
//! The form page is an axum [`Router`] on the HTTP port; the IPC bridge is a
//! tokio-tungstenite accept loop on its own port. Every WebSocket client runs
//! its own [`Session`] over the shared [`Predictor`].

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use penguin_core::{FormSchema, Predictor};

use crate::config::AppConfig;
use crate::embedded_ui;
use crate::session::Session;

/// Time a client gets to complete the WebSocket handshake.
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to build tokio runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
    #[error("HTTP server failed: {0}")]
    Serve(std::io::Error),
}

/// Shared, read-only state handed to every connection.
#[derive(Clone)]
pub struct BridgeState {
    pub predictor: Arc<Predictor>,
    pub schema: Arc<FormSchema>,
    /// Port the page tells the browser to open the WebSocket on.
    pub ws_port: u16,
    pub handshake_timeout: Duration,
}

impl BridgeState {
    pub fn new(predictor: Predictor, ws_port: u16) -> Self {
        let schema = FormSchema::new(predictor.sex_encoder());
        Self {
            predictor: Arc::new(predictor),
            schema: Arc::new(schema),
            ws_port,
            handshake_timeout: HANDSHAKE_TIMEOUT,
        }
    }

    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }
}

async fn bind(addr: String) -> Result<TcpListener, BridgeError> {
    TcpListener::bind(&addr)
        .await
        .map_err(|source| BridgeError::Bind { addr, source })
}

/// Build a tokio runtime and serve until the HTTP server fails.
pub fn run(config: &AppConfig, predictor: Predictor) -> Result<(), BridgeError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(BridgeError::Runtime)?;

    rt.block_on(async {
        let http_listener = bind(config.bind_addr()).await?;
        let ws_listener = bind(config.ws_bind_addr()).await?;
        let ws_port = ws_listener
            .local_addr()
            .map(|a| a.port())
            .unwrap_or(config.ws_port);

        if let Ok(addr) = http_listener.local_addr() {
            tracing::info!("Form available at http://{addr}/");
        }
        tracing::info!("WebSocket IPC listening on port {ws_port}");

        let state = BridgeState::new(predictor, ws_port);
        tokio::spawn(serve_ws(ws_listener, state.clone()));
        serve_http(http_listener, state).await
    })
}

/// Routes of the HTTP side: the form page at `/`.
pub fn router(state: BridgeState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<BridgeState>) -> Html<String> {
    Html(embedded_ui::get_html(state.ws_port))
}

/// Serve the form page until the listener fails.
pub async fn serve_http(listener: TcpListener, state: BridgeState) -> Result<(), BridgeError> {
    axum::serve(listener, router(state))
        .await
        .map_err(BridgeError::Serve)
}

/// Accept WebSocket clients forever, one task per client.
pub async fn serve_ws(listener: TcpListener, state: BridgeState) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("accept failed: {e}");
                continue;
            }
        };
        tokio::spawn(handle_connection(stream, peer.to_string(), state.clone()));
    }
}

async fn handle_connection(stream: TcpStream, peer: String, state: BridgeState) {
    let ws_stream =
        match tokio::time::timeout(state.handshake_timeout, tokio_tungstenite::accept_async(stream))
            .await
        {
            Ok(Ok(ws)) => ws,
            Ok(Err(e)) => {
                tracing::warn!("WebSocket handshake with {peer} failed: {e}");
                return;
            }
            Err(_) => {
                tracing::warn!("WebSocket handshake with {peer} timed out");
                return;
            }
        };
    tracing::info!("WebSocket client connected: {peer}");

    let (mut ws_sink, mut ws_source) = ws_stream.split();
    let mut session = Session::new(state.predictor, state.schema);

    while let Some(Ok(msg)) = ws_source.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let reply = session.handle_json(text.as_str());
        match serde_json::to_string(&reply) {
            Ok(json) => {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
            Err(e) => tracing::error!("Failed to serialize BackendToUi: {e}"),
        }
    }

    tracing::info!("WebSocket client disconnected: {peer}");
}
