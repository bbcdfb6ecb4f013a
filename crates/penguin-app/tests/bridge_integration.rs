use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use penguin_app::ipc::{BackendToUi, UiToBackend};
use penguin_app::session::SessionState;
use penguin_app::ws_bridge::{BridgeState, serve_http, serve_ws};
use penguin_core::{ArtifactKind, Predictor};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../penguin-core/tests/fixtures/logistic")
}

struct Servers {
    http: SocketAddr,
    ws: SocketAddr,
}

async fn start_servers() -> Servers {
    let predictor = Predictor::from_dir(fixture_dir()).expect("fixture artifacts should load");
    let http_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let ws_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let servers = Servers {
        http: http_listener.local_addr().unwrap(),
        ws: ws_listener.local_addr().unwrap(),
    };

    let state = BridgeState::new(predictor, servers.ws.port())
        .with_handshake_timeout(Duration::from_millis(200));
    tokio::spawn(serve_ws(ws_listener, state.clone()));
    tokio::spawn(serve_http(http_listener, state));
    servers
}

async fn http_request(addr: SocketAddr, method: &str, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: 0\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn roundtrip(ws: &mut Client, msg: &UiToBackend) -> BackendToUi {
    let json = serde_json::to_string(msg).unwrap();
    ws.send(Message::Text(json.into())).await.unwrap();
    loop {
        match ws.next().await.expect("server closed").unwrap() {
            Message::Text(text) => return serde_json::from_str(text.as_str()).unwrap(),
            _ => continue,
        }
    }
}

#[tokio::test]
async fn websocket_session_initializes_and_predicts() {
    let servers = start_servers().await;
    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{}", servers.ws))
        .await
        .expect("WebSocket connect");

    let schema = match roundtrip(&mut ws, &UiToBackend::RequestState).await {
        BackendToUi::Initialize { schema, state } => {
            assert_eq!(state, SessionState::AwaitingSubmission);
            schema
        }
        other => panic!("unexpected reply: {other:?}"),
    };
    assert_eq!(schema.numeric.len(), 4);
    assert_eq!(schema.sex.options, ["FEMALE", "MALE"]);

    let input = schema.defaults();
    match roundtrip(&mut ws, &UiToBackend::Predict { input }).await {
        BackendToUi::PredictionReady { report, text } => {
            assert_eq!(report.species, "Adelie");
            assert!((0.0..=100.0).contains(&report.confidence_percent));
            assert!(text.contains("Sex: FEMALE"));
        }
        other => panic!("unexpected reply: {other:?}"),
    }

    let mut bad = schema.defaults();
    bad.culmen_depth_mm = 5.0;
    assert!(matches!(
        roundtrip(&mut ws, &UiToBackend::Predict { input: bad }).await,
        BackendToUi::Rejected { .. }
    ));
}

#[tokio::test]
async fn root_serves_form_page() {
    let servers = start_servers().await;
    let response = http_request(servers.http, "GET", "/").await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.to_ascii_lowercase().contains("content-type: text/html"));
    assert!(response.contains("Penguin Species Predictor"));
    assert!(response.contains(&format!("window.__PENGUIN_WS_PORT__ = {};", servers.ws.port())));
}

#[tokio::test]
async fn unknown_routes_and_methods_are_refused() {
    let servers = start_servers().await;

    let response = http_request(servers.http, "DELETE", "/no/such/path").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");

    let response = http_request(servers.http, "GET", "/no/such/path").await;
    assert!(response.starts_with("HTTP/1.1 404"), "{response}");

    let response = http_request(servers.http, "DELETE", "/").await;
    assert!(response.starts_with("HTTP/1.1 405"), "{response}");
}

#[tokio::test]
async fn idle_websocket_connection_is_dropped() {
    let servers = start_servers().await;
    let mut stream = TcpStream::connect(servers.ws).await.unwrap();

    let mut buf = [0_u8; 64];
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server should drop a client that never sends a handshake");
    assert!(matches!(read, Ok(0) | Err(_)));
}

#[test]
fn binary_refuses_to_start_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    for kind in ArtifactKind::ALL {
        if kind == ArtifactKind::SexEncoder {
            continue;
        }
        std::fs::copy(fixture_dir().join(kind.file_name()), dir.path().join(kind.file_name()))
            .unwrap();
    }

    let status = Command::new(env!("CARGO_BIN_EXE_penguin-app"))
        .env("PENGUIN_ARTIFACT_DIR", dir.path())
        .env("PENGUIN_PORT", "0")
        .env("PENGUIN_WS_PORT", "0")
        .status()
        .expect("binary should run");
    assert!(!status.success());
}
