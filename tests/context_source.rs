//! ContextSource fallback chain against a mock GitHub contents API.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use mockito::Matcher;
use serde_json::json;
use telos_mcp::config::ServerConfig;
use telos_mcp::context::{decode_content, ContextSource, FetchError, NO_CONTEXT_PLACEHOLDER};

const REPO: &str = "alice/personal-context";
const CONTENTS_PATH: &str = "/repos/alice/personal-context/contents/telos.md";

fn config(api_url: &str, token: Option<&str>, local_path: &Path) -> ServerConfig {
    ServerConfig {
        github_token: token.map(str::to_string),
        telos_repo: REPO.to_string(),
        github_api_url: api_url.to_string(),
        local_context_path: local_path.to_path_buf(),
        fetch_timeout: Duration::from_secs(5),
        ..ServerConfig::default()
    }
}

/// Encode the way the contents API does: standard base64 wrapped at 60 columns.
fn github_encode(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    encoded
        .as_bytes()
        .chunks(60)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn remote_document_wins_when_token_is_set() {
    let mut server = mockito::Server::new_async().await;
    let document = "# TELOS\n\n## Mission\nMake hard things simple. ".repeat(5);

    let mock = server
        .mock("GET", CONTENTS_PATH)
        .match_header("authorization", "Bearer secret-token")
        .match_header("user-agent", Matcher::Regex("^telos-mcp/".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "name": "telos.md", "encoding": "base64", "content": github_encode(&document) }).to_string())
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let local = tmp.path().join("telos.md");
    std::fs::write(&local, "local copy").unwrap();

    let source = ContextSource::new(&config(&server.url(), Some("secret-token"), &local)).unwrap();
    assert_eq!(source.load().await, document);
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_skips_remote() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source = ContextSource::new(&config(&server.url(), None, &tmp.path().join("none.md"))).unwrap();

    assert!(matches!(
        source.fetch_remote().await,
        Err(FetchError::MissingCredential)
    ));
    assert_eq!(source.load().await, NO_CONTEXT_PLACEHOLDER);
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_falls_back_to_local_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", CONTENTS_PATH)
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .expect(2)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let local = tmp.path().join("telos.md");
    std::fs::write(&local, "local mission").unwrap();

    let source = ContextSource::new(&config(&server.url(), Some("t"), &local)).unwrap();
    match source.fetch_remote().await {
        Err(FetchError::Status(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(source.load().await, "local mission");
    mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_content_falls_back_to_placeholder() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":"!!! not base64 !!!"}"#)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source =
        ContextSource::new(&config(&server.url(), Some("t"), &tmp.path().join("none.md"))).unwrap();

    assert!(matches!(
        source.fetch_remote().await,
        Err(FetchError::Decode(_))
    ));
    assert_eq!(source.load().await, NO_CONTEXT_PLACEHOLDER);
}

#[tokio::test]
async fn body_without_content_field_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type":"dir"}"#)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source =
        ContextSource::new(&config(&server.url(), Some("t"), &tmp.path().join("none.md"))).unwrap();

    assert!(matches!(source.fetch_remote().await, Err(FetchError::Body)));
    assert_eq!(source.load().await, NO_CONTEXT_PLACEHOLDER);
}

#[tokio::test]
async fn oversized_file_without_inline_content_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"telos.md","size":2097152,"encoding":"none","content":""}"#)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let local = tmp.path().join("telos.md");
    std::fs::write(&local, "local mission").unwrap();

    let source = ContextSource::new(&config(&server.url(), Some("t"), &local)).unwrap();
    assert!(matches!(source.fetch_remote().await, Err(FetchError::Body)));
    assert_eq!(source.load().await, "local mission");
}

#[tokio::test]
async fn empty_base64_content_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"encoding":"base64","content":"\n"}"#)
        .create_async()
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let source =
        ContextSource::new(&config(&server.url(), Some("t"), &tmp.path().join("none.md"))).unwrap();
    assert_eq!(source.load().await, NO_CONTEXT_PLACEHOLDER);
}

#[tokio::test]
async fn hanging_remote_is_cut_off_by_fetch_timeout() {
    // Accept connections and hold them open without ever answering.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let acceptor = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = config(&url, Some("t"), &tmp.path().join("none.md"));
    cfg.fetch_timeout = Duration::from_secs(1);
    let source = ContextSource::new(&cfg).unwrap();

    let started = std::time::Instant::now();
    let content = source.load().await;
    let elapsed = started.elapsed();

    assert_eq!(content, NO_CONTEXT_PLACEHOLDER);
    assert!(elapsed >= Duration::from_millis(900), "returned too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "fetch was not bounded: {elapsed:?}");

    acceptor.abort();
}

#[tokio::test]
async fn unreachable_host_falls_back() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let tmp = tempfile::tempdir().unwrap();
    let local = tmp.path().join("telos.md");
    std::fs::write(&local, "offline mission").unwrap();

    let source = ContextSource::new(&config(&url, Some("t"), &local)).unwrap();
    assert!(matches!(
        source.fetch_remote().await,
        Err(FetchError::Request(_))
    ));
    assert_eq!(source.load().await, "offline mission");
}

#[tokio::test]
async fn unreadable_local_path_falls_back_to_placeholder() {
    // A directory cannot be read as a file; the error is logged, not raised.
    let tmp = tempfile::tempdir().unwrap();
    let source = ContextSource::new(&config("http://127.0.0.1:9", None, tmp.path())).unwrap();
    assert_eq!(source.load().await, NO_CONTEXT_PLACEHOLDER);
}

#[test]
fn decode_content_handles_wrapped_base64() {
    let text = "Línea uno\nLine two, with accents and emoji 🚀\n".repeat(4);
    assert_eq!(decode_content(&github_encode(&text)).unwrap(), text);
}

#[test]
fn decode_content_rejects_invalid_utf8() {
    let encoded = base64::engine::general_purpose::STANDARD.encode([0xff, 0xfe, 0x00]);
    assert!(matches!(decode_content(&encoded), Err(FetchError::Utf8(_))));
}
