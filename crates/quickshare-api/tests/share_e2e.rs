//! E2E tests for the QuickShare HTTP surface using quickshare-client
//!
//! Each test starts the real router on an ephemeral port over a fresh
//! temporary directory and drives it over HTTP.

use std::path::PathBuf;

use quickshare_api::{create_router, AppState};
use quickshare_client::testing::TestServer;
use quickshare_core::SharedDir;
use reqwest::header;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

struct Fixture {
    server: TestServer,
    /// Parent of the shared directory, used to plant files outside it
    outside: PathBuf,
    /// The shared directory itself
    root: PathBuf,
    _temp: TempDir,
}

async fn start_with_state(build: impl FnOnce(SharedDir) -> AppState) -> Fixture {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let shared = SharedDir::open(temp.path().join("uploads")).expect("Failed to open shared dir");
    let root = shared.root().to_path_buf();
    let outside = root.parent().expect("uploads has a parent").to_path_buf();

    let server = TestServer::start(create_router(build(shared)))
        .await
        .expect("Failed to start test server");

    Fixture {
        server,
        outside,
        root,
        _temp: temp,
    }
}

async fn start() -> Fixture {
    start_with_state(AppState::new).await
}

async fn raw_get(fixture: &Fixture, path: &str) -> reqwest::Response {
    fixture
        .server
        .client
        .http_client()
        .get(fixture.server.url(path))
        .send()
        .await
        .expect("request failed")
}

// =============================================================================
// Upload / Download
// =============================================================================

#[tokio::test]
async fn test_upload_then_download() {
    let fixture = start().await;
    let client = &fixture.server.client;

    client.upload("f.txt", b"X".to_vec()).await.unwrap();

    let body = client.download("f.txt").await.unwrap();
    assert_eq!(&body[..], b"X");
    assert_eq!(std::fs::read(fixture.root.join("f.txt")).unwrap(), b"X");
}

#[tokio::test]
async fn test_upload_redirects_to_index() {
    let fixture = start().await;

    let form = Form::new().part("file", Part::bytes(b"hello".to_vec()).file_name("hello.txt"));
    let response = fixture
        .server
        .client
        .http_client()
        .post(fixture.server.url("/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_upload_overwrites_same_name() {
    let fixture = start().await;
    let client = &fixture.server.client;

    client.upload("a.txt", b"1".to_vec()).await.unwrap();
    client.upload("a.txt", b"2".to_vec()).await.unwrap();

    let body = client.download("a.txt").await.unwrap();
    assert_eq!(&body[..], b"2");
    assert_eq!(client.list_files().await.unwrap(), vec!["a.txt"]);
}

#[tokio::test]
async fn test_upload_name_is_sanitized() {
    let fixture = start().await;
    let client = &fixture.server.client;

    client
        .upload("../../escape.txt", b"payload".to_vec())
        .await
        .unwrap();

    assert!(!fixture.outside.join("escape.txt").exists());
    assert_eq!(
        std::fs::read(fixture.root.join("escape.txt")).unwrap(),
        b"payload"
    );
    assert_eq!(client.list_files().await.unwrap(), vec!["escape.txt"]);
}

#[tokio::test]
async fn test_upload_binary_content() {
    let fixture = start().await;
    let client = &fixture.server.client;
    let data: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();

    client.upload("blob.bin", data.clone()).await.unwrap();

    let body = client.download("blob.bin").await.unwrap();
    assert_eq!(&body[..], &data[..]);
}

#[tokio::test]
async fn test_download_content_type_inferred() {
    let fixture = start().await;
    let client = &fixture.server.client;
    client.upload("page.html", b"<p>hi</p>".to_vec()).await.unwrap();
    client.upload("data.unknownext", b"??".to_vec()).await.unwrap();

    let response = raw_get(&fixture, "/download/page.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
    assert_eq!(response.headers()[header::CONTENT_LENGTH], "9");

    let response = raw_get(&fixture, "/download/data.unknownext").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}

// =============================================================================
// Upload errors
// =============================================================================

#[tokio::test]
async fn test_upload_without_file_field() {
    let fixture = start().await;

    let form = Form::new().text("note", "no file here");
    let err = fixture.server.client.upload_form(form).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(std::fs::read_dir(&fixture.root).unwrap().next().is_none());
}

#[tokio::test]
async fn test_upload_file_field_without_filename() {
    let fixture = start().await;

    let form = Form::new().text("file", "just text");
    let err = fixture.server.client.upload_form(form).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_upload_empty_filename() {
    let fixture = start().await;

    // What a browser sends when the form is submitted with no file chosen
    let body = "--XBOUNDARYX\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"\"\r\n\
        Content-Type: application/octet-stream\r\n\
        \r\n\
        \r\n\
        --XBOUNDARYX--\r\n";
    let response = fixture
        .server
        .client
        .http_client()
        .post(fixture.server.url("/upload"))
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=XBOUNDARYX",
        )
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(std::fs::read_dir(&fixture.root).unwrap().next().is_none());
}

#[tokio::test]
async fn test_upload_unusable_filename() {
    let fixture = start().await;

    let err = fixture
        .server
        .client
        .upload("..", b"data".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(std::fs::read_dir(&fixture.root).unwrap().next().is_none());
}

#[tokio::test]
async fn test_upload_onto_directory_is_conflict() {
    let fixture = start().await;
    std::fs::create_dir(fixture.root.join("docs")).unwrap();

    let err = fixture
        .server
        .client
        .upload("docs", b"data".to_vec())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert!(fixture.root.join("docs").is_dir());
}

#[tokio::test]
async fn test_upload_not_multipart() {
    let fixture = start().await;

    let response = fixture
        .server
        .client
        .http_client()
        .post(fixture.server.url("/upload"))
        .body("plain body")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_upload_over_limit_keeps_previous_file() {
    let fixture = start_with_state(|dir| AppState::with_upload_limit(dir, 1024)).await;
    let client = &fixture.server.client;
    client.upload("a.txt", b"1".to_vec()).await.unwrap();

    let err = client.upload("a.txt", vec![b'2'; 4096]).await.unwrap_err();
    assert_eq!(err.status(), Some(413));

    assert_eq!(&client.download("a.txt").await.unwrap()[..], b"1");
    let entries: Vec<_> = std::fs::read_dir(&fixture.root).unwrap().collect();
    assert_eq!(entries.len(), 1, "partial upload left behind");
}

#[tokio::test]
async fn test_truncated_upload_keeps_previous_file() {
    let fixture = start().await;
    let client = &fixture.server.client;
    client.upload("a.txt", b"1".to_vec()).await.unwrap();

    // Body ends in the middle of the file part, without a closing boundary
    let body = "--XBOUNDARYX\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\
        Content-Type: text/plain\r\n\
        \r\n\
        2222222222";
    let response = client
        .http_client()
        .post(fixture.server.url("/upload"))
        .header(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=XBOUNDARYX",
        )
        .body(body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(&client.download("a.txt").await.unwrap()[..], b"1");
    assert_eq!(client.list_files().await.unwrap(), vec!["a.txt"]);
    let entries: Vec<_> = std::fs::read_dir(&fixture.root).unwrap().collect();
    assert_eq!(entries.len(), 1, "partial upload left behind");
}

// =============================================================================
// Download errors
// =============================================================================

#[tokio::test]
async fn test_download_nonexistent() {
    let fixture = start().await;

    let err = fixture
        .server
        .client
        .download("nonexistent.txt")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_download_traversal_is_not_found() {
    let fixture = start().await;
    std::fs::write(fixture.outside.join("secret.txt"), b"secret").unwrap();

    // Encoded through the client: each payload arrives as one path segment
    for name in ["../secret.txt", "../../etc/passwd", "/etc/passwd", ".."] {
        let err = fixture.server.client.download(name).await.unwrap_err();
        assert_eq!(err.status(), Some(404), "payload {:?}", name);
    }

    for raw in [
        "/download/..%2Fsecret.txt",
        "/download/..%2F..%2Fetc%2Fpasswd",
        "/download/%2Fetc%2Fpasswd",
        "/download/..%5Csecret.txt",
        "/download/%FF",
        "/download/..%2F%FF",
    ] {
        let response = raw_get(&fixture, raw).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "path {}", raw);
        let body = response.text().await.unwrap();
        assert!(!body.contains("secret"), "path {} leaked {:?}", raw, body);
    }
}

#[tokio::test]
async fn test_download_directory_is_not_found() {
    let fixture = start().await;
    std::fs::create_dir(fixture.root.join("nested")).unwrap();

    let err = fixture.server.client.download("nested").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

// =============================================================================
// Index page
// =============================================================================

#[tokio::test]
async fn test_index_lists_exactly_regular_files() {
    let fixture = start().await;
    let client = &fixture.server.client;

    assert!(client.list_files().await.unwrap().is_empty());

    client.upload("one.txt", b"1".to_vec()).await.unwrap();
    client.upload("two.txt", b"2".to_vec()).await.unwrap();
    std::fs::write(fixture.root.join("manual.txt"), b"m").unwrap();
    std::fs::create_dir(fixture.root.join("folder")).unwrap();

    let mut files = client.list_files().await.unwrap();
    files.sort();
    assert_eq!(files, vec!["manual.txt", "one.txt", "two.txt"]);

    let html = client.index_page().await.unwrap();
    assert!(html.contains(r#"<a href="/download/one.txt">one.txt</a>"#));
    assert!(html.contains(r#"action="/upload""#));
    assert!(!html.contains("folder"));
}

#[tokio::test]
async fn test_index_escapes_and_links_odd_names() {
    let fixture = start().await;
    let client = &fixture.server.client;
    std::fs::write(fixture.root.join("a&b c.txt"), b"odd").unwrap();

    assert_eq!(client.list_files().await.unwrap(), vec!["a&b c.txt"]);

    let html = client.index_page().await.unwrap();
    assert!(html.contains(r#"<a href="/download/a%26b%20c.txt">a&amp;b c.txt</a>"#));

    let response = raw_get(&fixture, "/download/a%26b%20c.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"odd");
}

#[tokio::test]
async fn test_index_content_type() {
    let fixture = start().await;

    let response = raw_get(&fixture, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn test_health() {
    let fixture = start().await;

    assert_eq!(fixture.server.client.health().await.unwrap(), "OK");
}
