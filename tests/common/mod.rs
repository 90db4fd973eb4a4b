#![allow(dead_code)]

use pulse_client::{ClientConfig, PulseClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock platform that accepts the login handshake.
pub async fn mock_platform() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/pulseviews/api/sessions"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Authenticate against the mock platform as app "payments".
pub async fn connect(server: &MockServer) -> PulseClient {
    PulseClient::connect(ClientConfig {
        base_url: server.uri(),
        username: "ops".into(),
        password: "secret".into(),
        app: "payments".into(),
        timeout: Some(std::time::Duration::from_secs(5)),
    })
    .await
    .expect("login against the mock platform")
}

/// Write `content` to a fresh temp file and return its handle.
pub fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
