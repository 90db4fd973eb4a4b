use std::time::Duration;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Serialize;

use crate::error::PulseError;

/// Connection parameters for one authenticated session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Platform base URL, e.g. `https://pulse-stg.example.com`. A trailing
    /// slash is tolerated.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Uniform time limit applied to every request. `None` means no limit.
    /// There are no per-operation overrides.
    pub timeout: Option<Duration>,
}

#[derive(Serialize)]
struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// The platform expects base64-wrapped credentials in the login payload.
    /// This is a wire convention, not a security measure.
    fn new(username: &str, password: &str) -> Self {
        Self {
            username: B64.encode(username),
            password: B64.encode(password),
        }
    }
}

/// One authenticated HTTP context for one base URL.
///
/// The platform tracks the login in a session cookie; the cookie jar lives in
/// the underlying client and is replayed automatically. A `Session` never
/// re-authenticates: when the platform expires the cookie, requests start
/// failing and the caller builds a new session. Not internally locked —
/// callers needing concurrency serialize externally or use separate sessions.
pub struct Session {
    http: reqwest::Client,
    base_url: String,
}

impl Session {
    /// Log in and return an authenticated session.
    ///
    /// A non-200 login response is fatal: the body is surfaced verbatim in
    /// [`PulseError::AuthenticationFailed`] and no session exists.
    pub async fn authenticate(config: SessionConfig) -> Result<Self, PulseError> {
        url::Url::parse(&config.base_url)
            .map_err(|e| PulseError::Decode(format!("invalid base URL '{}': {}", config.base_url, e)))?;

        // The platform's server-side routing keys off this header, so it goes
        // on every request — multipart uploads and downloads included.
        let mut headers = HeaderMap::new();
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let session = Session {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        };

        let creds = Credentials::new(&config.username, &config.password);
        let resp = session
            .http
            .post(session.api_url("/sessions"))
            .json(&creds)
            .send()
            .await?;
        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::AuthenticationFailed(body));
        }

        tracing::debug!(base_url = %session.base_url, "session established");
        Ok(session)
    }

    /// `{base}/pulseviews/api{path}`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/pulseviews/api{}", self.base_url, path)
    }

    /// `{base}/pulseviews/api/apps/{app}{path}`
    pub fn app_url(&self, app: &str, path: &str) -> String {
        format!("{}/pulseviews/api/apps/{}{}", self.base_url, app, path)
    }

    // --------------------------------------------------------------------
    // Verb helpers. JSON bodies get content-type: application/json via
    // reqwest; the XHR header rides along from the client defaults.
    // --------------------------------------------------------------------

    pub(crate) async fn get(&self, url: &str) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.get(url).send().await?)
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.post(url).json(body).send().await?)
    }

    pub(crate) async fn post_empty(&self, url: &str) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.post(url).send().await?)
    }

    pub(crate) async fn put_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.put(url).json(body).send().await?)
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.delete(url).send().await?)
    }

    pub(crate) async fn post_multipart(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response, PulseError> {
        Ok(self.http.post(url).multipart(form).send().await?)
    }
}

/// Millisecond epoch timestamp used as the `_` cache-busting query parameter
/// on polled endpoints.
pub(crate) fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_base64_wrapped() {
        let creds = Credentials::new("admin", "s3cret");
        assert_eq!(creds.username, "YWRtaW4=");
        assert_eq!(creds.password, "czNjcmV0");
    }

    #[test]
    fn credentials_encode_fields_independently() {
        let creds = Credentials::new("a", "a");
        assert_eq!(creds.username, creds.password);
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["username"], "YQ==");
    }
}
