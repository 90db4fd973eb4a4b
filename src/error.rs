/// Crate-wide error type. Every fallible function returns `Result<T, PulseError>`.
///
/// Multi-step operations surface the first failing step and stop; earlier
/// server-side effects (a prepared import, a passed schema check) are left in
/// place for the operator to reconcile. Nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    /// Login returned non-200. Carries the response body verbatim.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Schema check, workflow validation or restore-state negotiation rejected.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// Partial import commit returned something other than 204.
    #[error("partial commit failed: {0}")]
    CommitFailed(String),

    /// Lifecycle start/update returned non-200.
    #[error("publish failed: {0}")]
    PublishFailed(String),

    /// Cancelling an in-progress operation returned non-success.
    #[error("abort failed: {0}")]
    AbortFailed(String),

    /// Workflow or workflow-element lookup miss. Resolution is a best-effort
    /// description match over the first page of items, so a rename on the
    /// platform side shows up here.
    #[error("not found: {0}")]
    ResolutionNotFound(String),

    /// Network-level failure from the HTTP stack.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local file I/O failure (upload source, download target).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed data: a platform response that fails to parse (JSON or
    /// base64), or an unparseable base URL.
    #[error("decode error: {0}")]
    Decode(String),

    /// Any other non-success platform response. Carries the body verbatim.
    #[error("platform error: {0}")]
    Platform(String),
}

impl From<serde_json::Error> for PulseError {
    fn from(e: serde_json::Error) -> Self {
        PulseError::Decode(e.to_string())
    }
}

impl From<base64::DecodeError> for PulseError {
    fn from(e: base64::DecodeError) -> Self {
        PulseError::Decode(e.to_string())
    }
}
