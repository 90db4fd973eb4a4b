//! Deploy lifecycle control: start/update publishes, progress snapshots and
//! cancellation. The server tracks the operation state
//! (`Idle → Running → Finished | Cancelled`); this module only samples it.

mod types;

pub use types::{Member, MemberMessage, ProgressResponse, PublishRequest};

use reqwest::StatusCode;

use crate::error::PulseError;
use crate::session::{cache_buster, Session};

/// Lifecycle controller for one application. Borrows the session; construct
/// one per call site or hold it alongside the session.
pub struct Lifecycle<'a> {
    session: &'a Session,
    app: &'a str,
}

impl<'a> Lifecycle<'a> {
    pub fn new(session: &'a Session, app: &'a str) -> Self {
        Self { session, app }
    }

    /// Start publishing the application (first deploy).
    pub async fn start(&self) -> Result<(), PulseError> {
        self.publish("start").await
    }

    /// Redeploy the application with its current staged configuration. The
    /// convergence point of every import and restart flow.
    pub async fn update(&self) -> Result<(), PulseError> {
        self.publish("update").await
    }

    async fn publish(&self, op: &str) -> Result<(), PulseError> {
        let url = self.session.app_url(self.app, &format!("/lifecycle/{}", op));
        let resp = self
            .session
            .post_json(&url, &PublishRequest::rolling_full_reload())
            .await?;

        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::PublishFailed(format!("{}: {}", op, body)));
        }

        // The accepted response mirrors the progress payload; log the
        // operation id when the platform includes one.
        match resp.json::<ProgressResponse>().await {
            Ok(progress) if !progress.operation_id.is_empty() => {
                tracing::info!(
                    app = self.app,
                    op,
                    operation_id = %progress.operation_id,
                    "publish accepted"
                );
            }
            _ => tracing::info!(app = self.app, op, "publish accepted"),
        }
        Ok(())
    }

    /// Boolean snapshot: true iff the progress endpoint answers 200.
    ///
    /// Not a blocking wait — a caller that needs completion polls this in its
    /// own loop with its own interval and stop condition.
    pub async fn is_publish_in_progress(&self) -> Result<bool, PulseError> {
        let resp = self.progress().await?;
        Ok(resp.status() == StatusCode::OK)
    }

    /// Cancel whatever operation is currently running.
    ///
    /// Nothing in progress (progress endpoint non-200) is a no-op success.
    /// A rejected cancel is [`PulseError::AbortFailed`].
    pub async fn abort(&self) -> Result<(), PulseError> {
        let resp = self.progress().await?;
        if resp.status() != StatusCode::OK {
            tracing::debug!(app = self.app, "no operation in progress, nothing to abort");
            return Ok(());
        }

        let progress: ProgressResponse = resp
            .json()
            .await
            .map_err(|e| PulseError::Decode(e.to_string()))?;
        if progress.operation_id.is_empty() {
            return Err(PulseError::Decode(
                "progress payload missing operationId".to_string(),
            ));
        }

        let url = self
            .session
            .app_url(self.app, &format!("/lifecycle/cancel/{}", progress.operation_id));
        let cancel = self.session.post_empty(&url).await?;
        if !cancel.status().is_success() {
            let body = cancel.text().await.unwrap_or_default();
            return Err(PulseError::AbortFailed(body));
        }

        tracing::info!(
            app = self.app,
            operation_id = %progress.operation_id,
            "operation cancelled"
        );
        Ok(())
    }

    async fn progress(&self) -> Result<reqwest::Response, PulseError> {
        let url = self.session.app_url(
            self.app,
            &format!("/lifecycle/currentOperationProgress?_={}", cache_buster()),
        );
        self.session.get(&url).await
    }
}
