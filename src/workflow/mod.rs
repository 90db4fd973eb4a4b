//! Workflow discovery and the restart sequencer.
//!
//! Discovery resolves `(workflow name, element name)` to an element ID by
//! scanning the first page of workflow items for matching description fields.
//! The restart sequencer re-validates and re-stages the application's current
//! workflow without changing it: fetch, validate, negotiate restore state,
//! write the same document back, redeploy.

mod types;

pub use types::{ValidateRestoreState, WorkflowConfig, WorkflowElement, WorkflowItem, WorkflowPage};

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::PulseError;
use crate::lifecycle::Lifecycle;
use crate::session::{cache_buster, Session};

/// Items fetched per discovery page. Only the first page is scanned: a
/// workflow sitting beyond it resolves as not-found. That is a boundary of
/// the description-match scheme, not a bug to paper over.
pub const PAGE_LIMIT: u32 = 5;

/// Scan a page for the element named `element_name` inside the workflow named
/// `workflow_name`, matching both by description field.
pub fn find_element_id<'p>(
    page: &'p WorkflowPage,
    workflow_name: &str,
    element_name: &str,
) -> Option<&'p str> {
    page.items
        .iter()
        .filter(|item| item.desc == workflow_name)
        .flat_map(|item| item.config.elements.iter())
        .find(|element| element.desc == element_name)
        .map(|element| element.id.as_str())
}

/// Resolve `(workflow name, element name)` to a workflow element ID.
///
/// Best-effort: if the platform renames either description this misses and
/// returns [`PulseError::ResolutionNotFound`].
pub async fn resolve_element_id(
    session: &Session,
    app: &str,
    workflow_name: &str,
    element_name: &str,
) -> Result<String, PulseError> {
    let url = session.app_url(
        app,
        &format!(
            "/rte_workflows/paged?limit={}&sort_by=desc&order=ASC&_={}",
            PAGE_LIMIT,
            cache_buster()
        ),
    );
    let resp = session.get(&url).await?;
    let body = resp.text().await?;
    let page: WorkflowPage = serde_json::from_str(&body)?;

    find_element_id(&page, workflow_name, element_name)
        .map(str::to_string)
        .ok_or_else(|| {
            PulseError::ResolutionNotFound(format!(
                "element '{}' in workflow '{}'",
                element_name, workflow_name
            ))
        })
}

/// Restart sequencer for one application's workflow.
pub struct WorkflowRestart<'a> {
    session: &'a Session,
    app: &'a str,
}

impl<'a> WorkflowRestart<'a> {
    pub fn new(session: &'a Session, app: &'a str) -> Self {
        Self { session, app }
    }

    /// Nudge-restart the workflow. Each step gates the next; the first
    /// failure aborts the rest of the sequence.
    ///
    /// The document written back in step 4 is byte-for-byte the one fetched
    /// in step 1 — the point is to force the platform to re-validate and
    /// re-stage what is already there, not to apply new content.
    pub async fn restart(&self) -> Result<(), PulseError> {
        let document = self.fetch_document().await?;
        self.validate(&document).await?;
        self.validate_restore_state(&document).await?;
        self.persist(&document).await?;
        Lifecycle::new(self.session, self.app).update().await
    }

    async fn fetch_document(&self) -> Result<Value, PulseError> {
        let url = self
            .session
            .app_url(self.app, &format!("/rte_workflows/workflow?_={}", cache_buster()));
        let resp = self.session.get(&url).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn validate(&self, document: &Value) -> Result<(), PulseError> {
        let url = self.session.app_url(self.app, "/rte_workflows/validate");
        let resp = self.session.post_json(&url, document).await?;

        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::ValidationFailed(format!(
                "workflow validation: {}",
                body
            )));
        }
        Ok(())
    }

    async fn validate_restore_state(&self, document: &Value) -> Result<(), PulseError> {
        let expression = document
            .pointer("/config/recoveryExpression")
            .and_then(Value::as_str)
            .unwrap_or_default();

        let url = self.session.app_url(self.app, "/rte_workflows/validaterestorestate");
        let resp = self
            .session
            .post_json(
                &url,
                &ValidateRestoreState {
                    recovery_expression: expression,
                },
            )
            .await?;

        if resp.status() != StatusCode::NO_CONTENT {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::ValidationFailed(format!(
                "restore state: {}",
                body
            )));
        }
        Ok(())
    }

    async fn persist(&self, document: &Value) -> Result<(), PulseError> {
        let url = self.session.app_url(self.app, "/rte_workflows/workflow");
        let resp = self.session.put_json(&url, document).await?;

        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::Platform(format!("saving workflow: {}", body)));
        }

        tracing::info!(app = self.app, "workflow persisted unchanged");
        Ok(())
    }
}
