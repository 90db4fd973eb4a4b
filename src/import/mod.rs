//! Partial import of sub-resources (rule projects, plans, models) into a
//! live application: prepare → check schemas → commit, then a lifecycle
//! update to actually redeploy. A committed import without the follow-up
//! update would leave the change staged but undeployed, so the update is
//! part of the operation.
//!
//! Failure semantics: the first failing step aborts and propagates. No
//! cleanup of a dangling import ID is attempted — abandoned imports are an
//! operator concern on the platform side.

mod types;

pub use types::{
    Execution, ImportBundle, ListSpec, Plan, RulesProject, SchemaRemapRequest, Snapshot,
    WorkflowMapping,
};

use std::path::Path;

use reqwest::StatusCode;

use crate::error::PulseError;
use crate::lifecycle::Lifecycle;
use crate::session::Session;
use crate::transfer;
use crate::workflow;

/// Workflow ID literal the platform expects in snapshot mappings.
const WORKFLOW_ID: &str = "workflow";

/// Which destination fields the remap computes. Everything not named here is
/// an identity remap passed through from the bundle.
pub enum RemapPolicy<'a> {
    /// Attach every snapshot of every rules project to this workflow element.
    /// Plans and models pass through unchanged.
    RuleProjects { workflow_element_id: &'a str },
    /// Copy plan executions by ID only, dropping destination-specific
    /// execution fields. Rules projects pass through unchanged.
    PlansOnly,
}

/// Build the schema-remap request for a prepared bundle.
///
/// Every entity keeps its bundle position and its own ID/description as the
/// destination (identity remap); `policy` decides the one computed part.
pub fn build_remap_request(bundle: &ImportBundle, policy: &RemapPolicy) -> SchemaRemapRequest {
    let rules_projects = match policy {
        RemapPolicy::RuleProjects { workflow_element_id } => bundle
            .rules_projects
            .iter()
            .map(|project| {
                let snapshots = project
                    .snapshots
                    .iter()
                    .map(|snapshot| Snapshot {
                        desc: snapshot.desc.clone(),
                        id: snapshot.id.clone(),
                        workflow_mappings: vec![WorkflowMapping {
                            workflow_element_id: (*workflow_element_id).to_string(),
                            workflow_id: WORKFLOW_ID.to_string(),
                        }],
                    })
                    .collect();
                RulesProject {
                    id: project.id.clone(),
                    desc: String::new(),
                    destination_desc: project.desc.clone(),
                    destination_id: project.id.clone(),
                    snapshots,
                    kind: String::new(),
                }
            })
            .collect(),
        RemapPolicy::PlansOnly => bundle.rules_projects.clone(),
    };

    let plans = match policy {
        RemapPolicy::RuleProjects { .. } => bundle.plans.clone(),
        RemapPolicy::PlansOnly => bundle
            .plans
            .iter()
            .map(|plan| Plan {
                desc: plan.desc.clone(),
                executions: plan
                    .executions
                    .iter()
                    .map(|execution| Execution {
                        desc: String::new(),
                        id: execution.id.clone(),
                    })
                    .collect(),
                id: plan.id.clone(),
                destination_id: plan.id.clone(),
                destination_desc: plan.desc.clone(),
            })
            .collect(),
    };

    SchemaRemapRequest {
        lists: bundle.lists.clone(),
        models: bundle.models.clone(),
        plans,
        rules_projects,
    }
}

/// Partial-import orchestrator for one application.
pub struct PartialImport<'a> {
    session: &'a Session,
    app: &'a str,
}

impl<'a> PartialImport<'a> {
    pub fn new(session: &'a Session, app: &'a str) -> Self {
        Self { session, app }
    }

    /// Import rule projects from a zip archive, remapping every snapshot onto
    /// the workflow element named `(workflow_name, element_name)`.
    ///
    /// The element is resolved by description match before any import traffic
    /// is sent; a lookup miss aborts with [`PulseError::ResolutionNotFound`].
    pub async fn import_rule_projects(
        &self,
        zip: impl AsRef<Path>,
        workflow_name: &str,
        element_name: &str,
    ) -> Result<(), PulseError> {
        let element_id =
            workflow::resolve_element_id(self.session, self.app, workflow_name, element_name)
                .await?;

        let bundle = self.prepare(zip).await?;
        let request = build_remap_request(
            &bundle,
            &RemapPolicy::RuleProjects {
                workflow_element_id: &element_id,
            },
        );

        self.check_schemas(&bundle.import_id, &request).await?;
        self.commit(&bundle.import_id, &request).await?;
        Lifecycle::new(self.session, self.app).update().await
    }

    /// Import plans from a zip archive. Plan executions are carried by ID
    /// only; no workflow element is involved.
    pub async fn import_plans(&self, zip: impl AsRef<Path>) -> Result<(), PulseError> {
        let bundle = self.prepare(zip).await?;
        let request = build_remap_request(&bundle, &RemapPolicy::PlansOnly);

        self.check_schemas(&bundle.import_id, &request).await?;
        self.commit(&bundle.import_id, &request).await?;
        Lifecycle::new(self.session, self.app).update().await
    }

    async fn prepare(&self, zip: impl AsRef<Path>) -> Result<ImportBundle, PulseError> {
        let url = self.session.app_url(self.app, "/partialImportPrepare");
        let resp = transfer::upload(self.session, zip, &url).await?;
        let body = resp.text().await?;

        let bundle: ImportBundle = serde_json::from_str(&body)?;
        if bundle.import_id.is_empty() {
            return Err(PulseError::Decode(
                "prepare response missing importId".to_string(),
            ));
        }

        tracing::debug!(
            app = self.app,
            import_id = %bundle.import_id,
            lists = bundle.lists.len(),
            models = bundle.models.len(),
            plans = bundle.plans.len(),
            rules_projects = bundle.rules_projects.len(),
            "partial import prepared"
        );
        Ok(bundle)
    }

    async fn check_schemas(
        &self,
        import_id: &str,
        request: &SchemaRemapRequest,
    ) -> Result<(), PulseError> {
        let url = self
            .session
            .app_url(self.app, &format!("/partialImportCheckSchemas/{}", import_id));
        let resp = self.session.post_json(&url, request).await?;

        if resp.status() != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::ValidationFailed(format!(
                "schema validation failed: {}",
                body
            )));
        }
        Ok(())
    }

    async fn commit(
        &self,
        import_id: &str,
        request: &SchemaRemapRequest,
    ) -> Result<(), PulseError> {
        let url = self
            .session
            .app_url(self.app, &format!("/partialImportCommit/{}", import_id));
        let resp = self.session.post_json(&url, request).await?;

        if resp.status() != StatusCode::NO_CONTENT {
            let body = resp.text().await.unwrap_or_default();
            return Err(PulseError::CommitFailed(body));
        }

        tracing::info!(app = self.app, import_id, "partial import committed");
        Ok(())
    }
}
