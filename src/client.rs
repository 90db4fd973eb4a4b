use std::path::Path;
use std::time::Duration;

use crate::apps;
use crate::error::PulseError;
use crate::import::PartialImport;
use crate::lifecycle::Lifecycle;
use crate::lists;
use crate::session::{Session, SessionConfig};
use crate::workflow::WorkflowRestart;

/// Everything needed to open an authenticated client against one application.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform base URL, e.g. `https://pulse-stg.example.com`.
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Application name/slug every operation is scoped under.
    pub app: String,
    /// Uniform per-request time limit. `None` means no limit.
    pub timeout: Option<Duration>,
}

/// Facade over one authenticated [`Session`] and one application.
///
/// All components borrow the same session; there is exactly one cookie jar
/// and one transport per client. The client is not internally synchronized —
/// the intended shape is one logical workflow (connect → operate → drop) per
/// instance.
pub struct PulseClient {
    session: Session,
    app: String,
}

impl PulseClient {
    /// Authenticate and return a client. A failed login means no client:
    /// there is no unauthenticated half-state to hold onto.
    pub async fn connect(config: ClientConfig) -> Result<Self, PulseError> {
        let session = Session::authenticate(SessionConfig {
            base_url: config.base_url,
            username: config.username,
            password: config.password,
            timeout: config.timeout,
        })
        .await?;

        Ok(Self {
            session,
            app: config.app,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    /// Lifecycle controller for this application (start/update/progress/abort).
    pub fn lifecycle(&self) -> Lifecycle<'_> {
        Lifecycle::new(&self.session, &self.app)
    }

    /// Partial-import orchestrator for this application.
    pub fn partial_import(&self) -> PartialImport<'_> {
        PartialImport::new(&self.session, &self.app)
    }

    /// Workflow restart sequencer for this application.
    pub fn workflow_restart(&self) -> WorkflowRestart<'_> {
        WorkflowRestart::new(&self.session, &self.app)
    }

    // --------------------------------------------------------------------
    // Managed lists
    // --------------------------------------------------------------------

    /// Upload a CSV file into the managed list `list_id`.
    pub async fn upload_list(
        &self,
        list_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), PulseError> {
        lists::upload_list(&self.session, &self.app, list_id, path).await
    }

    /// Download the managed list `list_id` as CSV.
    pub async fn download_list(
        &self,
        list_id: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), PulseError> {
        lists::download_list(&self.session, &self.app, list_id, path).await
    }

    // --------------------------------------------------------------------
    // Whole-application bundles
    // --------------------------------------------------------------------

    /// Export the application bundle into a local file.
    pub async fn export_app(&self, path: impl AsRef<Path>) -> Result<(), PulseError> {
        apps::export_app(&self.session, &self.app, path).await
    }

    /// Delete the application.
    pub async fn delete_app(&self) -> Result<(), PulseError> {
        apps::delete_app(&self.session, &self.app).await
    }

    /// Import a whole application bundle and start it.
    pub async fn import_app(&self, path: impl AsRef<Path>) -> Result<(), PulseError> {
        apps::import_app(&self.session, &self.app, path).await
    }

    // --------------------------------------------------------------------
    // Partial imports & restart
    // --------------------------------------------------------------------

    /// Partial-import rule projects from a zip archive, remapped onto the
    /// workflow element named `(workflow_name, element_name)`, then redeploy.
    pub async fn import_rule_projects(
        &self,
        zip: impl AsRef<Path>,
        workflow_name: &str,
        element_name: &str,
    ) -> Result<(), PulseError> {
        self.partial_import()
            .import_rule_projects(zip, workflow_name, element_name)
            .await
    }

    /// Partial-import plans from a zip archive, then redeploy.
    pub async fn import_plans(&self, zip: impl AsRef<Path>) -> Result<(), PulseError> {
        self.partial_import().import_plans(zip).await
    }

    /// Re-validate and re-stage the current workflow unchanged, then redeploy.
    pub async fn restart_workflow(&self) -> Result<(), PulseError> {
        self.workflow_restart().restart().await
    }
}
