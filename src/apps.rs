//! Whole-application bundle operations: export, delete, and full import
//! followed by the first lifecycle start.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::PulseError;
use crate::lifecycle::Lifecycle;
use crate::session::Session;
use crate::transfer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrepareImportResponse {
    import_id: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportRequest<'a> {
    import_id: &'a str,
    ownership_groups_matching: OwnershipGroupsMatching<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnershipGroupsMatching<'a> {
    import_id: &'a str,
}

/// Stream the whole application bundle into a local file.
pub async fn export_app(
    session: &Session,
    app: &str,
    path: impl AsRef<Path>,
) -> Result<(), PulseError> {
    let url = session.app_url(app, "/export");
    transfer::download(session, &url, path).await
}

/// Delete the application. Non-success surfaces the body verbatim.
pub async fn delete_app(session: &Session, app: &str) -> Result<(), PulseError> {
    let url = session.app_url(app, "");
    let resp = session.delete(&url).await?;

    if !resp.status().is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(PulseError::Platform(body));
    }

    tracing::info!(app, "application deleted");
    Ok(())
}

/// Import a whole application bundle: prepare upload → import with ownership
/// groups matched by import ID → lifecycle start.
pub async fn import_app(
    session: &Session,
    app: &str,
    path: impl AsRef<Path>,
) -> Result<(), PulseError> {
    let prepare_url = session.api_url("/apps/prepareImport");
    let resp = transfer::upload(session, path, &prepare_url).await?;
    let body = resp.text().await?;

    // The prepare response arrives base64-wrapped.
    let decoded = B64.decode(body.trim())?;
    let prepared: PrepareImportResponse = serde_json::from_slice(&decoded)?;
    if !prepared.errors.is_empty() {
        tracing::warn!(
            app,
            import_id = %prepared.import_id,
            errors = prepared.errors.len(),
            "prepare reported errors, proceeding with import"
        );
    }

    let request = ImportRequest {
        import_id: &prepared.import_id,
        ownership_groups_matching: OwnershipGroupsMatching {
            import_id: &prepared.import_id,
        },
    };
    let import_url = session.api_url("/apps/import");
    let resp = session.post_json(&import_url, &request).await?;
    if resp.status() != StatusCode::OK {
        let body = resp.text().await.unwrap_or_default();
        return Err(PulseError::Platform(body));
    }

    tracing::info!(app, import_id = %prepared.import_id, "application imported");
    Lifecycle::new(session, app).start().await
}
