//! Managed reference list transfer: CSV in, CSV out.

use std::path::Path;

use reqwest::StatusCode;

use crate::error::PulseError;
use crate::session::Session;
use crate::transfer;

/// Upload the contents of a CSV file into the managed list `list_id`.
///
/// The platform answers 204 on success; anything else (duplicate entries,
/// unknown list, ...) surfaces its body verbatim as [`PulseError::Platform`].
pub async fn upload_list(
    session: &Session,
    app: &str,
    list_id: &str,
    path: impl AsRef<Path>,
) -> Result<(), PulseError> {
    if list_id.is_empty() {
        return Err(PulseError::Platform("empty list ID".to_string()));
    }

    let url = session.app_url(app, &format!("/managedlists/{}/managedlistitems", list_id));
    let resp = transfer::upload(session, path, &url).await?;

    if resp.status() != StatusCode::NO_CONTENT {
        let body = resp.text().await.unwrap_or_default();
        return Err(PulseError::Platform(body));
    }

    tracing::info!(app, list_id, "managed list uploaded");
    Ok(())
}

/// Download the managed list `list_id` as CSV into a local file.
pub async fn download_list(
    session: &Session,
    app: &str,
    list_id: &str,
    path: impl AsRef<Path>,
) -> Result<(), PulseError> {
    let url = session.app_url(
        app,
        &format!("/managedlists/{}/managedlistitems/csv", list_id),
    );
    transfer::download(session, &url, path).await
}
