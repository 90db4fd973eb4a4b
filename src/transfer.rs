//! Single-file upload/download primitives shared by every higher-level
//! operation. No retries, no checksums: a transport failure surfaces as-is.

use std::path::Path;

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::PulseError;
use crate::session::Session;

/// Stream a local file to `url` as a single multipart form field named
/// `file`, using the file's base name as the form filename.
///
/// Status handling is the caller's concern; this returns the raw response.
pub async fn upload(
    session: &Session,
    path: impl AsRef<Path>,
    url: &str,
) -> Result<reqwest::Response, PulseError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let part = reqwest::multipart::Part::stream(body).file_name(filename);
    let form = reqwest::multipart::Form::new().part("file", part);

    tracing::debug!(path = %path.display(), url, "uploading file");
    session.post_multipart(url, form).await
}

/// Stream the response body of `url` into a newly created local file,
/// truncating anything already at that path.
pub async fn download(
    session: &Session,
    url: &str,
    path: impl AsRef<Path>,
) -> Result<(), PulseError> {
    let path = path.as_ref();
    let resp = session.get(url).await?;

    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = resp.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    tracing::debug!(path = %path.display(), url, "download complete");
    Ok(())
}
