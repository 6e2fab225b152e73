use std::path::{self, Path};

use anyhow::{Context as _, Error, anyhow};
use bytes::Bytes;
use reqwest::get as reqwest_get;
use tokio::fs::read as tokio_fs_read;
use tokio_stream::{Stream, StreamExt as _, once};
use url::Url;

/// Creates a byte stream from a URL.
///
/// Supported URL schemes:
/// - `http`, `https`: Fetched via `reqwest` as a streaming response
/// - `file`: Read from the local filesystem (emitted as a single chunk)
///
/// # Errors
///
/// - Returns `Err` if the URL scheme is unsupported
/// - Returns `Err` if HTTP fetch fails or returns a non-success status
/// - Returns `Err` if the file path is invalid or the file cannot be read
pub async fn stream_url(
    url: &Url,
) -> Result<Box<dyn Stream<Item = Result<Bytes, Error>> + Send + Unpin>, Error> {
    Ok(match url.scheme() {
        "http" | "https" => {
            let response = reqwest_get(url.clone())
                .await
                .map_err(|err| anyhow!("Failed to fetch URL {url}: {err}"))?;

            if !response.status().is_success() {
                return Err(anyhow!(
                    "Failed to fetch URL: {} (Status: {})",
                    url,
                    response.status()
                ));
            }
            let stream = response.bytes_stream().map(|res| match res {
                Ok(bytes) => Ok::<Bytes, Error>(bytes),
                Err(err) => Err::<Bytes, Error>(anyhow!(err)),
            });
            Box::new(stream)
        }
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("Invalid file path for file url: {url}"))?;
            let data = tokio_fs_read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))
                .map(Bytes::from)?;
            let stream = once(Ok::<Bytes, Error>(data));
            Box::new(stream)
        }
        _ => return Err(anyhow!("Unsupported url scheme {}", url.scheme())),
    })
}

/// Download a text resource.
///
/// Invalid UTF-8 is replaced rather than rejected; stylesheets in the wild
/// are not always served in the encoding they declare.
///
/// # Errors
///
/// Any error of [`stream_url`], or of a chunk of its stream.
pub async fn fetch_text(url: &Url) -> Result<String, Error> {
    let mut stream = stream_url(url).await?;
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Interpret a command-line location: an absolute URL, or else a local path.
///
/// # Errors
///
/// Returns `Err` if the path cannot be made absolute.
pub fn resolve_location(location: &str) -> Result<Url, Error> {
    // One-letter schemes are Windows drive letters.
    if let Ok(url) = Url::parse(location)
        && url.scheme().len() > 1
    {
        return Ok(url);
    }
    let absolute = path::absolute(Path::new(location))
        .with_context(|| format!("Cannot resolve path {location}"))?;
    Url::from_file_path(&absolute)
        .map_err(|()| anyhow!("Invalid file path: {}", absolute.display()))
}
