//! Upload of results to the minification service's CDN.

use log::info;
use reqwest::Client;
use thiserror::Error;

/// The upload was refused, either locally or by the service.
#[derive(Debug, Error)]
pub enum RemoteFailure {
    #[error("an API key is required for CDN uploads")]
    MissingApiKey,
    #[error("CDN file name `{0}` must end with '.css'")]
    InvalidName(String),
    #[error("CDN request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CDN rejected the upload with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Where an uploaded stylesheet is served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdnUpload {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct CdnClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CdnClient {
    /// # Errors
    ///
    /// Returns [`RemoteFailure::MissingApiKey`] when `api_key` is blank.
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, RemoteFailure> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RemoteFailure::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            endpoint: endpoint.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// Post `css` as `filename` and return the URL the service answers with.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteFailure`] when the name is not a `.css` file name, the
    /// request fails, or the service answers with an error status.
    pub async fn upload(&self, css: &str, filename: &str) -> Result<CdnUpload, RemoteFailure> {
        validate_name(filename)?;
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("apikey", self.api_key.as_str()),
                ("css", css),
                ("mode", "cdn"),
                ("name", filename),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RemoteFailure::Status {
                status: status.as_u16(),
                body,
            });
        }
        let url = body.trim().to_owned();
        info!("Uploaded {filename} to {url}");
        Ok(CdnUpload { url })
    }
}

fn validate_name(filename: &str) -> Result<(), RemoteFailure> {
    if filename.to_lowercase().ends_with(".css") {
        Ok(())
    } else {
        Err(RemoteFailure::InvalidName(filename.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_api_key_is_refused() {
        assert!(matches!(
            CdnClient::new("http://localhost/", "  "),
            Err(RemoteFailure::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn names_must_be_stylesheets() -> Result<(), RemoteFailure> {
        let client = CdnClient::new("http://localhost/", "key")?;
        let refused = client.upload("p{color:red}", "site.js").await;
        assert!(matches!(refused, Err(RemoteFailure::InvalidName(name)) if name == "site.js"));
        assert!(validate_name("SITE.CSS").is_ok());
        Ok(())
    }
}
