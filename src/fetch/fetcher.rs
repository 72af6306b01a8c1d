use crate::fetch::error::FetchError;
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Retrieves the dataset's JSON body, either over HTTP or from a local file.
///
/// Only transport and JSON syntax are checked here; the shape of the body is
/// validated by [`crate::RawDataset::from_envelope`].
pub struct DatasetFetcher {
    endpoint: String,
    client: Client,
}

impl DatasetFetcher {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::ClientBuild)?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// Performs one GET against the endpoint and parses the body as JSON.
    /// No retries.
    pub async fn fetch(&self) -> Result<Value, FetchError> {
        let url = self.endpoint.as_str();
        info!("Fetching temperature dataset from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(url.to_string(), e))?;
        debug!("Received {} bytes from {}", bytes.len(), url);

        serde_json::from_slice(&bytes).map_err(|e| FetchError::Parse(url.to_string(), e))
    }

    /// Reads a dataset body from disk. The file has the same shape as the
    /// endpoint's response.
    pub async fn read_file(path: &Path) -> Result<Value, FetchError> {
        info!("Reading temperature dataset from {}", path.display());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FetchError::ReadFile(path.to_path_buf(), e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Parse(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{refused_url, serve_once, SAMPLE_BODY};

    #[tokio::test]
    async fn test_fetch_success() -> Result<(), FetchError> {
        let url = serve_once("200 OK", SAMPLE_BODY).await;
        let fetcher = DatasetFetcher::new(&url, Some(Duration::from_secs(10)))?;

        let body = fetcher.fetch().await?;
        assert_eq!(body["data"]["baseTemperature"], 8.66);
        assert_eq!(
            body["data"]["monthlyVariance"].as_array().map(Vec::len),
            Some(4)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() -> Result<(), FetchError> {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let fetcher = DatasetFetcher::new(&url, None)?;

        let err = fetcher.fetch().await.unwrap_err();
        assert!(
            matches!(&err, FetchError::HttpStatus { status, .. } if status.as_u16() == 500),
            "unexpected error: {err:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() -> Result<(), FetchError> {
        let url = serve_once("200 OK", "<html>not json</html>").await;
        let fetcher = DatasetFetcher::new(&url, None)?;

        let err = fetcher.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(..)), "unexpected error: {err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() -> Result<(), FetchError> {
        let fetcher = DatasetFetcher::new(&refused_url().await, None)?;

        let err = fetcher.fetch().await.unwrap_err();
        assert!(
            matches!(err, FetchError::NetworkRequest(..)),
            "unexpected error: {err:?}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_read_file() -> Result<(), FetchError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        tokio::fs::write(&path, SAMPLE_BODY).await.unwrap();

        let body = DatasetFetcher::read_file(&path).await?;
        assert_eq!(body["data"]["monthlyVariance"][2]["month"], 12);

        let missing = DatasetFetcher::read_file(&dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(FetchError::ReadFile(..))));
        Ok(())
    }
}
