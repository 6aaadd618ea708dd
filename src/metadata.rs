use crate::error::{ResolverError, Result};
use log::debug;
use reqwest::{Client, StatusCode};

pub const DROPLET_ID_METADATA_URL: &str = "http://169.254.169.254/metadata/v1/id";

/// Does a GET on `url` and returns the response body as text.
pub async fn http_get(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| ResolverError::MetadataUnavailable(err.to_string()))?;

    if response.status() != StatusCode::OK {
        return Err(ResolverError::MetadataUnavailable(format!(
            "droplet metadata returned non-200 status code: {}",
            response.status().as_u16()
        )));
    }

    response
        .text()
        .await
        .map_err(|err| ResolverError::MetadataUnavailable(err.to_string()))
}

/// Reads the running droplet's own metadata.
#[derive(Clone)]
pub struct MetadataClient {
    http: Client,
    id_url: String,
}

impl MetadataClient {
    pub fn new(id_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), id_url)
    }

    pub fn with_client(http: Client, id_url: impl Into<String>) -> Self {
        MetadataClient {
            http,
            id_url: id_url.into(),
        }
    }

    pub async fn droplet_id(&self) -> Result<String> {
        let body = http_get(&self.http, &self.id_url).await?;
        let id = body.trim().to_string();
        debug!("droplet metadata reports id {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_http_get_returns_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/v1/hostname");
                then.status(200).body("node-a");
            })
            .await;

        let body = http_get(&Client::new(), &server.url("/metadata/v1/hostname"))
            .await
            .unwrap();

        assert_eq!(body, "node-a");
    }

    #[tokio::test]
    async fn test_droplet_id_is_trimmed() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/v1/id");
                then.status(200).body("3164444\n");
            })
            .await;

        let client = MetadataClient::new(server.url("/metadata/v1/id"));
        let id = client.droplet_id().await.unwrap();

        mock.assert_async().await;
        assert_eq!(id, "3164444");
    }

    #[tokio::test]
    async fn test_non_200_is_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/metadata/v1/id");
                then.status(503);
            })
            .await;

        let client = MetadataClient::new(server.url("/metadata/v1/id"));
        let err = client.droplet_id().await.unwrap_err();

        assert!(matches!(err, ResolverError::MetadataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_unavailable() {
        // nothing listens on port 1
        let client = MetadataClient::new("http://127.0.0.1:1/metadata/v1/id");
        let err = client.droplet_id().await.unwrap_err();

        assert!(matches!(err, ResolverError::MetadataUnavailable(_)));
    }
}
