use crate::droplet::{ApiResponse, Droplet, DropletsService, ListOptions};
use crate::error::{ResolverError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

// -----------------------------------------------------------------------------
// Models
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DropletRoot {
    droplet: Droplet,
}

#[derive(Debug, Deserialize)]
struct DropletsRoot {
    #[serde(default)]
    droplets: Vec<Droplet>,
    #[serde(default)]
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
struct Links {
    #[serde(default)]
    pages: Pages,
}

#[derive(Debug, Default, Deserialize)]
struct Pages {
    next: Option<String>,
}

// -----------------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------------

/// `DropletsService` backed by the DigitalOcean v2 REST API.
#[derive(Clone)]
pub struct DigitalOceanClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl DigitalOceanClient {
    pub fn new(base_url: Url, token: String) -> Self {
        Self::with_client(Client::new(), base_url, token)
    }

    pub fn with_client(http: Client, base_url: Url, token: String) -> Self {
        DigitalOceanClient {
            http,
            base_url,
            token,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ResolverError::Upstream(format!("bad api url: {}", err)))
    }

    async fn send(&self, url: Url) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| ResolverError::Upstream(format!("failed to decode response: {}", err)))
}

#[async_trait]
impl DropletsService for DigitalOceanClient {
    async fn get(&self, id: u64) -> Result<ApiResponse<Droplet>> {
        let url = self.endpoint(&format!("v2/droplets/{}", id))?;
        let response = self.send(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(ApiResponse {
                status,
                value: Droplet::default(),
                next_page: None,
            });
        }

        let root: DropletRoot = decode(response).await?;
        Ok(ApiResponse {
            status,
            value: root.droplet,
            next_page: None,
        })
    }

    async fn list(&self, opts: &ListOptions) -> Result<ApiResponse<Vec<Droplet>>> {
        let mut url = self.endpoint("v2/droplets")?;
        url.query_pairs_mut()
            .append_pair("page", &opts.page.to_string())
            .append_pair("per_page", &opts.per_page.to_string());

        let response = self.send(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(ApiResponse {
                status,
                value: vec![],
                next_page: None,
            });
        }

        let root: DropletsRoot = decode(response).await?;
        let next_page = root.links.pages.next.map(|_| opts.page + 1);

        Ok(ApiResponse {
            status,
            value: root.droplets,
            next_page,
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
