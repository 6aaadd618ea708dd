use crate::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------
// Models
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size_slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub disk: u64,
    #[serde(default)]
    pub networks: Option<Networks>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkV4>,
    #[serde(default)]
    pub v6: Vec<NetworkV6>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkV4 {
    pub ip_address: String,
    #[serde(default)]
    pub netmask: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(rename = "type")]
    pub kind: NetworkKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkV6 {
    pub ip_address: String,
    #[serde(default)]
    pub netmask: u32,
    #[serde(default)]
    pub gateway: String,
    #[serde(rename = "type")]
    pub kind: NetworkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Public,
    Private,
}

impl NetworkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Public => "public",
            NetworkKind::Private => "private",
        }
    }
}

impl Droplet {
    /// First IPv4 address of the given kind, if the droplet has one.
    pub fn ipv4(&self, kind: NetworkKind) -> Option<&str> {
        self.networks
            .as_ref()?
            .v4
            .iter()
            .find(|net| net.kind == kind)
            .map(|net| net.ip_address.as_str())
    }

    pub fn private_ipv4(&self) -> Option<&str> {
        self.ipv4(NetworkKind::Private)
    }

    pub fn public_ipv4(&self) -> Option<&str> {
        self.ipv4(NetworkKind::Public)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            page: 1,
            per_page: 200,
        }
    }
}

/// A decoded API payload together with the HTTP status it came with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub value: T,
    /// Page to request next when listing, `None` on the last page.
    pub next_page: Option<u32>,
}

// -----------------------------------------------------------------------------
// Service
// -----------------------------------------------------------------------------

/// Read access to droplet records.
#[async_trait]
pub trait DropletsService: Send + Sync {
    async fn get(&self, id: u64) -> Result<ApiResponse<Droplet>>;

    async fn list(&self, opts: &ListOptions) -> Result<ApiResponse<Vec<Droplet>>>;
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
