use crate::droplet::{Droplet, DropletsService, ListOptions, NetworkKind};
use crate::error::{ResolverError, Result};
use crate::metadata::MetadataClient;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// -----------------------------------------------------------------------------
// Models
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeName(pub String);

impl NodeName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeName {
    fn from(value: &str) -> Self {
        NodeName(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeAddressType {
    Hostname,
    InternalIP,
    ExternalIP,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddress {
    #[serde(rename = "type")]
    pub kind: NodeAddressType,
    pub address: String,
}

impl NodeAddress {
    pub fn new(kind: NodeAddressType, address: impl Into<String>) -> Self {
        NodeAddress {
            kind,
            address: address.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// Host contract
// -----------------------------------------------------------------------------

/// Instance lookups required by the cluster node-lifecycle controller.
#[async_trait]
pub trait Instances: Send + Sync {
    /// Addresses of the node this process runs on. `name` is not consulted.
    async fn node_addresses(&self, name: &NodeName) -> Result<Vec<NodeAddress>>;

    async fn node_addresses_by_provider_id(&self, provider_id: &str) -> Result<Vec<NodeAddress>>;

    /// Provider ID of the named node, or `InstanceNotFound` if it no longer exists.
    async fn external_id(&self, name: &NodeName) -> Result<String>;

    async fn instance_id(&self, name: &NodeName) -> Result<String>;

    async fn instance_type(&self, name: &NodeName) -> Result<String>;

    async fn instance_type_by_provider_id(&self, provider_id: &str) -> Result<String>;

    /// Expected key format is standard ssh-keygen: `<protocol> <blob>`.
    async fn add_ssh_key_to_all_instances(&self, user: &str, key_data: &[u8]) -> Result<()>;

    async fn current_node_name(&self, hostname: &str) -> Result<NodeName>;
}

// -----------------------------------------------------------------------------
// Droplet implementation
// -----------------------------------------------------------------------------

#[derive(Clone)]
pub struct DropletInstances {
    droplets: Arc<dyn DropletsService>,
    metadata: MetadataClient,
}

impl DropletInstances {
    pub fn new(droplets: Arc<dyn DropletsService>, metadata: MetadataClient) -> Self {
        DropletInstances { droplets, metadata }
    }

    async fn droplet_by_id(&self, id: &str) -> Result<Droplet> {
        // droplet ids are positive, so a negative id is rejected here rather than by the API
        let id: u64 = id
            .parse()
            .map_err(|_| ResolverError::InvalidId(id.to_string()))?;

        let response = self.droplets.get(id).await?;
        check_status(response.status)?;

        Ok(response.value)
    }

    // Droplets can only be fetched by id, so walk the listing and take the
    // first exact name match.
    // TODO: list by tag once a node tagging format is settled.
    async fn droplet_by_name(&self, name: &NodeName) -> Result<Droplet> {
        let mut opts = ListOptions::default();

        loop {
            let response = self.droplets.list(&opts).await?;
            check_status(response.status)?;

            if let Some(droplet) = response
                .value
                .into_iter()
                .find(|droplet| droplet.name == name.as_str())
            {
                return Ok(droplet);
            }

            match response.next_page {
                Some(page) => opts.page = page,
                None => break,
            }
        }

        debug!("no droplet named {}", name);
        Err(ResolverError::InstanceNotFound)
    }
}

fn check_status(status: StatusCode) -> Result<()> {
    if status != StatusCode::OK {
        return Err(ResolverError::Upstream(format!(
            "DO API returned non-200 status code: {}",
            status.as_u16()
        )));
    }
    Ok(())
}

#[async_trait]
impl Instances for DropletInstances {
    async fn node_addresses(&self, _name: &NodeName) -> Result<Vec<NodeAddress>> {
        let self_id = self.metadata.droplet_id().await?;
        self.node_addresses_by_provider_id(&self_id).await
    }

    async fn node_addresses_by_provider_id(&self, provider_id: &str) -> Result<Vec<NodeAddress>> {
        let droplet = self.droplet_by_id(provider_id).await?;

        let private_ip = droplet
            .private_ipv4()
            .filter(|ip| !ip.is_empty())
            .ok_or(ResolverError::MissingAddress(NetworkKind::Private.as_str()))?;
        let public_ip = droplet
            .public_ipv4()
            .filter(|ip| !ip.is_empty())
            .ok_or(ResolverError::MissingAddress(NetworkKind::Public.as_str()))?;

        Ok(vec![
            NodeAddress::new(NodeAddressType::Hostname, droplet.name.as_str()),
            NodeAddress::new(NodeAddressType::InternalIP, private_ip),
            NodeAddress::new(NodeAddressType::ExternalIP, public_ip),
        ])
    }

    async fn external_id(&self, name: &NodeName) -> Result<String> {
        self.instance_id(name).await
    }

    async fn instance_id(&self, name: &NodeName) -> Result<String> {
        debug!("looking up instance id of {}", name);
        let droplet = self.droplet_by_name(name).await?;
        Ok(droplet.id.to_string())
    }

    async fn instance_type(&self, name: &NodeName) -> Result<String> {
        debug!("looking up instance type of {}", name);
        let droplet = self.droplet_by_name(name).await?;
        Ok(droplet.size_slug)
    }

    async fn instance_type_by_provider_id(&self, provider_id: &str) -> Result<String> {
        let droplet = self.droplet_by_id(provider_id).await?;
        Ok(droplet.size_slug)
    }

    async fn add_ssh_key_to_all_instances(&self, _user: &str, _key_data: &[u8]) -> Result<()> {
        Err(ResolverError::NotImplemented)
    }

    async fn current_node_name(&self, hostname: &str) -> Result<NodeName> {
        Ok(NodeName(hostname.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
