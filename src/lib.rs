//! Droplet lookups for the cluster node-lifecycle controller: node addresses,
//! provider IDs and instance types, resolved against the DigitalOcean API and
//! the droplet metadata service.

pub mod config;
pub mod digitalocean;
pub mod droplet;
pub mod error;
pub mod instances;
pub mod metadata;

pub use config::Config;
pub use digitalocean::DigitalOceanClient;
pub use droplet::{Droplet, DropletsService, ListOptions};
pub use error::ResolverError;
pub use instances::{DropletInstances, Instances, NodeAddress, NodeAddressType, NodeName};
pub use metadata::MetadataClient;

use std::sync::Arc;

/// Wires the API and metadata clients described by `config` into a resolver.
pub fn droplet_instances(config: &Config) -> DropletInstances {
    let http = reqwest::Client::new();
    let droplets = DigitalOceanClient::with_client(
        http.clone(),
        config.api_url.clone(),
        config.access_token.clone(),
    );
    let metadata = MetadataClient::with_client(http, config.metadata_url.as_str());

    DropletInstances::new(Arc::new(droplets), metadata)
}
