use thiserror::Error;

/// Errors returned by the droplet lookups.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The local metadata service could not be reached or answered with a non-200 status.
    #[error("droplet metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("invalid droplet id {0:?}: not an integer")]
    InvalidId(String),

    /// The DigitalOcean API call failed or returned a non-200 status.
    #[error("DO API error: {0}")]
    Upstream(String),

    #[error("could not get {0} ip")]
    MissingAddress(&'static str),

    /// No droplet matches the node. The host treats this as "instance no longer exists".
    #[error("instance not found")]
    InstanceNotFound,

    #[error("not implemented yet")]
    NotImplemented,
}

impl ResolverError {
    pub fn is_instance_not_found(&self) -> bool {
        matches!(self, ResolverError::InstanceNotFound)
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        ResolverError::Upstream(err.to_string())
    }
}

pub type Result<T, E = ResolverError> = std::result::Result<T, E>;
