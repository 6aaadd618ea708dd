use crate::metadata::DROPLET_ID_METADATA_URL;
use anyhow::Context;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub access_token: String,
    pub metadata_url: Url,
}

impl Config {
    /// Reads `DO_ACCESS_TOKEN`, `DO_API_URL` and `DO_METADATA_URL`, loading `.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| dotenvy::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = var("DO_ACCESS_TOKEN")
            .filter(|token| !token.is_empty())
            .context("DO_ACCESS_TOKEN not found in environment variables.")?;

        let mut api_url = var("DO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        // endpoints are joined onto the base, which drops a last segment without a slash
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        let api_url = Url::parse(&api_url).context("DO_API_URL is not a valid url")?;

        let metadata_url =
            var("DO_METADATA_URL").unwrap_or_else(|| DROPLET_ID_METADATA_URL.to_string());
        let metadata_url =
            Url::parse(&metadata_url).context("DO_METADATA_URL is not a valid url")?;

        Ok(Config {
            api_url,
            access_token,
            metadata_url,
        })
    }
}
