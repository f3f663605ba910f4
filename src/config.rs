use std::path::PathBuf;

use serde::Deserialize;

use crate::catalog::CatalogSettings;
use crate::services::discovery::DEFAULT_SPOTLIGHT_ARTISTS;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Catalog CSV file, created with sample data if missing
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Number of songs in a generated catalog
    #[serde(default = "default_catalog_size")]
    pub catalog_size: usize,

    /// Seed for catalog generation; random when unset
    #[serde(default)]
    pub catalog_seed: Option<u64>,

    /// Recommendations returned when the request does not say
    #[serde(default = "default_recommendations")]
    pub default_recommendations: usize,

    /// Upper bound on recommendations per request
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,

    /// Songs per artist group in the discovery feed
    #[serde(default = "default_discovery_per_group")]
    pub discovery_per_group: usize,

    /// Comma-separated list of artists featured in the discovery feed
    #[serde(default = "default_spotlight_artists")]
    pub spotlight_artists: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data.csv")
}

fn default_catalog_size() -> usize {
    50
}

fn default_recommendations() -> usize {
    5
}

fn default_max_recommendations() -> usize {
    50
}

fn default_discovery_per_group() -> usize {
    5
}

fn default_spotlight_artists() -> Vec<String> {
    DEFAULT_SPOTLIGHT_ARTISTS
        .iter()
        .map(|artist| artist.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            catalog_size: default_catalog_size(),
            catalog_seed: None,
            default_recommendations: default_recommendations(),
            max_recommendations: default_max_recommendations(),
            discovery_per_group: default_discovery_per_group(),
            spotlight_artists: default_spotlight_artists(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_recommendations == 0
            || config.default_recommendations > config.max_recommendations
        {
            anyhow::bail!(
                "DEFAULT_RECOMMENDATIONS must be between 1 and MAX_RECOMMENDATIONS ({})",
                config.max_recommendations
            );
        }

        Ok(config)
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            path: self.catalog_path.clone(),
            size: self.catalog_size,
            seed: self.catalog_seed,
        }
    }
}
