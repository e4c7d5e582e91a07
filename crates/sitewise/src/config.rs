// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Placeholder in `endpoint` substituted with the query's region
pub const REGION_PLACEHOLDER: &str = "{region}";

/// Connection settings for the asset-data service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SitewiseConfig {
    /// Base URL of the service. A `{region}` placeholder is replaced with
    /// the region being queried, e.g. "https://iotsitewise.{region}.amazonaws.com"
    pub endpoint: String,
    /// Region used by queries that do not name one
    pub region: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Cache asset descriptions per region
    #[serde(default = "default_cache_assets")]
    pub cache_assets: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_assets() -> bool {
    true
}

impl Default for SitewiseConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            region: "us-east-1".to_string(),
            request_timeout_secs: default_timeout_secs(),
            cache_assets: default_cache_assets(),
        }
    }
}

impl SitewiseConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Endpoint for `region`; endpoints without a placeholder serve every region
    #[must_use]
    pub fn endpoint_for(&self, region: &str) -> String {
        self.endpoint.replace(REGION_PLACEHOLDER, region)
    }
}

/// Load configuration from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SitewiseConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

    parse_config(&content)
}

/// Parse and validate configuration from YAML text
pub fn parse_config(content: &str) -> Result<SitewiseConfig> {
    let config: SitewiseConfig =
        serde_yaml_ng::from_str(content).with_context(|| "Failed to parse YAML configuration")?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub(crate) fn validate_config(config: &SitewiseConfig) -> Result<()> {
    if config.endpoint.is_empty() {
        anyhow::bail!("endpoint cannot be empty");
    }

    if !(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://")) {
        anyhow::bail!("endpoint must be an http(s) URL, got {}", config.endpoint);
    }

    if config.region.is_empty() {
        anyhow::bail!("region cannot be empty");
    }

    if config.request_timeout_secs == 0 {
        anyhow::bail!("request_timeout_secs must be greater than 0");
    }

    Ok(())
}
