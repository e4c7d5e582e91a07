// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Frame schema resolution for industrial asset property queries.
//!
//! Given a property value, history or aggregate query, this crate looks up
//! the property's declared data type and derives the ordered, typed columns
//! of the frame the query will produce, before any values are fetched.

pub mod client;
pub mod config;
pub mod context;
pub mod describe;
pub mod error;
pub mod framer;
pub mod models;
pub mod resource;

pub use crate::client::{HttpSitewiseClient, SitewiseClient};
pub use crate::config::{SitewiseConfig, load_config};
pub use crate::context::QueryContext;
pub use crate::error::{Result, SitewiseError};
pub use crate::framer::{
    ColumnElementType, ColumnSpec, FrameMetadata, MetadataProvider, PropertyMetadata,
    ResolvedSchema, fetch_metadata_and_resolve, frame_title, resolve_in_region, resolve_schema,
};
pub use crate::models::{
    AssetDescription, AssetProperty, AssetPropertyValueQuery, PropertyDataType, QueryType,
};
pub use crate::resource::{
    CachedResources, RegionalResources, ResourceProvider, SitewiseResources, provider_for_region,
};
pub use diagnostics::init_diagnostics as init_logging;

use std::sync::Arc;

fn checked(config: &SitewiseConfig) -> Result<()> {
    config::validate_config(config).map_err(|e| SitewiseError::InvalidConfig(e.to_string()))
}

/// Build the resource provider for the configured default region: an HTTP
/// client, wrapped in an asset cache when `cache_assets` is set.
pub fn resources_from_config(config: &SitewiseConfig) -> Result<Arc<dyn ResourceProvider>> {
    checked(config)?;
    provider_for_region(config, &config.region)
}

/// Per-region resource providers for queries that may name their own region
pub fn regional_resources_from_config(config: &SitewiseConfig) -> Result<RegionalResources> {
    checked(config)?;
    Ok(RegionalResources::from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_from_config_rejects_invalid() {
        let config = SitewiseConfig {
            region: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            resources_from_config(&config),
            Err(SitewiseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_resources_from_default_config() {
        assert!(resources_from_config(&SitewiseConfig::default()).is_ok());
    }

    #[test]
    fn test_regional_resources_from_config() {
        let regional = regional_resources_from_config(&SitewiseConfig::default()).unwrap();
        assert_eq!(regional.default_region(), "us-east-1");

        let config = SitewiseConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            regional_resources_from_config(&config),
            Err(SitewiseError::InvalidConfig(_))
        ));
    }
}
