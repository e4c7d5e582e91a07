// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Metadata lookups used while building frames.

use crate::client::{HttpSitewiseClient, SitewiseClient};
use crate::config::SitewiseConfig;
use crate::context::QueryContext;
use crate::describe::{get_asset_description, get_asset_property_description};
use crate::error::Result;
use crate::models::{
    AssetDescription, AssetProperty, DescribeAssetPropertyQuery, DescribeAssetQuery,
};
use async_trait::async_trait;
use diagnostics::*;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Source of asset and property descriptions.
///
/// Callers bound each lookup with [`QueryContext::guard`]; implementations
/// receive the context but do not guard again.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn asset(&self, ctx: &QueryContext, asset_id: &str) -> Result<AssetDescription>;

    async fn property(
        &self,
        ctx: &QueryContext,
        asset_id: &str,
        property_id: &str,
    ) -> Result<AssetProperty>;
}

/// Resource provider backed directly by the service client of one region
pub struct SitewiseResources {
    client: Arc<dyn SitewiseClient>,
}

impl SitewiseResources {
    pub fn new(client: Arc<dyn SitewiseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceProvider for SitewiseResources {
    async fn asset(&self, _ctx: &QueryContext, asset_id: &str) -> Result<AssetDescription> {
        let query = DescribeAssetQuery {
            asset_id: asset_id.to_string(),
        };
        get_asset_description(self.client.as_ref(), &query).await
    }

    async fn property(
        &self,
        _ctx: &QueryContext,
        asset_id: &str,
        property_id: &str,
    ) -> Result<AssetProperty> {
        let query = DescribeAssetPropertyQuery {
            asset_id: asset_id.to_string(),
            property_id: property_id.to_string(),
        };
        get_asset_property_description(self.client.as_ref(), &query).await
    }
}

/// Caches asset descriptions in front of another provider.
///
/// Property lookups are always forwarded so that the data type used for
/// schema resolution is read fresh for every query. [`RegionalResources`]
/// keeps one instance per region.
pub struct CachedResources<P> {
    inner: P,
    assets_by_id: RwLock<HashMap<String, AssetDescription>>,
}

impl<P: ResourceProvider> CachedResources<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            assets_by_id: RwLock::new(HashMap::new()),
        }
    }

    pub async fn cached_assets(&self) -> usize {
        self.assets_by_id.read().await.len()
    }

    pub async fn invalidate(&self, asset_id: &str) {
        _ = self.assets_by_id.write().await.remove(asset_id);
    }
}

#[async_trait]
impl<P: ResourceProvider> ResourceProvider for CachedResources<P> {
    async fn asset(&self, ctx: &QueryContext, asset_id: &str) -> Result<AssetDescription> {
        if let Some(asset) = self.assets_by_id.read().await.get(asset_id) {
            debug!("Asset cache hit for {asset_id}", asset_id: asset_id);
            return Ok(asset.clone());
        }

        // Failed lookups are not cached.
        let asset = self.inner.asset(ctx, asset_id).await?;
        _ = self
            .assets_by_id
            .write()
            .await
            .insert(asset_id.to_string(), asset.clone());
        Ok(asset)
    }

    async fn property(
        &self,
        ctx: &QueryContext,
        asset_id: &str,
        property_id: &str,
    ) -> Result<AssetProperty> {
        self.inner.property(ctx, asset_id, property_id).await
    }
}

type ProviderFactory = dyn Fn(&str) -> Result<Arc<dyn ResourceProvider>> + Send + Sync;

/// Resource providers keyed by region, each created on first use.
///
/// Queries that name no region use the default region.
pub struct RegionalResources {
    default_region: String,
    factory: Box<ProviderFactory>,
    providers: RwLock<HashMap<String, Arc<dyn ResourceProvider>>>,
}

impl RegionalResources {
    pub fn new<F>(default_region: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&str) -> Result<Arc<dyn ResourceProvider>> + Send + Sync + 'static,
    {
        Self {
            default_region: default_region.into(),
            factory: Box::new(factory),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// HTTP-backed providers built from `config`, see [`provider_for_region`]
    #[must_use]
    pub fn from_config(config: &SitewiseConfig) -> Self {
        let config = config.clone();
        let default_region = config.region.clone();
        Self::new(default_region, move |region| provider_for_region(&config, region))
    }

    #[must_use]
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Provider for `region`, or for the default region when none is given
    pub async fn for_region(&self, region: Option<&str>) -> Result<Arc<dyn ResourceProvider>> {
        let region = match region {
            Some(region) if !region.is_empty() => region,
            _ => self.default_region.as_str(),
        };

        if let Some(provider) = self.providers.read().await.get(region) {
            return Ok(provider.clone());
        }

        let mut providers = self.providers.write().await;
        if let Some(provider) = providers.get(region) {
            return Ok(provider.clone());
        }

        debug!("Creating resources for region {region}", region: region);
        let provider = (self.factory)(region)?;
        _ = providers.insert(region.to_string(), provider.clone());
        Ok(provider)
    }

    /// Regions with a provider, sorted
    pub async fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.providers.read().await.keys().cloned().collect();
        regions.sort();
        regions
    }
}

/// HTTP-backed provider for one region, wrapped in an asset cache when
/// `cache_assets` is set.
pub fn provider_for_region(
    config: &SitewiseConfig,
    region: &str,
) -> Result<Arc<dyn ResourceProvider>> {
    let client = Arc::new(HttpSitewiseClient::for_region(config, region)?);
    let resources = SitewiseResources::new(client);

    if config.cache_assets {
        Ok(Arc::new(CachedResources::new(resources)))
    } else {
        Ok(Arc::new(resources))
    }
}
