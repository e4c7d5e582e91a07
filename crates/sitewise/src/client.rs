// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::SitewiseConfig;
use crate::error::{Result, SitewiseError};
use crate::models::{AssetDescription, AssetProperty};
use async_trait::async_trait;
use diagnostics::*;
use reqwest::Url;

/// The two describe calls this crate needs from the asset-data service
#[async_trait]
pub trait SitewiseClient: Send + Sync {
    async fn describe_asset(&self, asset_id: &str) -> Result<AssetDescription>;

    async fn describe_asset_property(
        &self,
        asset_id: &str,
        property_id: &str,
    ) -> Result<AssetProperty>;
}

/// HTTP client for the service's REST describe endpoints.
///
/// No retries, pagination or request signing happen here.
#[derive(Debug, Clone)]
pub struct HttpSitewiseClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpSitewiseClient {
    /// Client for the configured default region
    pub fn new(config: &SitewiseConfig) -> Result<Self> {
        Self::for_region(config, &config.region)
    }

    /// Client whose endpoint is `config.endpoint` with `{region}` filled in
    pub fn for_region(config: &SitewiseConfig, region: &str) -> Result<Self> {
        let endpoint = config.endpoint_for(region);
        let base_url = Url::parse(endpoint.trim_end_matches('/')).map_err(|e| {
            SitewiseError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SitewiseError::InvalidConfig(format!(
                "endpoint {endpoint} cannot carry a path"
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Base URL with `segments` appended, each percent-encoded as one path
    /// segment so ids cannot change the request target.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            _ = path.pop_if_empty().extend(segments);
        }
        url
    }

    fn asset_url(&self, asset_id: &str) -> Url {
        self.endpoint_url(&["assets", asset_id])
    }

    fn asset_property_url(&self, asset_id: &str, property_id: &str) -> Url {
        self.endpoint_url(&["assets", asset_id, "properties", property_id])
    }

    async fn fetch_json<T>(&self, url: Url, resource: &str) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        debug!("GET {url}", url: url.as_str());
        let response = self.http_client.get(url.clone()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SitewiseError::not_found(resource));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SitewiseError::Http {
                status: status.as_u16(),
                url: url.into(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SitewiseClient for HttpSitewiseClient {
    async fn describe_asset(&self, asset_id: &str) -> Result<AssetDescription> {
        let url = self.asset_url(asset_id);
        self.fetch_json(url, &format!("asset {asset_id}")).await
    }

    async fn describe_asset_property(
        &self,
        asset_id: &str,
        property_id: &str,
    ) -> Result<AssetProperty> {
        let url = self.asset_property_url(asset_id, property_id);
        self.fetch_json(url, &format!("property {property_id} of asset {asset_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let config = SitewiseConfig {
            endpoint: "https://iotsitewise.us-east-1.amazonaws.com/".to_string(),
            ..Default::default()
        };
        let client = HttpSitewiseClient::new(&config).unwrap();

        assert_eq!(
            client.base_url(),
            "https://iotsitewise.us-east-1.amazonaws.com"
        );
        assert_eq!(
            client.asset_url("a1").as_str(),
            "https://iotsitewise.us-east-1.amazonaws.com/assets/a1"
        );
        assert_eq!(
            client.asset_property_url("a1", "p1").as_str(),
            "https://iotsitewise.us-east-1.amazonaws.com/assets/a1/properties/p1"
        );
    }

    #[test]
    fn test_url_region_template() {
        let config = SitewiseConfig {
            endpoint: "https://iotsitewise.{region}.amazonaws.com".to_string(),
            ..Default::default()
        };

        let default = HttpSitewiseClient::new(&config).unwrap();
        assert_eq!(default.base_url(), "https://iotsitewise.us-east-1.amazonaws.com");

        let eu = HttpSitewiseClient::for_region(&config, "eu-west-1").unwrap();
        assert_eq!(
            eu.asset_url("a1").as_str(),
            "https://iotsitewise.eu-west-1.amazonaws.com/assets/a1"
        );
    }

    #[test]
    fn test_ids_are_encoded_as_single_segments() {
        let config = SitewiseConfig {
            endpoint: "http://localhost:8080/sitewise".to_string(),
            ..Default::default()
        };
        let client = HttpSitewiseClient::new(&config).unwrap();

        let url = client.asset_property_url("a1", "../p?x=1#frag");
        assert_eq!(url.path(), "/sitewise/assets/a1/properties/..%2Fp%3Fx=1%23frag");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        assert_eq!(client.asset_url("a/b").path(), "/sitewise/assets/a%2Fb");
    }

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let config = SitewiseConfig {
            endpoint: "http://[not-an-address".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpSitewiseClient::new(&config),
            Err(SitewiseError::InvalidConfig(_))
        ));
    }
}
