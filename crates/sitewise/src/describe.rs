// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Describe-asset and describe-property query handlers.
//!
//! Cancellation and timeouts are applied by the caller, once per lookup.

use crate::client::SitewiseClient;
use crate::error::Result;
use crate::models::{
    AssetDescription, AssetProperty, DescribeAssetPropertyQuery, DescribeAssetQuery,
};
use diagnostics::*;

pub async fn get_asset_description(
    client: &dyn SitewiseClient,
    query: &DescribeAssetQuery,
) -> Result<AssetDescription> {
    let asset_id = query.asset_id.as_str();
    debug!("Describing asset {asset_id}", asset_id: asset_id);

    let asset = client.describe_asset(asset_id).await?;

    let property_count = asset.asset_properties.len();
    debug!(
        "Asset {asset_id} has {property_count} properties",
        asset_id: asset_id,
        property_count: property_count
    );
    Ok(asset)
}

pub async fn get_asset_property_description(
    client: &dyn SitewiseClient,
    query: &DescribeAssetPropertyQuery,
) -> Result<AssetProperty> {
    let asset_id = query.asset_id.as_str();
    let property_id = query.property_id.as_str();
    debug!(
        "Describing property {property_id} of asset {asset_id}",
        property_id: property_id,
        asset_id: asset_id
    );

    client.describe_asset_property(asset_id, property_id).await
}
