// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Property metadata lookup and frame schema resolution for property
//! value, history and aggregate queries.

use crate::context::QueryContext;
use crate::error::Result;
use crate::framer::aggregate::{AGGREGATE_FIELDS, AggregateFieldSpec, spec_for};
use crate::framer::columns::{ColumnSpec, ResolvedSchema, element_type_for};
use crate::framer::frame_title;
use crate::models::{AssetProperty, AssetPropertyValueQuery, PropertyDataType, QueryType};
use crate::resource::{RegionalResources, ResourceProvider};
use async_trait::async_trait;
use diagnostics::*;
use std::collections::HashSet;
use std::sync::Arc;

/// What schema resolution needs to know about a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    pub property_name: String,
    pub data_type: PropertyDataType,
    pub asset_name: String,
}

impl From<AssetProperty> for PropertyMetadata {
    fn from(property: AssetProperty) -> Self {
        Self {
            property_name: property.asset_property.name,
            data_type: property.asset_property.data_type,
            asset_name: property.asset_name,
        }
    }
}

/// Shape and title of the frame a query produces
pub trait FrameMetadata: Send + Sync {
    fn fields(&self) -> ResolvedSchema;

    fn frame_name(&self) -> String;
}

/// Fetches whatever a query needs before its frame can be shaped
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    type Metadata: FrameMetadata;

    async fn provide(&self, ctx: &QueryContext) -> Result<Self::Metadata>;
}

/// Resolve the ordered output columns for a query against a property.
///
/// The time column always comes first. Value and history queries add one
/// column named after the property and typed by its declared data type.
/// Aggregate queries add one Float64 column per requested aggregate, in
/// registry order; identifiers outside the registry are dropped. Any other
/// query type yields the time column alone.
pub fn resolve_schema(
    query: &AssetPropertyValueQuery,
    metadata: &PropertyMetadata,
) -> ResolvedSchema {
    let schema = match &query.query_type {
        QueryType::PropertyValue | QueryType::PropertyValueHistory => {
            let element_type = element_type_for(&metadata.data_type);
            ResolvedSchema::with_values([ColumnSpec::value(
                metadata.property_name.as_str(),
                element_type,
            )])
        }
        QueryType::PropertyAggregate => ResolvedSchema::with_values(
            requested_aggregates(&query.aggregates)
                .map(|spec| ColumnSpec::value(spec.column_name, spec.element_type)),
        ),
        QueryType::Other(name) => {
            debug!("Query type {name} has no value columns", name: name);
            ResolvedSchema::time_only()
        }
    };

    let column_count = schema.len();
    let query_type = query.query_type.as_str();
    debug!(
        "Resolved {column_count} columns for {query_type} query",
        column_count: column_count,
        query_type: query_type
    );
    schema
}

/// Registry entries present in `requested`, in registry order
fn requested_aggregates(
    requested: &[String],
) -> impl Iterator<Item = &'static AggregateFieldSpec> {
    let wanted: HashSet<&str> = requested.iter().map(String::as_str).collect();

    for identifier in wanted.iter().copied() {
        if spec_for(identifier).is_none() {
            debug!("Ignoring unknown aggregate {identifier}", identifier: identifier);
        }
    }

    AGGREGATE_FIELDS
        .iter()
        .filter(move |spec| wanted.contains(spec.identifier))
}

/// Metadata for a property value, history or aggregate query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPropertyValueMetadata {
    property: PropertyMetadata,
    query: AssetPropertyValueQuery,
}

impl AssetPropertyValueMetadata {
    pub fn new(property: PropertyMetadata, query: AssetPropertyValueQuery) -> Self {
        Self { property, query }
    }

    #[must_use]
    pub fn property(&self) -> &PropertyMetadata {
        &self.property
    }

    #[must_use]
    pub fn query(&self) -> &AssetPropertyValueQuery {
        &self.query
    }
}

impl FrameMetadata for AssetPropertyValueMetadata {
    fn fields(&self) -> ResolvedSchema {
        resolve_schema(&self.query, &self.property)
    }

    fn frame_name(&self) -> String {
        frame_title(&self.property.asset_name, &self.property.property_name)
    }
}

/// Looks up the queried property through a [`ResourceProvider`].
///
/// Nothing is cached here; every `provide` call performs one lookup.
pub struct PropertyValueMetaProvider {
    resources: Arc<dyn ResourceProvider>,
    query: AssetPropertyValueQuery,
}

impl PropertyValueMetaProvider {
    pub fn new(resources: Arc<dyn ResourceProvider>, query: AssetPropertyValueQuery) -> Self {
        Self { resources, query }
    }
}

#[async_trait]
impl MetadataProvider for PropertyValueMetaProvider {
    type Metadata = AssetPropertyValueMetadata;

    async fn provide(&self, ctx: &QueryContext) -> Result<AssetPropertyValueMetadata> {
        let asset_id = self.query.asset_id.as_str();
        let property_id = self.query.property_id.as_str();
        info!(
            "Fetching property {property_id} of asset {asset_id}",
            property_id: property_id,
            asset_id: asset_id
        );

        let property = ctx
            .guard(self.resources.property(ctx, asset_id, property_id))
            .await
            .inspect_err(|e| {
                warn!(
                    "Property lookup for {asset_id}/{property_id} failed: {err}",
                    asset_id: asset_id,
                    property_id: property_id,
                    err: e.to_string().as_str()
                );
            })?;

        Ok(AssetPropertyValueMetadata::new(
            property.into(),
            self.query.clone(),
        ))
    }
}

/// Fetch the queried property's metadata and resolve the frame schema.
///
/// A failed or cancelled fetch is returned as-is and no schema is derived.
pub async fn fetch_metadata_and_resolve(
    ctx: &QueryContext,
    resources: Arc<dyn ResourceProvider>,
    query: &AssetPropertyValueQuery,
) -> Result<ResolvedSchema> {
    let provider = PropertyValueMetaProvider::new(resources, query.clone());
    let metadata = provider.provide(ctx).await?;
    Ok(metadata.fields())
}

/// Resolve the frame schema using the resources of the query's region, or
/// of the default region when the query names none.
pub async fn resolve_in_region(
    ctx: &QueryContext,
    regions: &RegionalResources,
    query: &AssetPropertyValueQuery,
) -> Result<ResolvedSchema> {
    let resources = regions.for_region(query.region.as_deref()).await?;
    fetch_metadata_and_resolve(ctx, resources, query).await
}
