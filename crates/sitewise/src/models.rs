// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Wire models for the asset-data service and the telemetry query.
//!
//! Enumerations that arrive as strings keep unrecognized values in an
//! `Other` variant rather than failing to deserialize, so the schema
//! resolver can apply its documented fallbacks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared scalar type of an asset property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyDataType {
    Boolean,
    Double,
    Integer,
    String,
    Other(String),
}

impl From<String> for PropertyDataType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BOOLEAN" => PropertyDataType::Boolean,
            "DOUBLE" => PropertyDataType::Double,
            "INTEGER" => PropertyDataType::Integer,
            "STRING" => PropertyDataType::String,
            _ => PropertyDataType::Other(value),
        }
    }
}

impl From<&str> for PropertyDataType {
    fn from(value: &str) -> Self {
        PropertyDataType::from(value.to_string())
    }
}

impl From<PropertyDataType> for String {
    fn from(value: PropertyDataType) -> Self {
        value.as_str().to_string()
    }
}

impl PropertyDataType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyDataType::Boolean => "BOOLEAN",
            PropertyDataType::Double => "DOUBLE",
            PropertyDataType::Integer => "INTEGER",
            PropertyDataType::String => "STRING",
            PropertyDataType::Other(name) => name,
        }
    }
}

impl fmt::Display for PropertyDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of telemetry query issued against a single asset property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QueryType {
    /// Latest value
    PropertyValue,
    /// Raw values over a time range
    PropertyValueHistory,
    /// Time-windowed aggregates
    PropertyAggregate,
    /// Any other query type the plugin knows about (asset listings, etc.)
    Other(String),
}

impl From<String> for QueryType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PropertyValue" => QueryType::PropertyValue,
            "PropertyValueHistory" => QueryType::PropertyValueHistory,
            "PropertyAggregate" => QueryType::PropertyAggregate,
            _ => QueryType::Other(value),
        }
    }
}

impl From<&str> for QueryType {
    fn from(value: &str) -> Self {
        QueryType::from(value.to_string())
    }
}

impl From<QueryType> for String {
    fn from(value: QueryType) -> Self {
        value.as_str().to_string()
    }
}

impl QueryType {
    pub fn as_str(&self) -> &str {
        match self {
            QueryType::PropertyValue => "PropertyValue",
            QueryType::PropertyValueHistory => "PropertyValueHistory",
            QueryType::PropertyAggregate => "PropertyAggregate",
            QueryType::Other(name) => name,
        }
    }
}

/// Query against one asset property, as sent by the dashboard
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPropertyValueQuery {
    pub query_type: QueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub asset_id: String,
    pub property_id: String,
    /// Aggregate identifiers such as `AVERAGE`; only read for aggregate queries
    #[serde(default)]
    pub aggregates: Vec<String>,
}

impl AssetPropertyValueQuery {
    pub fn new(
        query_type: impl Into<QueryType>,
        asset_id: impl Into<String>,
        property_id: impl Into<String>,
    ) -> Self {
        Self {
            query_type: query_type.into(),
            region: None,
            asset_id: asset_id.into(),
            property_id: property_id.into(),
            aggregates: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_aggregates<I, S>(mut self, aggregates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregates = aggregates.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Query for a single asset description
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeAssetQuery {
    pub asset_id: String,
}

/// Query for a single asset property description
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DescribeAssetPropertyQuery {
    pub asset_id: String,
    pub property_id: String,
}

/// A property as declared on an asset model
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub id: String,
    pub name: String,
    pub data_type: PropertyDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// DescribeAssetProperty response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetProperty {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_model_id: String,
    pub asset_property: PropertyDefinition,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssetHierarchy {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssetStatus {
    pub state: String,
}

/// DescribeAsset response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescription {
    pub asset_arn: String,
    pub asset_id: String,
    pub asset_name: String,
    pub asset_model_id: String,
    #[serde(default)]
    pub asset_properties: Vec<PropertyDefinition>,
    #[serde(default)]
    pub asset_hierarchies: Vec<AssetHierarchy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_status: Option<AssetStatus>,
    /// Seconds since the epoch, possibly fractional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_creation_date: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_last_update_date: Option<f64>,
}

impl AssetDescription {
    pub fn property(&self, property_id: &str) -> Option<&PropertyDefinition> {
        self.asset_properties.iter().find(|p| p.id == property_id)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.asset_creation_date.and_then(epoch_seconds)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.asset_last_update_date.and_then(epoch_seconds)
    }
}

fn epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
}
