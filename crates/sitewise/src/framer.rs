// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Frame schema resolution: which typed columns a property query produces,
//! and what the resulting frame is called.

pub mod aggregate;
pub mod columns;
pub mod meta;

pub use aggregate::{AGGREGATE_FIELDS, AggregateFieldSpec, AggregateKind, spec_for};
pub use columns::{ColumnElementType, ColumnSpec, ResolvedSchema, TIME_COLUMN, element_type_for};
pub use meta::{
    AssetPropertyValueMetadata, FrameMetadata, MetadataProvider, PropertyMetadata,
    PropertyValueMetaProvider, fetch_metadata_and_resolve, resolve_in_region, resolve_schema,
};

/// Title of the frame built for a property: "<asset name> <property name>"
pub fn frame_title(asset_name: &str, property_name: &str) -> String {
    format!("{asset_name} {property_name}")
}
