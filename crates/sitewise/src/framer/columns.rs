// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Column specifications and their Arrow representation.

use crate::error::Result;
use crate::models::PropertyDataType;
use arrow_array::{ArrayRef, RecordBatch, new_empty_array};
use arrow_schema::{DataType, Field, Schema};
use diagnostics::*;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the leading epoch-timestamp column
pub const TIME_COLUMN: &str = "time";

/// Schema metadata key carrying the frame title
pub const FRAME_NAME_KEY: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnElementType {
    Int64,
    Float64,
    Bool,
    String,
}

impl ColumnElementType {
    #[must_use]
    pub fn arrow_type(self) -> DataType {
        match self {
            ColumnElementType::Int64 => DataType::Int64,
            ColumnElementType::Float64 => DataType::Float64,
            ColumnElementType::Bool => DataType::Boolean,
            ColumnElementType::String => DataType::Utf8,
        }
    }
}

/// Element type of a current/historical value column for a declared
/// property type. Undeclared types fall back to Int64.
pub fn element_type_for(data_type: &PropertyDataType) -> ColumnElementType {
    match data_type {
        PropertyDataType::Boolean => ColumnElementType::Bool,
        PropertyDataType::Double => ColumnElementType::Float64,
        PropertyDataType::Integer => ColumnElementType::Int64,
        PropertyDataType::String => ColumnElementType::String,
        PropertyDataType::Other(name) => {
            debug!("Unknown property data type {name}, using Int64", name: name);
            ColumnElementType::Int64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    pub name: String,
    pub element_type: ColumnElementType,
    pub nullable: bool,
}

impl ColumnSpec {
    #[must_use]
    pub fn time() -> Self {
        Self {
            name: TIME_COLUMN.to_string(),
            element_type: ColumnElementType::Int64,
            nullable: false,
        }
    }

    pub fn value(name: impl Into<String>, element_type: ColumnElementType) -> Self {
        Self {
            name: name.into(),
            element_type,
            nullable: true,
        }
    }

    #[must_use]
    pub fn to_field(&self) -> Field {
        Field::new(&self.name, self.element_type.arrow_type(), self.nullable)
    }
}

/// Ordered output columns of one query, time column first
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedSchema {
    columns: Vec<ColumnSpec>,
}

impl ResolvedSchema {
    /// Schema holding only the time column
    #[must_use]
    pub fn time_only() -> Self {
        Self {
            columns: vec![ColumnSpec::time()],
        }
    }

    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = ColumnSpec>,
    {
        let mut schema = Self::time_only();
        schema.columns.extend(values);
        schema
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    #[must_use]
    pub fn value_columns(&self) -> &[ColumnSpec] {
        &self.columns[1..]
    }

    /// False when the query type produced no value columns
    #[must_use]
    pub fn has_value_columns(&self) -> bool {
        self.columns.len() > 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[must_use]
    pub fn to_arrow_schema(&self, title: &str) -> Schema {
        let fields: Vec<Field> = self.columns.iter().map(ColumnSpec::to_field).collect();
        let metadata = HashMap::from([(FRAME_NAME_KEY.to_string(), title.to_string())]);
        Schema::new_with_metadata(fields, metadata)
    }

    /// Empty frame with this shape, ready to be populated with values
    pub fn empty_frame(&self, title: &str) -> Result<RecordBatch> {
        let schema = Arc::new(self.to_arrow_schema(title));
        let arrays: Vec<ArrayRef> = schema
            .fields()
            .iter()
            .map(|f| new_empty_array(f.data_type()))
            .collect();

        let field_count = arrays.len();
        debug!(
            "Created empty frame {title} with {field_count} fields",
            title: title,
            field_count: field_count
        );
        Ok(RecordBatch::try_new(schema, arrays)?)
    }
}

impl<'a> IntoIterator for &'a ResolvedSchema {
    type Item = &'a ColumnSpec;
    type IntoIter = std::slice::Iter<'a, ColumnSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_for_declared_types() {
        assert_eq!(element_type_for(&PropertyDataType::Boolean), ColumnElementType::Bool);
        assert_eq!(element_type_for(&PropertyDataType::Double), ColumnElementType::Float64);
        assert_eq!(element_type_for(&PropertyDataType::Integer), ColumnElementType::Int64);
        assert_eq!(element_type_for(&PropertyDataType::String), ColumnElementType::String);
    }

    #[test]
    fn test_element_type_fallback() {
        diagnostics::init_diagnostics();
        let unknown = PropertyDataType::Other("STRUCT".to_string());
        assert_eq!(element_type_for(&unknown), ColumnElementType::Int64);
    }

    #[test]
    fn test_time_column() {
        let time = ColumnSpec::time();
        assert_eq!(time.name, TIME_COLUMN);
        assert_eq!(time.element_type, ColumnElementType::Int64);
        assert!(!time.nullable);
    }

    #[test]
    fn test_arrow_schema() {
        let schema = ResolvedSchema::with_values([
            ColumnSpec::value("Running", ColumnElementType::Bool),
            ColumnSpec::value("Label", ColumnElementType::String),
        ]);
        let arrow = schema.to_arrow_schema("Demo Turbine Asset 1 Running");

        let timestamp_field = arrow.field_with_name("time").unwrap();
        assert_eq!(timestamp_field.data_type(), &DataType::Int64);
        assert!(!timestamp_field.is_nullable());

        let running = arrow.field(1);
        assert_eq!(running.data_type(), &DataType::Boolean);
        assert!(running.is_nullable());
        assert_eq!(arrow.field(2).data_type(), &DataType::Utf8);
        assert_eq!(
            arrow.metadata().get(FRAME_NAME_KEY).map(String::as_str),
            Some("Demo Turbine Asset 1 Running")
        );
    }

    #[test]
    fn test_empty_frame() {
        let schema = ResolvedSchema::with_values([ColumnSpec::value(
            "Wind Speed",
            ColumnElementType::Float64,
        )]);
        let batch = schema.empty_frame("Demo Turbine Asset 1 Wind Speed").unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
        assert_eq!(batch.schema().field(1).name(), "Wind Speed");
    }

    #[test]
    fn test_time_only() {
        let schema = ResolvedSchema::time_only();
        assert_eq!(schema.len(), 1);
        assert!(!schema.has_value_columns());
        assert!(schema.value_columns().is_empty());
    }
}
