// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed registry of aggregate kinds and their output columns.

use crate::framer::columns::ColumnElementType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AggregateKind {
    Average,
    Minimum,
    Maximum,
    Sum,
    StandardDeviation,
    Count,
}

/// Output column for one aggregate kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateFieldSpec {
    pub kind: AggregateKind,
    /// Identifier used in queries and by the service
    pub identifier: &'static str,
    pub column_name: &'static str,
    pub element_type: ColumnElementType,
}

const fn aggregate(
    kind: AggregateKind,
    identifier: &'static str,
    column_name: &'static str,
) -> AggregateFieldSpec {
    AggregateFieldSpec {
        kind,
        identifier,
        column_name,
        element_type: ColumnElementType::Float64,
    }
}

/// Every aggregate kind in output order. Frames list aggregate columns in
/// this order no matter how the query orders its request.
pub static AGGREGATE_FIELDS: [AggregateFieldSpec; 6] = [
    aggregate(AggregateKind::Average, "AVERAGE", "avg"),
    aggregate(AggregateKind::Minimum, "MINIMUM", "min"),
    aggregate(AggregateKind::Maximum, "MAXIMUM", "max"),
    aggregate(AggregateKind::Sum, "SUM", "sum"),
    aggregate(AggregateKind::StandardDeviation, "STANDARD_DEVIATION", "std. dev."),
    aggregate(AggregateKind::Count, "COUNT", "count"),
];

impl AggregateKind {
    pub const ALL: [AggregateKind; 6] = [
        AggregateKind::Average,
        AggregateKind::Minimum,
        AggregateKind::Maximum,
        AggregateKind::Sum,
        AggregateKind::StandardDeviation,
        AggregateKind::Count,
    ];

    /// Parse a query identifier such as `STANDARD_DEVIATION`
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        AGGREGATE_FIELDS
            .iter()
            .find(|spec| spec.identifier == identifier)
            .map(|spec| spec.kind)
    }

    #[must_use]
    pub fn spec(self) -> &'static AggregateFieldSpec {
        match self {
            AggregateKind::Average => &AGGREGATE_FIELDS[0],
            AggregateKind::Minimum => &AGGREGATE_FIELDS[1],
            AggregateKind::Maximum => &AGGREGATE_FIELDS[2],
            AggregateKind::Sum => &AGGREGATE_FIELDS[3],
            AggregateKind::StandardDeviation => &AGGREGATE_FIELDS[4],
            AggregateKind::Count => &AGGREGATE_FIELDS[5],
        }
    }

    #[must_use]
    pub fn identifier(self) -> &'static str {
        self.spec().identifier
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Look up the output column for an aggregate identifier; `None` for
/// identifiers outside the registry.
pub fn spec_for(identifier: &str) -> Option<&'static AggregateFieldSpec> {
    AggregateKind::from_identifier(identifier).map(AggregateKind::spec)
}
