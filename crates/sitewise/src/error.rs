// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Errors surfaced while fetching asset metadata or building frames.
///
/// Schema derivation itself never fails; every variant here originates in
/// the metadata fetch, its cancellation, or frame construction.
#[derive(Debug, thiserror::Error)]
pub enum SitewiseError {
    /// The service has no such asset or property
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Non-success HTTP status other than 404
    #[error("HTTP {status} error from {url}: {message}")]
    Http {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Query cancelled")]
    Cancelled,

    #[error("Query timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SitewiseError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        SitewiseError::NotFound {
            resource: resource.into(),
        }
    }

    /// True for errors caused by the caller giving up, not by the service
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, SitewiseError::Cancelled | SitewiseError::Timeout { .. })
    }
}

/// Result type for sitewise operations
pub type Result<T> = std::result::Result<T, SitewiseError>;
