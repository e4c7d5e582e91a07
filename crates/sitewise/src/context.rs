// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Per-query cancellation and timeout.

use crate::error::{Result, SitewiseError};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Caller-supplied context for a single query resolution.
///
/// Cloning shares the cancellation token, so cancelling any clone cancels
/// every fetch guarded by it.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl QueryContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bound to an existing token, e.g. one owned by a request handler
    #[must_use]
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run `fut` until it completes, the token is cancelled, or the timeout
    /// elapses. Cancellation wins if it is already signalled.
    pub async fn guard<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let bounded = async {
            match self.timeout {
                Some(after) => tokio::time::timeout(after, fut)
                    .await
                    .map_err(|_| SitewiseError::Timeout { after })?,
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SitewiseError::Cancelled),
            result = bounded => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_passes_result_through() {
        let ctx = QueryContext::new();
        let value = ctx.guard(async { Ok(7) }).await;
        assert_eq!(value.ok(), Some(7));
    }

    #[tokio::test]
    async fn test_guard_passes_error_through() {
        let ctx = QueryContext::new();
        let result: Result<()> = ctx.guard(async { Err(SitewiseError::not_found("a1")) }).await;
        assert!(matches!(result, Err(SitewiseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_guard_cancelled_before_start() {
        let ctx = QueryContext::new();
        ctx.cancel();
        let result: Result<()> = ctx.guard(std::future::pending()).await;
        assert!(matches!(result, Err(SitewiseError::Cancelled)));
    }

    #[tokio::test]
    async fn test_guard_times_out() {
        let ctx = QueryContext::new().with_timeout(Duration::from_millis(10));
        assert_eq!(ctx.timeout(), Some(Duration::from_millis(10)));
        let result: Result<()> = ctx.guard(std::future::pending()).await;
        match result {
            Err(e @ SitewiseError::Timeout { .. }) => assert!(e.is_cancellation()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_clone_shares_token() {
        let ctx = QueryContext::new();
        assert!(ctx.timeout().is_none());
        let other = ctx.clone();
        other.cancel();
        assert!(ctx.is_cancelled());
    }
}
