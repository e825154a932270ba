//! Per-call cancellation and deadlines.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use vcache_core::{VcacheError, VcacheResult};

/// Cancellation and timeout scope for a single cache call.
///
/// Cancelling the token, or exceeding the timeout, drops the in-flight store
/// request and the call returns [`VcacheError::Cancelled`] or
/// [`VcacheError::Timeout`]. A context can be reused across calls.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancel: CancellationToken,
    timeout: Option<Duration>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline of its own.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Bounds each call made with this context.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ties this context to `token`.
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The token that cancels calls made with this context.
    #[must_use]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The per-call timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns true once the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drives `fut` to completion unless cancelled or timed out first.
    ///
    /// `fallback_timeout` applies when the context carries no timeout.
    /// A context that is already cancelled never polls `fut`.
    pub async fn run<T, F>(&self, fallback_timeout: Option<Duration>, fut: F) -> VcacheResult<T>
    where
        F: Future<Output = VcacheResult<T>>,
    {
        let limit = self.timeout.or(fallback_timeout);
        let bounded = async move {
            match limit {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .map_err(|_| VcacheError::Timeout(format!("Operation timed out after {:?}", limit)))?,
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(VcacheError::Cancelled),
            res = bounded => res,
        }
    }
}
