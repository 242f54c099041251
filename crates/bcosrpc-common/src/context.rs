//! Call Context
//!
//! A [`CallContext`] carries the caller's cancellation signal and optional
//! deadline into every remote call. The invoker checks it before dispatch and
//! races the in-flight transport future against it, so a cancelled or expired
//! context aborts the call instead of waiting for the node.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use bcosrpc_common::CallContext;
//! use tokio_util::sync::CancellationToken;
//!
//! let shutdown = CancellationToken::new();
//! let ctx = CallContext::background()
//!     .with_cancellation(shutdown.child_token())
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert!(ctx.deadline().is_some());
//! shutdown.cancel();
//! assert!(ctx.is_cancelled());
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::protocol::error::{BcosRpcError, Result};

/// Cancellation signal plus optional deadline for a single call.
///
/// Cloning shares the cancellation signal; [`child`](Self::child) derives a
/// context that is cancelled with its parent but can also be cancelled alone.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Tightens the deadline to `timeout` from now.
    ///
    /// An earlier deadline that is already set is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Tightens the deadline to `deadline`, keeping an earlier one if present.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Replaces the cancellation signal with `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fails fast if the context is already cancelled or expired.
    ///
    /// Cancellation is reported before an expired deadline.
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(BcosRpcError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(BcosRpcError::DeadlineExceeded);
            }
        }
        Ok(())
    }

    /// Drives `fut` until it completes, the context is cancelled, or the
    /// deadline passes, whichever happens first.
    ///
    /// `fut` is not polled at all when the context is already done. When the
    /// context fires first, `fut` is dropped, which aborts any I/O it owns.
    pub async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = self.token.cancelled() => Err(BcosRpcError::Cancelled),
                    _ = tokio::time::sleep_until(deadline) => Err(BcosRpcError::DeadlineExceeded),
                    result = fut => result,
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.token.cancelled() => Err(BcosRpcError::Cancelled),
                    result = fut => result,
                }
            }
        }
    }
}
