//! Cancellable execution context for a single provider call.
//!
//! A [`CallContext`] carries an optional deadline and an optional
//! cancellation signal. The client races the in-flight request against both,
//! so a cancelled or expired call returns promptly with
//! [`TransportError::Cancelled`] or [`TransportError::DeadlineExceeded`]
//! instead of waiting for the transport.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::domain::TransportError;

/// Execution context passed to every client operation.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel_rx: Option<watch::Receiver<bool>>,
}

/// Cancels every [`CallContext`] derived from it.
#[derive(Debug)]
pub struct CancelHandle {
    cancel_tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

impl CallContext {
    /// Context with no deadline and no cancellation.
    pub fn background() -> Self {
        Self::default()
    }

    /// New context plus the handle that cancels it.
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            cancel_rx: Some(cancel_rx),
        };
        (ctx, CancelHandle { cancel_tx })
    }

    /// Expire this context `timeout` from now.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }

    /// Expire this context at `deadline`. An earlier existing deadline wins.
    #[must_use]
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Attach an external cancellation signal; `true` means cancelled.
    #[must_use]
    pub fn cancel_on(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drive `fut` to completion unless the context is cancelled or expires first.
    pub(crate) async fn run<T, E, F>(&self, fut: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<TransportError>,
    {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }
        if self.is_expired() {
            return Err(TransportError::DeadlineExceeded.into());
        }

        let cancelled = async {
            match self.cancel_rx.clone() {
                Some(mut rx) => {
                    // A dropped handle can no longer cancel.
                    if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = fut => result,
            _ = cancelled => Err(TransportError::Cancelled.into()),
            _ = expired => Err(TransportError::DeadlineExceeded.into()),
        }
    }
}
