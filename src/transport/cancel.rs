//! Cancellation of in-flight requests.

use std::future::Future;

use tokio::sync::watch;

use crate::Error;

/// The sending half of a cancellation pair.
///
/// Held by whoever issued the request. Cancelling is idempotent and is seen
/// by every clone of the paired [`CancelSignal`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Creates a connected handle and signal.
    pub fn new() -> (Self, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelSignal { rx: Some(rx) })
    }

    /// Signals cancellation.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// The receiving half of a cancellation pair, passed to transports.
///
/// ```rust
/// use shopdesk::transport::CancelHandle;
///
/// # tokio_test::block_on(async {
/// let (handle, signal) = CancelHandle::new();
/// handle.cancel();
///
/// let result = signal.run(async { Ok::<_, shopdesk::Error>(1) }).await;
/// assert!(result.unwrap_err().is_silent());
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Returns `true` if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Fails with `Cancelled` if cancellation was requested.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            Err(Error::cancelled())
        } else {
            Ok(())
        }
    }

    /// Completes when cancellation is requested.
    ///
    /// Never completes for [`never`](Self::never) or when the handle was
    /// dropped without cancelling.
    pub async fn cancelled(&self) {
        let Some(ref rx) = self.rx else {
            return std::future::pending().await;
        };
        let mut rx = rx.clone();
        let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }

    /// Runs `fut` until it completes or cancellation is requested.
    ///
    /// On cancellation `fut` is dropped and the call fails with `Cancelled`.
    pub async fn run<F, R>(&self, fut: F) -> Result<R, Error>
    where
        F: Future<Output = Result<R, Error>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            () = self.cancelled() => Err(Error::cancelled()),
            result = fut => result,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_never_runs_to_completion() {
        let signal = CancelSignal::never();
        assert!(!signal.is_cancelled());
        assert_eq!(signal.run(async { Ok(7) }).await.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_pending_work() {
        let (handle, signal) = CancelHandle::new();
        let task = tokio::spawn(async move {
            signal
                .run(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(())
                })
                .await
        });

        tokio::task::yield_now().await;
        handle.cancel();
        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[tokio::test]
    async fn test_dropped_handle_does_not_cancel() {
        let (handle, signal) = CancelHandle::new();
        drop(handle);
        assert!(!signal.is_cancelled());
        assert_eq!(signal.run(async { Ok("done") }).await.unwrap(), "done");
    }

    #[test]
    fn test_cancel_is_visible_to_clones() {
        let (handle, signal) = CancelHandle::new();
        let clone = signal.clone();
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(clone.is_cancelled());
        assert!(signal.check().is_err());
    }
}
