use futures::Future;
use futures_cancel::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of waiting on a future while the runtime may shut down.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Interrupted,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Process-wide lifecycle for a client node: whether it should keep running,
/// and the cooperative wait every blocking call goes through.
#[derive(Clone, Debug, Default)]
pub struct Runtime {
    cancellation_token: CancellationToken,
}

impl Runtime {
    pub fn new(cancellation_token: CancellationToken) -> Self {
        Self { cancellation_token }
    }

    /// Creates a runtime that shuts down on Ctrl-C.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init() -> Self {
        let runtime = Self::default();
        let cancellation_token = runtime.cancellation_token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c()
                .cancel_on_shutdown(&cancellation_token)
                .await
            {
                Ok(Ok(())) => {
                    info!("interrupt received, shutting down");
                    cancellation_token.cancel();
                }
                Ok(Err(e)) => warn!("unable to listen for interrupts: {e}"),
                Err(_) => {}
            }
        });
        runtime
    }

    /// False once shutdown has been requested.
    pub fn ok(&self) -> bool {
        !self.cancellation_token.is_cancelled()
    }

    pub fn shutdown(&self) {
        debug!("runtime shutdown");
        self.cancellation_token.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Waits for `future` unless the runtime shuts down first.
    pub async fn spin_until_complete<F>(&self, future: F) -> Resolution<F::Output>
    where
        F: Future,
    {
        if !self.ok() {
            return Resolution::Interrupted;
        }
        match future.cancel_on_shutdown(&self.cancellation_token).await {
            Ok(output) => Resolution::Resolved(output),
            Err(_) => Resolution::Interrupted,
        }
    }
}
