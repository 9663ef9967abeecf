//! Interrupt signal as a future the controller races long operations against

use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::debug;

/// A source of "the user pressed Ctrl-C"
pub trait InterruptSource: Send + Sync {
    /// Resolves at the next interrupt after the call
    fn next(&self) -> BoxFuture<'static, ()>;
}

/// Process-level SIGINT / Ctrl-C
pub struct CtrlC;

impl CtrlC {
    /// Take over SIGINT for the rest of the process so it never aborts the
    /// session; only the futures returned by `next` observe it.
    pub fn install() -> Self {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            if let Err(e) = signal(SignalKind::interrupt()) {
                debug!("Could not install SIGINT handler: {}", e);
            }
        }
        Self
    }
}

impl InterruptSource for CtrlC {
    fn next(&self) -> BoxFuture<'static, ()> {
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                debug!("Ctrl-C listener failed: {}", e);
                future::pending::<()>().await;
            }
        }
        .boxed()
    }
}

/// Never fires
pub struct NoInterrupt;

impl InterruptSource for NoInterrupt {
    fn next(&self) -> BoxFuture<'static, ()> {
        future::pending().boxed()
    }
}

/// Fires a fixed time after each call
pub struct InterruptAfter(pub Duration);

impl InterruptSource for InterruptAfter {
    fn next(&self) -> BoxFuture<'static, ()> {
        tokio::time::sleep(self.0).boxed()
    }
}
