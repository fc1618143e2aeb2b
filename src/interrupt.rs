//! Cooperative cancellation on Ctrl+C / SIGTERM
//!
//! The signal never kills an operation in flight. It only raises a flag that
//! the restack pipeline checks before starting the next PR.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;

/// Shared interrupt flag
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    triggered: Arc<AtomicBool>,
}

impl Interrupt {
    /// Create an untriggered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Spawn a task that raises the flag on every Ctrl+C or SIGTERM
    ///
    /// Installing the handler replaces the default "terminate immediately"
    /// behaviour for the rest of the process lifetime.
    pub fn listen(&self) {
        let flag = self.clone();
        tokio::spawn(async move {
            loop {
                wait_for_signal().await;
                tracing::warn!("interrupt received, finishing the current pull request");
                flag.trigger();
            }
        });
    }
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
