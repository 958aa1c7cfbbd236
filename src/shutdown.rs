//! Cooperative cancellation for the paced loop.
//!
//! A [`ShutdownSignal`] is a one-way latch: once triggered, every
//! [`ShutdownListener`] subscribed to it (before or after the trigger)
//! observes the shutdown.
//!
//! # Example
//!
//! ```rust,ignore
//! use travel_buzz::shutdown::ShutdownSignal;
//!
//! #[tokio::main]
//! async fn main() {
//!     let shutdown = ShutdownSignal::new();
//!     tokio::spawn(shutdown.clone().listen_for_os_signals());
//!
//!     let mut listener = shutdown.subscribe();
//!     loop {
//!         tokio::select! {
//!             _ = listener.recv() => break,
//!             _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {}
//!         }
//!     }
//! }
//! ```

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// A clonable handle that can trigger shutdown.
#[derive(Clone)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<bool>>,
}

/// The receiving side of a [`ShutdownSignal`].
#[derive(Clone)]
pub struct ShutdownListener {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> ShutdownListener {
        ShutdownListener {
            receiver: self.sender.subscribe(),
        }
    }

    /// Trigger shutdown manually (for testing or programmatic shutdown).
    pub fn trigger(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.sender.borrow()
    }

    /// Wait for Ctrl+C (or SIGTERM on unix), then trigger shutdown.
    ///
    /// If a handler cannot be installed the failure is logged and that
    /// source is ignored; the signal can still be triggered manually.
    pub async fn listen_for_os_signals(self) {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    warn!(error = %err, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received Ctrl+C, stopping...");
            }
            _ = terminate => {
                info!("Received SIGTERM, stopping...");
            }
        }

        self.trigger();
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownListener {
    /// Non-blocking check.
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once shutdown has been triggered. Returns immediately if it
    /// already was. Never resolves if every [`ShutdownSignal`] is dropped
    /// without triggering.
    pub async fn recv(&mut self) {
        let triggered = self.receiver.wait_for(|stopped| *stopped).await.is_ok();
        if !triggered {
            std::future::pending::<()>().await;
        }
    }
}
