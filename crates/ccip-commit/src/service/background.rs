//! Background reader sync.
//!
//! ```text
//! spawn ──→ [tick] ──sync (bounded by sync_timeout)──→ [tick] ──→ ...
//!              │
//!              └── shutdown signal / plugin dropped ──→ exit
//! ```
//!
//! Sync failures are logged and never reach a round.

use crate::metrics;
use crate::ports::outbound::ChainReader;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Handle on the periodic sync task.
pub(crate) struct BackgroundSync {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl BackgroundSync {
    /// Spawn the sync loop on `runtime`.
    pub(crate) fn spawn<R>(runtime: &Handle, reader: Arc<R>, frequency: Duration, timeout: Duration) -> Self
    where
        R: ChainReader + 'static,
    {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(frequency);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match tokio::time::timeout(timeout, reader.sync()).await {
                            Ok(Ok(())) => debug!("[commit] Reader sync complete"),
                            Ok(Err(e)) => {
                                warn!("[commit] Reader sync failed: {}", e);
                                metrics::record_sync_failure();
                            }
                            Err(_) => {
                                warn!("[commit] Reader sync timed out after {:?}", timeout);
                                metrics::record_sync_failure();
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        // Err means the sender is gone, i.e. the plugin was dropped.
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("[commit] Background sync stopped");
        });

        Self { shutdown, handle }
    }

    /// Signal the task to stop and wait up to `wait` for it. A task still
    /// running after that is aborted.
    pub(crate) async fn stop(mut self, wait: Duration) {
        // The receiver only disappears once the task has exited.
        let _ = self.shutdown.send(true);

        match tokio::time::timeout(wait, &mut self.handle).await {
            Ok(_) => info!("[commit] Background sync shut down"),
            Err(_) => {
                warn!("[commit] Background sync did not stop within {:?}, aborting", wait);
                self.handle.abort();
            }
        }
    }
}
