use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use crate::features::auth::services::SessionStore;

/// Background worker that evicts expired sessions
pub struct SessionSweeper {
    store: Arc<SessionStore>,
    period: Duration,
}

impl SessionSweeper {
    pub fn new(store: Arc<SessionStore>, period: Duration) -> Self {
        Self { store, period }
    }

    /// Run until `shutdown` fires
    pub async fn run(&self, shutdown: CancellationToken) {
        tracing::info!(
            "Starting session sweeper (every {} seconds)",
            self.period.as_secs()
        );

        let mut ticker = interval(self.period);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let removed = self.store.sweep_expired().await;
            if removed > 0 {
                tracing::info!("Removed {} expired sessions", removed);
            }
        }
    }
}
