//! Periodic snapshot and alert task

use super::system::MonitoringSystem;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error};

/// Handle to the running collection loop
#[derive(Debug)]
pub struct BackgroundTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl BackgroundTask {
    /// Run one collection cycle immediately and then every `period` until shut down
    pub fn spawn(system: Arc<MonitoringSystem>, period: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let cycle = AssertUnwindSafe(system.run_collection_cycle()).catch_unwind();
                        if cycle.await.is_err() {
                            error!("Monitoring cycle panicked; continuing");
                        }
                    }
                    changed = stop.changed() => {
                        if changed.is_err() || *stop.borrow() {
                            break;
                        }
                    }
                }
            }

            debug!("Monitoring background task stopped");
        });

        Self { shutdown, handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signal the loop to stop and wait for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!("Monitoring background task failed: {}", e);
        }
    }
}
