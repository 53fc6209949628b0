//! Periodic dashboard refresh
//!
//! One poller runs per subscriber. Each tick supersedes the poll still in
//! flight: the older future is dropped, so its result can never overwrite
//! data from a newer poll.

use crate::dashboard::DashboardSnapshot;
use crate::query::CdrQueryService;
use callpanel_auth::SessionContext;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Latest published snapshot, `None` until the first poll completes
pub type SnapshotReceiver = watch::Receiver<Option<DashboardSnapshot>>;

/// Cancellable periodic dashboard poller
pub struct DashboardPoller {
    service: Arc<CdrQueryService>,
    session: SessionContext,
    interval: Duration,
}

impl DashboardPoller {
    pub fn new(service: Arc<CdrQueryService>, session: SessionContext) -> Self {
        let interval = service.settings().poll_interval();
        Self {
            service,
            session,
            interval,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start polling until `cancel` fires or every receiver is dropped
    ///
    /// The first poll starts immediately.
    pub fn spawn(self, cancel: CancellationToken) -> (SnapshotReceiver, JoinHandle<()>) {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            info!(
                extension = %self.session.extension_number(),
                interval_secs = self.interval.as_secs(),
                "Dashboard poller started"
            );

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut generation: u64 = 0;
            let mut in_flight: Option<BoxFuture<'static, DashboardSnapshot>> = None;

            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => {
                        debug!("Dashboard poller cancelled");
                        break;
                    }
                    _ = tx.closed() => {
                        debug!("Dashboard poller has no subscribers left");
                        break;
                    }
                    _ = ticker.tick() => {
                        generation += 1;
                        if in_flight.is_some() {
                            debug!(generation, "Superseding in-flight dashboard poll");
                        }

                        let service = Arc::clone(&self.service);
                        let session = self.session.clone();
                        in_flight = Some(Box::pin(async move {
                            service.dashboard(&session, generation).await
                        }));
                    }
                    snapshot = async {
                        match in_flight.as_mut() {
                            Some(poll) => poll.await,
                            None => std::future::pending().await,
                        }
                    } => {
                        in_flight = None;
                        debug!(generation = snapshot.generation, "Publishing dashboard snapshot");
                        tx.send_replace(Some(snapshot));
                    }
                }
            }

            info!(
                extension = %self.session.extension_number(),
                "Dashboard poller stopped"
            );
        });

        (rx, handle)
    }
}
