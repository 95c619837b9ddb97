//! Background dashboard refresh

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use shared::DashboardReport;

use crate::reports::ReportsService;

/// Interval used when none (or zero) is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Refetches the dashboard report on a fixed interval.
///
/// No backoff or jitter. A failed fetch is logged and the last good report
/// is kept. Each fetch completes before the next tick is awaited.
pub struct DashboardPoller {
    reports: ReportsService,
    interval: Duration,
    shutdown: Arc<Notify>,
    latest: Arc<RwLock<Option<DashboardReport>>>,
}

/// Handle to a running poller
pub struct PollerHandle {
    task: JoinHandle<()>,
    shutdown: Arc<Notify>,
    latest: Arc<RwLock<Option<DashboardReport>>>,
}

impl DashboardPoller {
    pub fn new(reports: ReportsService, interval: Duration) -> Self {
        Self {
            reports,
            interval: if interval.is_zero() {
                DEFAULT_POLL_INTERVAL
            } else {
                interval
            },
            shutdown: Arc::new(Notify::new()),
            latest: Arc::new(RwLock::new(None)),
        }
    }

    /// Spawn the polling task. The first fetch happens immediately.
    pub fn start(self) -> PollerHandle {
        let shutdown = self.shutdown.clone();
        let latest = self.latest.clone();
        let reports = self.reports;
        let period = self.interval;

        let task = tokio::spawn(async move {
            tracing::info!("Dashboard poller started ({:?} interval)", period);

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.notified() => {
                        tracing::info!("Dashboard poller received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        match reports.fetch_dashboard().await {
                            Ok(report) => {
                                tracing::debug!(
                                    "Dashboard refreshed: {} products, {} low stock",
                                    report.stats.total_products,
                                    report.stats.low_stock_count
                                );
                                *latest.write().await = Some(report);
                            }
                            Err(e) => tracing::error!("Failed to refresh dashboard: {}", e),
                        }
                    }
                }
            }
        });

        PollerHandle {
            task,
            shutdown: self.shutdown,
            latest: self.latest,
        }
    }
}

impl PollerHandle {
    /// Most recent successfully fetched report
    pub async fn latest(&self) -> Option<DashboardReport> {
        self.latest.read().await.clone()
    }

    /// Stop polling and wait for the task to finish
    pub async fn shutdown(self) {
        // Stores a permit if the task is mid-fetch
        self.shutdown.notify_one();
        if let Err(e) = self.task.await {
            tracing::error!("Dashboard poller task failed: {}", e);
        }
    }
}
