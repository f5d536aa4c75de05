//! Periodic cost recomputation

use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};
use crate::services::event::{EventService, OrganizerFilter};
use crate::utils::errors::Result;

pub struct CostScheduler {
    service: EventService,
    filter: OrganizerFilter,
    period: Duration,
}

impl CostScheduler {
    pub fn new(service: EventService, filter: OrganizerFilter, period: Duration) -> Self {
        Self {
            service,
            filter,
            period,
        }
    }

    /// Run a single recomputation, returning the number of events saved
    pub async fn run_once(&self) -> Result<usize> {
        self.service.calculate_cost_for(&self.filter).await
    }

    /// Recompute costs on every tick until `shutdown` resolves. The first
    /// tick fires immediately. Failed runs are logged and retried on the next
    /// tick.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(period_secs = self.period.as_secs(), "Cost scheduler started");
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Cost scheduler stopping");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        error!(error = %e, severity = %e.severity(), "Scheduled cost recomputation failed");
                    }
                }
            }
        }
    }
}
