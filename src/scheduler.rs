//! Daily broadcast on tokio-cron-scheduler.
//!
//! The handle returned by [`DailyBroadcast::start`] owns the scheduler; call
//! [`DailyBroadcast::shutdown`] on exit.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::error::Result;
use crate::services::broadcast_service::BroadcastService;

/// 09:00:00 UTC, every day of the week (sec min hour dom month dow).
pub const DAILY_BROADCAST_CRON: &str = "0 0 9 * * *";

pub struct DailyBroadcast {
    scheduler: JobScheduler,
    job_id: Uuid,
}

impl DailyBroadcast {
    pub async fn start(service: BroadcastService) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        let service = Arc::new(service);

        let job = Job::new_async(DAILY_BROADCAST_CRON, move |_uuid, _lock| {
            let service = service.clone();
            Box::pin(async move {
                tracing::info!("Running daily job broadcast");
                service.broadcast_jobs().await;
            })
        })?;

        let job_id = scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!(cron = DAILY_BROADCAST_CRON, %job_id, "Daily broadcast scheduled");
        Ok(Self { scheduler, job_id })
    }

    pub async fn next_run(&mut self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        Ok(self.scheduler.next_tick_for_job(self.job_id).await?)
    }

    pub async fn shutdown(mut self) -> Result<()> {
        self.scheduler.shutdown().await?;
        tracing::info!("Daily broadcast stopped");
        Ok(())
    }
}
