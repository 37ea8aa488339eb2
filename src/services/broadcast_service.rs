use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};

use crate::config::RecipientSource;
use crate::error::Result;
use crate::render;
use crate::services::job_board_service::JobSource;
use crate::services::telegram_service::ChatTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReport {
    pub started_at: DateTime<Utc>,
    pub attempted: usize,
    pub delivered: usize,
    pub failed: Vec<i64>,
}

impl BroadcastReport {
    fn empty(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            attempted: 0,
            delivered: 0,
            failed: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct BroadcastService {
    transport: Arc<dyn ChatTransport>,
    jobs: Arc<dyn JobSource>,
    recipients: RecipientSource,
    admin_chat_id: Option<i64>,
}

impl BroadcastService {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        jobs: Arc<dyn JobSource>,
        recipients: RecipientSource,
        admin_chat_id: Option<i64>,
    ) -> Self {
        Self {
            transport,
            jobs,
            recipients,
            admin_chat_id,
        }
    }

    /// Chat ids for this run. Bots are skipped when reading channel administrators.
    pub async fn resolve_recipients(&self) -> Result<Vec<i64>> {
        match &self.recipients {
            RecipientSource::Registry(ids) => Ok(ids.clone()),
            RecipientSource::ChannelAdministrators(channel) => {
                let members = self.transport.chat_administrators(channel).await?;
                Ok(members
                    .into_iter()
                    .filter(|m| !m.user.is_bot)
                    .map(|m| m.user.id)
                    .collect())
            }
        }
    }

    /// Sends the first current listing to every recipient.
    ///
    /// A failed send is logged for that recipient only and the loop continues.
    #[instrument(skip(self))]
    pub async fn broadcast_jobs(&self) -> BroadcastReport {
        let mut report = BroadcastReport::empty(Utc::now());

        let jobs = self.jobs.fetch_jobs().await;
        let Some(first) = jobs.first() else {
            info!("No jobs to broadcast today");
            return report;
        };

        let recipients = match self.resolve_recipients().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(category = e.category(), error = %e, "Could not resolve broadcast recipients");
                return report;
            }
        };

        let message = render::daily_opportunity(first);
        for chat_id in recipients {
            report.attempted += 1;
            match self.transport.send_message(chat_id, &message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    error!(chat_id, category = e.category(), error = %e, "Error sending daily job");
                    report.failed.push(chat_id);
                }
            }
        }

        info!(
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed.len(),
            "Daily broadcast finished"
        );
        self.send_report(&report).await;
        report
    }

    async fn send_report(&self, report: &BroadcastReport) {
        let Some(admin) = self.admin_chat_id else {
            return;
        };
        let message = render::broadcast_report(report.attempted, report.delivered, &report.failed);
        if let Err(e) = self.transport.send_message(admin, &message).await {
            warn!(chat_id = admin, category = e.category(), error = %e, "Could not send broadcast report");
        }
    }
}
