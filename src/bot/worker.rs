use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::bot::error_boundary::{run_guarded, Outcome};
use crate::bot::router::BotRouter;
use crate::models::event::InboundEvent;
use crate::models::telegram::Update;

pub const UPDATE_QUEUE_CAPACITY: usize = 100;

/// Single consumer of the update queue; each event finishes before the next starts.
pub struct UpdateWorker {
    router: BotRouter,
    rx: mpsc::Receiver<Update>,
    bot_username: Option<String>,
}

impl UpdateWorker {
    pub fn new(router: BotRouter, rx: mpsc::Receiver<Update>) -> Self {
        Self {
            router,
            rx,
            bot_username: None,
        }
    }

    /// Commands suffixed with another bot's username are skipped once this is set.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Update worker started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                next = self.rx.recv() => match next {
                    Some(update) => {
                        self.handle(update).await;
                    }
                    None => break,
                },
            }
        }
        info!("Update worker stopped");
    }

    pub async fn handle(&self, update: Update) -> Option<Outcome> {
        let update_id = update.update_id;
        let Some(event) = InboundEvent::from_update(update, self.bot_username.as_deref()) else {
            debug!(update_id, "Skipping update without command or callback for this bot");
            return None;
        };
        Some(run_guarded(&self.router, event).await)
    }
}
