use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::models::telegram::Update;
use crate::services::telegram_service::TelegramClient;

const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Long-polls `getUpdates` and forwards every update to the worker queue.
pub async fn run_polling(
    client: TelegramClient,
    poll_timeout_secs: u64,
    tx: mpsc::Sender<Update>,
    shutdown: CancellationToken,
) {
    if let Err(e) = client.delete_webhook().await {
        error!(category = e.category(), error = %e, "Could not clear webhook before polling");
    }

    info!("Telegram polling loop started");
    let mut offset = 0i64;

    loop {
        let batch = tokio::select! {
            _ = shutdown.cancelled() => break,
            batch = client.get_updates(offset, poll_timeout_secs) => batch,
        };

        match batch {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    if tx.send(update).await.is_err() {
                        info!("Telegram polling stopped (worker gone)");
                        return;
                    }
                }
            }
            Err(e) => {
                error!(category = e.category(), error = %e, "Telegram polling error");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                }
            }
        }
    }

    info!("Telegram polling loop stopped");
}
