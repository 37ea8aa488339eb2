use ganadinero_bot::{
    bot::{polling::run_polling, worker::UpdateWorker, worker::UPDATE_QUEUE_CAPACITY},
    config::{Config, Platform, RecipientSource, UpdateMode},
    routes::{self, telegram::WebhookState, WEBHOOK_PATH},
    scheduler::DailyBroadcast,
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let state = AppState::new(config)?;
    let config = state.config.clone();

    let me = state.telegram.get_me().await?;
    info!(
        "Telegram bot: @{} ({})",
        me.username.as_deref().unwrap_or("unknown"),
        me.first_name
    );
    for platform in Platform::ALL {
        tracing::debug!(
            platform = platform.as_str(),
            url = config.affiliate_links.get(platform),
            "Affiliate link loaded"
        );
    }
    if let RecipientSource::ChannelAdministrators(channel) = &config.recipients {
        warn!(
            %channel,
            "BROADCAST_RECIPIENTS is not set; daily jobs go to the channel administrators"
        );
    }

    let scheduler = DailyBroadcast::start(state.broadcast_service()).await?;

    let shutdown = CancellationToken::new();
    let (tx, rx) = mpsc::channel(UPDATE_QUEUE_CAPACITY);

    let mut worker = UpdateWorker::new(state.router(), rx);
    if let Some(username) = me.username.clone() {
        worker = worker.with_bot_username(username);
    }
    let worker = tokio::spawn(worker.run(shutdown.clone()));

    let intake = match config.update_mode {
        UpdateMode::Polling => tokio::spawn(run_polling(
            state.telegram.clone(),
            config.poll_timeout_secs,
            tx,
            shutdown.clone(),
        )),
        UpdateMode::Webhook => {
            let base = config.webhook_url.clone().unwrap_or_default();
            let target_webhook_url = format!("{}{}", base.trim_end_matches('/'), WEBHOOK_PATH);

            info!("Checking Telegram webhook status...");
            match state.telegram.get_webhook_info().await {
                Ok(current) if current.url == target_webhook_url => {
                    info!(
                        pending = current.pending_update_count,
                        "Telegram webhook is already up to date: {}", current.url
                    );
                }
                Ok(current) => {
                    info!(
                        pending = current.pending_update_count,
                        "Updating Telegram webhook: {} -> {}", current.url, target_webhook_url
                    );
                    state
                        .telegram
                        .set_webhook(&target_webhook_url, config.webhook_secret.as_deref())
                        .await?;
                    info!("Telegram webhook registered successfully");
                }
                Err(e) => warn!("Could not check Telegram webhook status: {}", e),
            }

            let app = routes::webhook_router(WebhookState {
                tx,
                secret: config.webhook_secret.clone(),
            });
            let addr: SocketAddr = config.server_address.parse()?;
            info!("Server listening on {}", addr);
            let listener = TcpListener::bind(addr).await?;
            let stop = shutdown.clone();
            tokio::spawn(async move {
                let served = axum::serve(listener, app)
                    .with_graceful_shutdown(async move { stop.cancelled().await })
                    .await;
                if let Err(e) = served {
                    tracing::error!(error = ?e, "Webhook server error");
                }
            })
        }
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown.cancel();

    scheduler.shutdown().await?;
    let _ = intake.await;
    let _ = worker.await;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
