pub mod bot;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod scheduler;
pub mod services;

use std::sync::Arc;

use crate::bot::{router::BotRouter, BotContext};
use crate::config::Config;
use crate::error::Result;
use crate::services::{
    broadcast_service::BroadcastService,
    job_board_service::{JobBoardService, JobSource},
    telegram_service::{ChatTransport, TelegramClient},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telegram: TelegramClient,
    pub transport: Arc<dyn ChatTransport>,
    pub jobs: Arc<dyn JobSource>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let telegram = TelegramClient::new(
            &config.telegram_api_url,
            &config.telegram_bot_token,
            config.poll_timeout_secs,
        )?;
        let jobs = JobBoardService::new(&config.job_board)?;

        Ok(Self {
            transport: Arc::new(telegram.clone()),
            telegram,
            jobs: Arc::new(jobs),
            config: Arc::new(config),
        })
    }

    pub fn bot_context(&self) -> BotContext {
        BotContext {
            transport: self.transport.clone(),
            jobs: self.jobs.clone(),
            affiliate_links: Arc::new(self.config.affiliate_links.clone()),
            wallet_address: Arc::from(self.config.wallet_address.as_str()),
        }
    }

    pub fn router(&self) -> BotRouter {
        BotRouter::new(self.bot_context())
    }

    pub fn broadcast_service(&self) -> BroadcastService {
        BroadcastService::new(
            self.transport.clone(),
            self.jobs.clone(),
            self.config.recipients.clone(),
            self.config.admin_chat_id,
        )
    }
}
