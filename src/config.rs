use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_JOB_BOARD_URL: &str = "https://www.workana.com/jobs?language=es";
pub const DEFAULT_WALLET_ADDRESS: &str = "bNB1q2w3e4r5t6y7u8i9o0p";
pub const DEFAULT_BROADCAST_CHANNEL: &str = "@GanaDineroLA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Workana,
    Premise,
    Toloka,
    Fiverr,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Workana,
        Platform::Premise,
        Platform::Toloka,
        Platform::Fiverr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Workana => "workana",
            Platform::Premise => "premise",
            Platform::Toloka => "toloka",
            Platform::Fiverr => "fiverr",
        }
    }
}

/// Referral URLs per platform. Built once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLinks {
    pub workana: String,
    pub premise: String,
    pub toloka: String,
    pub fiverr: String,
}

impl AffiliateLinks {
    pub fn get(&self, platform: Platform) -> &str {
        match platform {
            Platform::Workana => &self.workana,
            Platform::Premise => &self.premise,
            Platform::Toloka => &self.toloka,
            Platform::Fiverr => &self.fiverr,
        }
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            workana: get_env_or("AFFILIATE_WORKANA_URL", &defaults.workana),
            premise: get_env_or("AFFILIATE_PREMISE_URL", &defaults.premise),
            toloka: get_env_or("AFFILIATE_TOLOKA_URL", &defaults.toloka),
            fiverr: get_env_or("AFFILIATE_FIVERR_URL", &defaults.fiverr),
        }
    }
}

impl Default for AffiliateLinks {
    fn default() -> Self {
        Self {
            workana: "https://www.workana.com/?ref=TU_CODIGO".to_string(),
            premise: "https://premise.com/ref/?ref=TU_CODIGO".to_string(),
            toloka: "https://toloka.yandex.com/?ref=TU_CODIGO".to_string(),
            fiverr: "https://www.fiverr.com/?utm_source=TU_CODIGO".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Polling,
    Webhook,
}

impl std::str::FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(UpdateMode::Polling),
            "webhook" => Ok(UpdateMode::Webhook),
            other => Err(format!("expected `polling` or `webhook`, got `{}`", other)),
        }
    }
}

/// Who receives the daily broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSource {
    /// Explicit chat ids from `BROADCAST_RECIPIENTS`.
    Registry(Vec<i64>),
    /// Administrators of a channel, resolved on every broadcast.
    ChannelAdministrators(String),
}

#[derive(Debug, Clone)]
pub struct JobBoardConfig {
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_api_url: String,
    pub admin_chat_id: Option<i64>,
    pub affiliate_links: AffiliateLinks,
    pub job_board: JobBoardConfig,
    pub wallet_address: String,
    pub recipients: RecipientSource,
    pub update_mode: UpdateMode,
    pub poll_timeout_secs: u64,
    pub server_address: String,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let update_mode = get_env_parse_or("UPDATE_MODE", UpdateMode::Polling)?;
        let webhook_url = env::var("WEBHOOK_URL").ok().filter(|v| !v.is_empty());
        if update_mode == UpdateMode::Webhook && webhook_url.is_none() {
            return Err(Error::Config(
                "WEBHOOK_URL is required when UPDATE_MODE=webhook".to_string(),
            ));
        }

        let recipients = match env::var("BROADCAST_RECIPIENTS") {
            Ok(raw) if !raw.trim().is_empty() => RecipientSource::Registry(parse_chat_ids(&raw)?),
            _ => RecipientSource::ChannelAdministrators(get_env_or(
                "BROADCAST_CHANNEL",
                DEFAULT_BROADCAST_CHANNEL,
            )),
        };

        let admin_chat_id = match env::var("ADMIN_CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse().map_err(|e| {
                Error::Config(format!("Invalid value for ADMIN_CHAT_ID: {}", e))
            })?),
            _ => None,
        };

        Ok(Self {
            telegram_bot_token: get_env("TELEGRAM_TOKEN")?,
            telegram_api_url: get_env_or("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
            admin_chat_id,
            affiliate_links: AffiliateLinks::from_env(),
            job_board: JobBoardConfig {
                url: get_env_or("JOB_BOARD_URL", DEFAULT_JOB_BOARD_URL),
                timeout: Duration::from_secs(get_env_parse_or("FETCH_TIMEOUT_SECS", 10u64)?),
            },
            wallet_address: get_env_or("GUIDE_WALLET_ADDRESS", DEFAULT_WALLET_ADDRESS),
            recipients,
            update_mode,
            poll_timeout_secs: get_env_parse_or("POLL_TIMEOUT_SECS", 30u64)?,
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            webhook_url,
            webhook_secret: env::var("WEBHOOK_SECRET").ok().filter(|v| !v.is_empty()),
        })
    }
}

/// Parses a comma separated list of chat ids, skipping blank entries.
pub fn parse_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|e| Error::Config(format!("Invalid chat id `{}`: {}", part, e)))
        })
        .collect()
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        _ => Ok(default),
    }
}
