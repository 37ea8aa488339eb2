#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ganadinero_bot::bot::{router::BotRouter, BotContext};
use ganadinero_bot::config::AffiliateLinks;
use ganadinero_bot::error::{Error, Result};
use ganadinero_bot::models::job_listing::JobListing;
use ganadinero_bot::models::outbound::OutboundMessage;
use ganadinero_bot::models::telegram::{
    CallbackQuery, Chat, ChatMember, Message, Update, User,
};
use ganadinero_bot::services::job_board_service::JobSource;
use ganadinero_bot::services::telegram_service::ChatTransport;

pub const CHAT_ID: i64 = 5550001;
pub const MENU_MESSAGE_ID: i64 = 77;
pub const BOT_USERNAME: &str = "GanaDineroLABot";

#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Sent { chat_id: i64, message: OutboundMessage },
    Edited { chat_id: i64, message_id: i64, message: OutboundMessage },
    Answered { query_id: String },
}

impl Delivery {
    pub fn text(&self) -> Option<&str> {
        match self {
            Delivery::Sent { message, .. } | Delivery::Edited { message, .. } => {
                Some(message.text.as_str())
            }
            Delivery::Answered { .. } => None,
        }
    }
}

/// Records successful deliveries; sends whose text contains `fail_on` are rejected.
#[derive(Default)]
pub struct RecordingTransport {
    pub deliveries: Mutex<Vec<Delivery>>,
    pub fail_on: Option<String>,
}

impl RecordingTransport {
    pub fn failing_on(marker: &str) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail_on: Some(marker.to_string()),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Deliveries that carry a message, skipping callback answers.
    pub fn messages(&self) -> Vec<Delivery> {
        self.deliveries()
            .into_iter()
            .filter(|d| !matches!(d, Delivery::Answered { .. }))
            .collect()
    }

    fn check(&self, message: &OutboundMessage) -> Result<()> {
        match &self.fail_on {
            Some(marker) if message.text.contains(marker.as_str()) => Err(Error::Transport {
                method: "sendMessage".into(),
                description: "Bad Request: chat not found".into(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, message: &OutboundMessage) -> Result<()> {
        self.check(message)?;
        self.deliveries.lock().unwrap().push(Delivery::Sent {
            chat_id,
            message: message.clone(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        message: &OutboundMessage,
    ) -> Result<()> {
        self.check(message)?;
        self.deliveries.lock().unwrap().push(Delivery::Edited {
            chat_id,
            message_id,
            message: message.clone(),
        });
        Ok(())
    }

    async fn answer_callback(&self, query_id: &str) -> Result<()> {
        self.deliveries.lock().unwrap().push(Delivery::Answered {
            query_id: query_id.to_string(),
        });
        Ok(())
    }

    async fn chat_administrators(&self, _chat: &str) -> Result<Vec<ChatMember>> {
        Ok(Vec::new())
    }
}

pub struct StaticJobs(pub Vec<JobListing>);

#[async_trait]
impl JobSource for StaticJobs {
    async fn fetch_jobs(&self) -> Vec<JobListing> {
        self.0.clone()
    }
}

pub struct PanickingJobs;

#[async_trait]
impl JobSource for PanickingJobs {
    async fn fetch_jobs(&self) -> Vec<JobListing> {
        panic!("forced fetcher fault");
    }
}

pub fn sample_jobs(count: usize) -> Vec<JobListing> {
    (1..=count)
        .map(|i| {
            JobListing::new(
                format!("Proyecto {i}"),
                format!("USD {i}00"),
                format!("https://www.workana.com/job/proyecto-{i}"),
            )
        })
        .collect()
}

pub fn router_with(transport: Arc<RecordingTransport>, jobs: Arc<dyn JobSource>) -> BotRouter {
    BotRouter::new(BotContext {
        transport,
        jobs,
        affiliate_links: Arc::new(AffiliateLinks::default()),
        wallet_address: Arc::from("bNB1q2w3e4r5t6y7u8i9o0p"),
    })
}

pub fn user() -> User {
    User {
        id: 9001,
        is_bot: false,
        first_name: "Lucía".into(),
        last_name: None,
        username: Some("lucia".into()),
    }
}

fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        r#type: "private".into(),
    }
}

pub fn command_update(update_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: update_id * 10,
            from: Some(user()),
            chat: chat(),
            text: Some(text.to_string()),
        }),
        callback_query: None,
    }
}

pub fn callback_update(update_id: i64, data: &str) -> Update {
    Update {
        update_id,
        message: None,
        callback_query: Some(CallbackQuery {
            id: format!("cb-{update_id}"),
            from: user(),
            message: Some(Message {
                message_id: MENU_MESSAGE_ID,
                from: None,
                chat: chat(),
                text: Some("menu".into()),
            }),
            data: Some(data.to_string()),
        }),
    }
}
