pub mod error_boundary;
pub mod handlers;
pub mod polling;
pub mod router;
pub mod worker;

use std::sync::Arc;

use crate::config::AffiliateLinks;
use crate::error::Result;
use crate::models::outbound::OutboundMessage;
use crate::services::job_board_service::JobSource;
use crate::services::telegram_service::ChatTransport;

/// Everything a handler may touch. Cheap to clone; nothing in it is mutable.
#[derive(Clone)]
pub struct BotContext {
    pub transport: Arc<dyn ChatTransport>,
    pub jobs: Arc<dyn JobSource>,
    pub affiliate_links: Arc<AffiliateLinks>,
    pub wallet_address: Arc<str>,
}

/// Where a handler's output goes.
///
/// `origin_message_id` is set for button presses; `replace` then edits the
/// message that carried the button instead of sending a new one.
#[derive(Debug, Clone, Copy)]
pub struct ReplyTarget {
    pub chat_id: i64,
    pub origin_message_id: Option<i64>,
}

impl ReplyTarget {
    pub fn chat(chat_id: i64) -> Self {
        Self {
            chat_id,
            origin_message_id: None,
        }
    }

    pub async fn send(&self, ctx: &BotContext, message: &OutboundMessage) -> Result<()> {
        ctx.transport.send_message(self.chat_id, message).await
    }

    pub async fn replace(&self, ctx: &BotContext, message: &OutboundMessage) -> Result<()> {
        match self.origin_message_id {
            Some(message_id) => {
                ctx.transport
                    .edit_message(self.chat_id, message_id, message)
                    .await
            }
            None => self.send(ctx, message).await,
        }
    }
}
