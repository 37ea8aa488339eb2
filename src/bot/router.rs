use tracing::{debug, warn};

use crate::bot::{handlers, BotContext, ReplyTarget};
use crate::error::Result;
use crate::models::event::{EventKind, InboundEvent};
use crate::render::{CB_BUY_GUIDE, CB_GUIDES, CB_JOBS, CB_SURVEYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Jobs,
    Surveys,
    Guides,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Command::Start),
            "trabajos" => Some(Command::Jobs),
            "encuestas" => Some(Command::Surveys),
            "guias" => Some(Command::Guides),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Jobs,
    Surveys,
    Guides,
    BuyGuide,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CB_JOBS => Some(CallbackAction::Jobs),
            CB_SURVEYS => Some(CallbackAction::Surveys),
            CB_GUIDES => Some(CallbackAction::Guides),
            CB_BUY_GUIDE => Some(CallbackAction::BuyGuide),
            _ => None,
        }
    }
}

/// Outcome of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Command(Command),
    Callback(CallbackAction),
    Ignored,
}

#[derive(Clone)]
pub struct BotRouter {
    ctx: BotContext,
}

impl BotRouter {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &BotContext {
        &self.ctx
    }

    pub async fn dispatch(&self, event: &InboundEvent) -> Result<Dispatch> {
        match &event.kind {
            EventKind::Command { name } => {
                let Some(command) = Command::parse(name) else {
                    debug!(chat_id = event.chat_id, command = %name, "Ignoring unknown command");
                    return Ok(Dispatch::Ignored);
                };
                self.run_command(command, event).await?;
                Ok(Dispatch::Command(command))
            }
            EventKind::Callback {
                query_id,
                data,
                message_id,
            } => {
                if let Err(e) = self.ctx.transport.answer_callback(query_id).await {
                    warn!(category = e.category(), error = %e, "Failed to answer callback query");
                }
                let Some(action) = CallbackAction::parse(data) else {
                    warn!(
                        chat_id = event.chat_id,
                        update_id = event.update_id,
                        data = %data,
                        "Ignoring unknown callback data"
                    );
                    return Ok(Dispatch::Ignored);
                };
                let target = ReplyTarget {
                    chat_id: event.chat_id,
                    origin_message_id: *message_id,
                };
                self.run_callback(action, target).await?;
                Ok(Dispatch::Callback(action))
            }
        }
    }

    async fn run_command(&self, command: Command, event: &InboundEvent) -> Result<()> {
        let target = ReplyTarget::chat(event.chat_id);
        match command {
            Command::Start => handlers::start(&self.ctx, target, event.first_name()).await,
            Command::Jobs => handlers::jobs(&self.ctx, target).await,
            Command::Surveys => handlers::surveys(&self.ctx, target).await,
            Command::Guides => handlers::guides(&self.ctx, target).await,
        }
    }

    async fn run_callback(&self, action: CallbackAction, target: ReplyTarget) -> Result<()> {
        match action {
            CallbackAction::Jobs => handlers::jobs(&self.ctx, target).await,
            CallbackAction::Surveys => handlers::surveys(&self.ctx, target).await,
            CallbackAction::Guides => handlers::guides(&self.ctx, target).await,
            CallbackAction::BuyGuide => handlers::buy_guide(&self.ctx, target).await,
        }
    }
}
