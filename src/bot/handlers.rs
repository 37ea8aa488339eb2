use tracing::info;

use crate::bot::{BotContext, ReplyTarget};
use crate::error::Result;
use crate::models::survey::survey_entries;
use crate::render;

pub async fn start(ctx: &BotContext, target: ReplyTarget, first_name: &str) -> Result<()> {
    target.send(ctx, &render::welcome(first_name)).await
}

/// One message per listing; the empty notice replaces the menu on button presses.
pub async fn jobs(ctx: &BotContext, target: ReplyTarget) -> Result<()> {
    let jobs = ctx.jobs.fetch_jobs().await;
    if jobs.is_empty() {
        return target.replace(ctx, &render::no_jobs()).await;
    }

    info!(chat_id = target.chat_id, count = jobs.len(), "Sending job listings");
    for job in &jobs {
        target
            .send(ctx, &render::job_listing(job, &ctx.affiliate_links))
            .await?;
    }
    Ok(())
}

pub async fn surveys(ctx: &BotContext, target: ReplyTarget) -> Result<()> {
    for entry in survey_entries(&ctx.affiliate_links) {
        target.send(ctx, &render::survey(&entry)).await?;
    }
    Ok(())
}

pub async fn guides(ctx: &BotContext, target: ReplyTarget) -> Result<()> {
    target.replace(ctx, &render::guide()).await
}

pub async fn buy_guide(ctx: &BotContext, target: ReplyTarget) -> Result<()> {
    target
        .replace(ctx, &render::buy_guide(&ctx.wallet_address))
        .await
}
