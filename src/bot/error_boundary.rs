use std::any::Any;

use tracing::{error, warn};

use crate::bot::router::{BotRouter, Dispatch};
use crate::models::event::InboundEvent;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled(Dispatch),
    Failed,
}

/// Runs one dispatch in its own task so that both errors and panics stay here.
///
/// On failure the originating chat receives exactly one generic notice; a
/// failure to deliver that notice is logged and dropped.
pub async fn run_guarded(router: &BotRouter, event: InboundEvent) -> Outcome {
    let task_router = router.clone();
    let task_event = event.clone();
    let joined = tokio::spawn(async move { task_router.dispatch(&task_event).await }).await;

    match joined {
        Ok(Ok(dispatch)) => return Outcome::Handled(dispatch),
        Ok(Err(e)) => {
            error!(
                update_id = event.update_id,
                chat_id = event.chat_id,
                event = %event.label(),
                category = e.category(),
                error = %e,
                "Update caused error"
            );
        }
        Err(join_err) => {
            let reason = if join_err.is_panic() {
                panic_message(join_err.into_panic())
            } else {
                "handler task cancelled".to_string()
            };
            error!(
                update_id = event.update_id,
                chat_id = event.chat_id,
                event = %event.label(),
                category = "panic",
                error = %reason,
                "Update caused error"
            );
        }
    }

    let notice = render::failure_notice();
    if let Err(e) = router
        .context()
        .transport
        .send_message(event.chat_id, &notice)
        .await
    {
        warn!(
            chat_id = event.chat_id,
            category = e.category(),
            error = %e,
            "Could not deliver failure notice"
        );
    }
    Outcome::Failed
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "handler panicked".to_string()
    }
}
