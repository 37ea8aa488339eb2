pub mod health;
pub mod telegram;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use self::telegram::WebhookState;

pub const WEBHOOK_PATH: &str = "/api/webhook/telegram";

pub fn webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(WEBHOOK_PATH, post(telegram::handle_webhook))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
