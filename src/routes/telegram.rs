use axum::{extract::State, http::StatusCode, Json};
use subtle::ConstantTimeEq;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::models::telegram::Update;

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Clone)]
pub struct WebhookState {
    pub tx: mpsc::Sender<Update>,
    pub secret: Option<String>,
}

#[axum::debug_handler]
pub async fn handle_webhook(
    State(state): State<WebhookState>,
    headers: axum::http::HeaderMap,
    Json(update): Json<Update>,
) -> Result<StatusCode> {
    verify_secret(&headers, state.secret.as_deref())?;
    tracing::info!("Received Telegram webhook update ID: {}", update.update_id);

    state
        .tx
        .send(update)
        .await
        .map_err(|_| Error::Internal("update worker is not running".into()))?;

    Ok(StatusCode::OK)
}

fn verify_secret(headers: &axum::http::HeaderMap, expected: Option<&str>) -> Result<()> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let Some(secret_hdr) = headers.get(SECRET_HEADER) else {
        return Err(Error::Unauthorized("missing_webhook_secret".into()));
    };
    let provided = secret_hdr
        .to_str()
        .map_err(|_| Error::Unauthorized("invalid_secret_header".into()))?;
    if ConstantTimeEq::ct_eq(provided.as_bytes(), expected.as_bytes()).into() {
        Ok(())
    } else {
        Err(Error::Unauthorized("invalid_webhook_secret".into()))
    }
}
