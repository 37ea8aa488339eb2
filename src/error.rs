use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Telegram API error in {method}: {description}")]
    Transport { method: String, description: String },

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable label used as the `category` field in structured logs.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Network(_) | Error::Http { .. } => "network",
            Error::Parse(_) | Error::Url(_) => "parse",
            Error::Transport { .. } => "transport",
            Error::Scheduler(_) => "scheduler",
            Error::Unauthorized(_) => "unauthorized",
            Error::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Internal(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_faults_map_to_their_status() {
        let unauthorized = Error::Unauthorized("invalid_webhook_secret".into()).into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let stopped = Error::Internal("update worker is not running".into()).into_response();
        assert_eq!(stopped.status(), StatusCode::SERVICE_UNAVAILABLE);

        let other = Error::Parse("listing 0 has no budget".into()).into_response();
        assert_eq!(other.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fetch_faults_share_categories() {
        let http = Error::Http {
            status: 502,
            url: "https://www.workana.com/jobs".into(),
        };
        assert_eq!(http.category(), "network");
        assert_eq!(Error::from(url::ParseError::EmptyHost).category(), "parse");
    }
}
