use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors returned by the REST client helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Remote rejection: the server answered with a non-success status.
    #[error("http {status}: {body}")]
    Status { status: u16, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether waiting and retrying the call can plausibly succeed.
    ///
    /// Only transport-level failures qualify; a remote rejection is reported
    /// as-is without burning the retry budget.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

pub type WsResult<T> = std::result::Result<T, WsError>;

#[derive(Debug, Error)]
pub enum WsError {
    #[error("proxy tunnel via {proxy} rejected: {reason}")]
    ProxyTunnel { proxy: String, reason: String },
    #[error("invalid session url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
