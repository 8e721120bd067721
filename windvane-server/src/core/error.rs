use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for Windvane operations
#[derive(Debug, Error)]
pub enum WindvaneError {
    #[error("Cache name must not be blank")]
    InvalidCacheName,

    #[error("Invalid zip code: {0}")]
    InvalidZipCode(String),

    #[error("Upstream weather API unreachable: {0}")]
    Upstream(String),

    #[error("Upstream weather API returned status {0}")]
    UpstreamStatus(u16),

    #[error("No wind data available for {0}")]
    NoData(String),
}

impl WindvaneError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCacheName | Self::InvalidZipCode(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamStatus(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::NoData(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for WindvaneError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Result type alias for Windvane operations
pub type Result<T> = std::result::Result<T, WindvaneError>;
