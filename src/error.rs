use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::views;

#[derive(Debug, ThisError)]
pub enum NovellaError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote store error with status {status}: {message}")]
    Remote { status: StatusCode, message: String },

    #[error("Expected at most one row from `{table}`, got {count}")]
    MultipleRows { table: &'static str, count: usize },

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("Sign-in failed")]
    Unauthorized,

    #[error("Admin capability required")]
    Forbidden,

    #[error("Not found")]
    NotFound,
}

impl NovellaError {
    pub fn status(&self) -> StatusCode {
        match self {
            NovellaError::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NovellaError::Unauthorized => StatusCode::UNAUTHORIZED,
            NovellaError::Forbidden => StatusCode::FORBIDDEN,
            NovellaError::NotFound => StatusCode::NOT_FOUND,
            NovellaError::Reqwest(_) | NovellaError::UrlParse(_) | NovellaError::Remote { .. } => {
                StatusCode::BAD_GATEWAY
            }
            NovellaError::Json(_)
            | NovellaError::Database(_)
            | NovellaError::Io(_)
            | NovellaError::Config(_)
            | NovellaError::MultipleRows { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the browser. Internal failures stay generic.
    fn public_message(&self) -> String {
        match self {
            NovellaError::InvalidForm(reason) => reason.clone(),
            NovellaError::Unauthorized => "Invalid credentials.".to_string(),
            NovellaError::Forbidden => "You are not allowed to do that.".to_string(),
            NovellaError::NotFound => "Novel not found.".to_string(),
            NovellaError::Reqwest(_) | NovellaError::UrlParse(_) | NovellaError::Remote { .. } => {
                "The remote store is unavailable.".to_string()
            }
            _ => "An internal server error occurred.".to_string(),
        }
    }
}

impl IntoResponse for NovellaError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = views::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}
