use http::{Response, StatusCode};

use crate::response;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Database not configured")]
    NotConfigured,
    #[error("Expression and result required")]
    MissingFields,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),
    #[error("Database error")]
    Store(#[from] StoreError),
    #[error("Failed to encode response")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
    #[error("connection task failed: {0}")]
    ConnectionTask(#[from] tokio::task::JoinError),
}

impl HistoryError {
    pub fn status(&self) -> StatusCode {
        match self {
            HistoryError::MissingFields | HistoryError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            HistoryError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HistoryError::NotConfigured | HistoryError::Store(_) | HistoryError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn into_response(self) -> Response<String> {
        let status = self.status();
        match &self {
            HistoryError::Store(e) => tracing::error!(error = %e, "store failure"),
            HistoryError::Encode(e) => tracing::error!(error = %e, "response encoding failure"),
            HistoryError::InvalidBody(e) => tracing::warn!(error = %e, "rejected request body"),
            other => tracing::warn!(%status, "->> {}", other),
        }

        response::error(status, &self.to_string())
    }
}
