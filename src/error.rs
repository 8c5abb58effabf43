use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::views;

#[derive(Debug, ThisError)]
pub enum VerdantError {
    #[error("no plant with id {0}")]
    PlantNotFound(i64),

    #[error("no room with id {0}")]
    RoomNotFound(i64),

    #[error("no room named {0:?}")]
    UnknownRoom(String),

    #[error("cannot delete the only remaining room")]
    LastRoom,

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

/// Foreign-key or uniqueness violations from stale ids surface as conflicts
/// rather than generic server errors.
fn is_integrity_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation() || db.is_unique_violation())
}

impl IntoResponse for VerdantError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            VerdantError::PlantNotFound(_)
            | VerdantError::RoomNotFound(_)
            | VerdantError::UnknownRoom(_) => (StatusCode::NOT_FOUND, self.to_string()),
            VerdantError::LastRoom => (StatusCode::CONFLICT, self.to_string()),
            VerdantError::Database(e) if is_integrity_violation(e) => (
                StatusCode::CONFLICT,
                "the referenced record no longer exists".to_string(),
            ),
            VerdantError::Database(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal server error occurred".to_string(),
                )
            }
        };
        (status, Html(views::error_page(status, &message))).into_response()
    }
}
