use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::repo::StoreError;

/// Classified outcome of the authentication pipeline. The first four map to
/// fixed client-facing responses; `Store` and `Internal` fall through to the
/// generic 500 handler without leaking the underlying message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("You need valid email and password")]
    MissingCredentials,

    #[error("No user with the given email")]
    UnknownEmail,

    #[error("Incorrect credentials")]
    BadCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Wire shape of every error response: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingCredentials => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::UnknownEmail
            | AuthError::BadCredentials
            | AuthError::InvalidToken
            | AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AuthError::Store(e) => {
                error!(error = %e, "user store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AuthError::Internal(e) => {
                error!(error = %e, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_variants_keep_their_fixed_messages() {
        assert_eq!(
            AuthError::MissingCredentials.to_string(),
            "You need valid email and password"
        );
        assert_eq!(
            AuthError::UnknownEmail.to_string(),
            "No user with the given email"
        );
        assert_eq!(AuthError::BadCredentials.to_string(), "Incorrect credentials");
        assert_eq!(AuthError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn store_failures_do_not_reach_the_body() {
        let err = AuthError::Store(StoreError::Db(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
