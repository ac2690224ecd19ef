use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::credentials;
use crate::auth::dto::{LoginRequest, PublicUser, TokenResponse};
use crate::auth::error::AuthError;
use crate::auth::extractors::{promote_query_token, CurrentUser};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .layer(middleware::from_fn(promote_query_token))
}

/// Verify credentials and hand back a signed bearer token.
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let email = body.email.as_deref().unwrap_or("");
    let password = body.password.as_deref().unwrap_or("");

    let user = credentials::verify(state.store.as_ref(), email, password).await?;
    let token = state.keys.sign(user.id)?;

    info!(user_id = %user.id, "login succeeded");
    Ok(Json(TokenResponse { token }))
}

/// Return the authenticated caller as currently stored.
#[instrument(skip_all)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from_user(&user))
}
