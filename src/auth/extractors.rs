use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::error::AuthError;
use crate::auth::repo::User;
use crate::auth::session;
use crate::state::AppState;

/// Promote an `access_token` query parameter into the `Authorization` header
/// so the rest of the pipeline only ever deals with bearer-form tokens. A
/// query-supplied token gets no special trust; it goes through the same
/// validation. When both are present the query parameter wins, matching the
/// long-standing behavior clients rely on.
pub async fn promote_query_token(mut req: Request, next: Next) -> Response {
    if let Some(token) = req.uri().query().and_then(access_token_param) {
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => {
                req.headers_mut().insert(header::AUTHORIZATION, value);
            }
            // A query token with bytes no header can carry still outranks the
            // header; dropping the header leaves the request tokenless.
            Err(_) => {
                req.headers_mut().remove(header::AUTHORIZATION);
            }
        }
    }
    next.run(req).await
}

fn access_token_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
}

/// The authenticated caller: token decoded, subject re-resolved against the
/// store. Handlers that take this run only in the `Authorized` state and see
/// the freshest user record, not whatever the token was signed against.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| {
                h.strip_prefix("Bearer ")
                    .or_else(|| h.strip_prefix("bearer "))
            })
            .ok_or_else(|| {
                warn!("request without a bearer token");
                AuthError::InvalidToken
            })?;

        let claims = state.keys.decode(bearer)?;
        let user = session::refresh(state.store.as_ref(), &claims).await?;
        Ok(CurrentUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_param_is_found_among_other_params() {
        assert_eq!(
            access_token_param("foo=1&access_token=abc.def.ghi&bar=2"),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn access_token_param_is_percent_decoded() {
        assert_eq!(
            access_token_param("access_token=a%2Bb"),
            Some("a+b".to_string())
        );
    }

    #[test]
    fn absent_param_yields_none() {
        assert_eq!(access_token_param("foo=1&bar=2"), None);
        assert_eq!(access_token_param(""), None);
    }
}
