use tracing::warn;

use crate::auth::error::AuthError;
use crate::auth::repo::{User, UserStore};

/// Check a submitted email/password pair against the store.
///
/// Empty or absent credentials are rejected before any store access. Lookup
/// is by exact, case-sensitive email; the stored hash is only ever compared
/// one-way. Unknown-email and wrong-password stay distinguishable responses,
/// kept for compatibility with existing clients. Reads only, no side effects.
pub async fn verify(
    store: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let user = store.find_by_email(email).await?.ok_or_else(|| {
        warn!(email = %email, "login with unknown email");
        AuthError::UnknownEmail
    })?;

    if !user.verify_password(password)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::BadCredentials);
    }

    Ok(user)
}
