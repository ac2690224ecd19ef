use tracing::warn;

use crate::auth::claims::Claims;
use crate::auth::error::AuthError;
use crate::auth::repo::{User, UserStore};

/// Re-resolve a decoded token's subject to a live user record.
///
/// A validly signed token proves nothing about the account's current state:
/// the user may have been deleted since issuance, or the token may have been
/// minted elsewhere with an unknown subject. Both cases are `Unauthorized`.
/// On success the record comes straight from the store, so downstream code
/// sees current account state rather than whatever was true at signing time.
pub async fn refresh(store: &dyn UserStore, claims: &Claims) -> Result<User, AuthError> {
    match store.find_by_id(claims.sub).await? {
        Some(user) => Ok(user),
        None => {
            warn!(user_id = %claims.sub, "token subject no longer resolves to a user");
            Err(AuthError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::auth::repo::testing::{user_with_password, MemStore};

    fn claims_for(user_id: Uuid) -> Claims {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Claims {
            sub: user_id,
            iat: now as usize,
            exp: (now + 300) as usize,
        }
    }

    #[tokio::test]
    async fn live_subject_resolves_to_its_user() {
        let store = MemStore::new();
        let user = user_with_password("a@x.com", "secret");
        store.insert(user.clone());

        let refreshed = refresh(&store, &claims_for(user.id)).await.expect("refresh");
        assert_eq!(refreshed.id, user.id);
    }

    #[tokio::test]
    async fn subject_deleted_after_signing_is_unauthorized() {
        let store = MemStore::new();
        let user = user_with_password("a@x.com", "secret");
        store.insert(user.clone());
        let claims = claims_for(user.id);

        store.remove(user.id);
        let err = refresh(&store, &claims).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn unknown_subject_is_unauthorized() {
        let store = MemStore::new();
        let err = refresh(&store, &claims_for(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn returns_the_record_currently_in_the_store() {
        let store = MemStore::new();
        let mut user = user_with_password("old@x.com", "secret");
        store.insert(user.clone());
        let claims = claims_for(user.id);

        // The account changed after the token was issued.
        user.email = "new@x.com".to_string();
        store.insert(user.clone());

        let refreshed = refresh(&store, &claims).await.expect("refresh");
        assert_eq!(refreshed.email, "new@x.com");
    }

    #[tokio::test]
    async fn store_failures_stay_distinct_from_not_found() {
        let store = MemStore::failing();
        let err = refresh(&store, &claims_for(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }
}
