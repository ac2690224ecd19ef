use std::time::Duration;

use jsonwebtoken::{
    decode, encode, get_current_timestamp, DecodingKey, EncodingKey, Header, Validation,
};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::auth::error::AuthError;
use crate::config::JwtConfig;

/// Signing and verification keys derived once at startup from the configured
/// secret, plus the configured token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::from_secs((cfg.ttl_minutes as u64) * 60),
        }
    }

    /// Issue a token bound to `user_id`, expiring after the configured
    /// lifetime.
    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token signed");
        Ok(token)
    }

    /// Validate signature and expiry and return the claims. Every rejection
    /// reason collapses into `InvalidToken`; the caller never learns which
    /// check failed. Does not touch the user store.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.leeway = 0; // reject at exp, not sixty seconds after
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::InvalidToken
        })?;
        // Even with zero leeway the library lets a token live through the exp
        // second itself; validity ends at exp, not after it.
        if data.claims.exp as u64 <= get_current_timestamp() {
            debug!("token rejected at expiry");
            return Err(AuthError::InvalidToken);
        }
        Ok(data.claims)
    }
}
