use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decoded token payload. The token is self-contained: validity is solely
/// signature plus expiry, there is no revocation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
