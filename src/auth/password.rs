use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use tracing::error;

/// One-way comparison of a plaintext candidate against a stored hash. The
/// stored hash is never decrypted; a malformed hash is an error, not a
/// mismatch.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is not parseable");
        anyhow::anyhow!("argon2 parse: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Hash a plaintext password with a fresh random salt. Fixtures need real
/// Argon2 output for the comparison side to accept; the service itself never
/// writes hashes.
#[cfg(test)]
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    use argon2::password_hash::{PasswordHasher, SaltString};
    use rand::rngs::OsRng;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash: {e}"))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_accepts_the_hashed_password() {
        let hash = hash_password("hunter2hunter2").expect("hash");
        assert!(verify_password("hunter2hunter2", &hash).expect("verify"));
    }

    #[test]
    fn comparison_rejects_a_different_password() {
        let hash = hash_password("original-secret").expect("hash");
        assert!(!verify_password("guessed-secret", &hash).expect("verify"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("anything", "$argon2id$garbage").is_err());
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        // Fresh salt per call.
        let a = hash_password("same-input").expect("hash");
        let b = hash_password("same-input").expect("hash");
        assert_ne!(a, b);
    }
}
