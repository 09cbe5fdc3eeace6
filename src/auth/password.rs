use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Check `plain` against a stored credential.
///
/// Stored values in argon2 PHC form are verified with argon2; anything else is
/// a legacy plaintext password and is compared directly. A stored argon2 value
/// that cannot be parsed or checked is an error, not a mismatch.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    if !stored.starts_with("$argon2") {
        return Ok(plain == stored);
    }
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            error!(error = %e, "argon2 verify_password error");
            Err(anyhow::anyhow!(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn plaintext_values_compare_exactly() {
        assert!(verify_password("glow123", "glow123").unwrap());
        assert!(!verify_password("Glow123", "glow123").unwrap());
        assert!(!verify_password("", "glow123").unwrap());
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "$argon2!id$corrupt").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn hash_without_output_is_a_mismatch() {
        assert!(!verify_password("anything", "$argon2id$not-a-valid-hash").unwrap());
    }
}
