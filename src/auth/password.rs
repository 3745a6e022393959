use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
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

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_secret_is_never_the_plaintext() {
        let hash = hash_password("joepassword").expect("hash");
        assert_ne!(hash, "joepassword");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("joepassword", &hash).expect("verify"));
    }

    #[test]
    fn wrong_credential_fails_verification() {
        let hash = hash_password("joepassword").expect("hash");
        assert!(!verify_password("sallypassword", &hash).expect("verify"));
    }

    #[test]
    fn same_password_hashes_differently_per_registration() {
        let joe = hash_password("joepassword").expect("hash");
        let again = hash_password("joepassword").expect("hash");
        // each registration draws a fresh salt
        assert_ne!(joe, again);
    }

    #[test]
    fn stored_value_that_is_not_a_hash_is_an_error() {
        // would happen if a plaintext secret ever reached the store
        assert!(verify_password("joepassword", "joepassword").is_err());
    }
}
