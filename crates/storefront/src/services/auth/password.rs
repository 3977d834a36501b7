//! Password hashing and verification with Argon2id.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) that
//! carry their own salt and cost, so raising the constants below only affects
//! new hashes; existing ones keep verifying with the parameters they embed.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::AuthError;

/// Argon2 memory cost in KiB.
pub const ARGON2_MEMORY_KIB: u32 = 19_456;

/// Argon2 iteration count.
pub const ARGON2_ITERATIONS: u32 = 2;

/// Argon2 lanes.
pub const ARGON2_PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|_| AuthError::PasswordHash)?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the cost parameters are invalid or hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Check a password against a stored PHC hash.
///
/// Returns `false` on mismatch and on any malformed hash; it never errors.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("secret1").unwrap();
        assert!(!verify_password("wrongpass", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();

        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(verify_password("same password", &b));
    }

    #[test]
    fn test_hash_embeds_cost_parameters() {
        let hash = hash_password("pw").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains(&format!(
            "m={ARGON2_MEMORY_KIB},t={ARGON2_ITERATIONS},p={ARGON2_PARALLELISM}"
        )));
    }

    #[test]
    fn test_malformed_hash_is_false_not_error() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "not-a-phc-string"));
        assert!(!verify_password("pw", "$argon2id$v=19$m=19456,t=2,p=1$bm9wZQ$"));
        assert!(!verify_password(
            "pw",
            "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy"
        ));
    }

    #[test]
    fn test_unicode_and_long_passwords() {
        let long = "p".repeat(1_000);
        let hash = hash_password(&long).unwrap();
        assert!(verify_password(&long, &hash));

        let hash = hash_password("pässwörd🔑").unwrap();
        assert!(verify_password("pässwörd🔑", &hash));
    }
}
