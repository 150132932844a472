//! Password hashing
//!
//! Argon2id with default parameters and a random salt per hash, stored as a
//! PHC string. Verification goes through Argon2's own comparison.

use argon2::{
    Argon2,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
};
use rand_core::OsRng;

/// Well-formed hash with the default parameters that no password matches.
/// Logins for unknown emails verify against it so they cost as much as a
/// wrong password.
const PLACEHOLDER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Hash `password` with a fresh salt.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Check `password` against a stored PHC string.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or verification
/// fails for a reason other than a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(stored_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(error) => Err(error),
    }
}

/// Run a full verification of `password` that always fails.
///
/// # Errors
///
/// Returns an error if Argon2 rejects the input.
pub fn verify_placeholder(password: &str) -> Result<(), PasswordHashError> {
    verify_password(password, PLACEHOLDER_HASH).map(|_matched| ())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_original_password_only() -> TestResult {
        let hash = hash_password("correct horse")?;

        assert!(hash.starts_with("$argon2"), "unexpected hash format: {hash}");
        assert!(verify_password("correct horse", &hash)?);
        assert!(!verify_password("battery staple", &hash)?);

        Ok(())
    }

    #[test]
    fn salts_differ_between_hashes() -> TestResult {
        assert_ne!(hash_password("same")?, hash_password("same")?);

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn placeholder_runs_a_real_verification() -> TestResult {
        assert!(!verify_password("", PLACEHOLDER_HASH)?);
        assert!(!verify_password("correct horse", PLACEHOLDER_HASH)?);

        verify_placeholder("correct horse")?;

        Ok(())
    }

    #[test]
    fn placeholder_uses_default_parameters() -> TestResult {
        let hash = hash_password("correct horse")?;

        let params = |phc: &str| phc.split('$').take(4).collect::<Vec<_>>().join("$");

        assert_eq!(params(PLACEHOLDER_HASH), params(&hash));

        Ok(())
    }
}
