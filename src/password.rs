//! Password utilities

use argon2::Argon2;
use argon2::password_hash::Error;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;

/// Hash a given password with a fresh salt
///
/// The result is a PHC string, salt and parameters included
pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = Argon2::default();

    let hashed_password = argon2.hash_password(password.as_bytes(), &salt)?;

    Ok(hashed_password.to_string())
}

/// Verify a given password against a given hash
///
/// A mismatch is `Ok(false)`, only an unreadable hash is an error
pub fn verify(hashed_password: &str, password: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hashed_password)?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_differs_from_password() {
        let hashed_password = hash("verysecret").unwrap();

        assert_ne!("verysecret", hashed_password);
        assert!(hashed_password.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_is_salted() {
        assert_ne!(hash("verysecret").unwrap(), hash("verysecret").unwrap());
    }

    #[test]
    fn test_verify() {
        let hashed_password = hash("verysecret").unwrap();

        assert!(verify(&hashed_password, "verysecret").unwrap());
        assert!(!verify(&hashed_password, "wrongpassword").unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        assert!(verify("verysecret", "verysecret").is_err());
    }
}
