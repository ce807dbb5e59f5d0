use std::fmt;
use std::str::FromStr;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::{error, warn};

use crate::error::PasswordError;

const ARGON2_PREFIX: &str = "$argon2";

/// How freshly registered passwords are turned into stored digests.
///
/// `Sha256` is the unsalted single-pass digest existing wallet files were
/// written with. `Argon2` produces a salted PHC string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Sha256,
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "argon2" => Ok(Self::Argon2),
            other => Err(format!("unknown password scheme `{other}`")),
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => f.write_str("sha256"),
            Self::Argon2 => f.write_str("argon2"),
        }
    }
}

/// Lowercase hex SHA-256 of the plaintext. Deterministic, no salt.
pub fn hash(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

pub fn hash_password(plain: &str, scheme: PasswordScheme) -> Result<String, PasswordError> {
    match scheme {
        PasswordScheme::Sha256 => Ok(hash(plain)),
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(plain.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| {
                    error!(error = %e, "argon2 hash_password error");
                    PasswordError::Hash(e.to_string())
                })
        }
    }
}

/// Checks a plaintext against a stored digest of either scheme.
///
/// A stored value that looks like an argon2 PHC string but does not parse
/// never matches.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    if !stored.starts_with(ARGON2_PREFIX) {
        return hash(plain) == stored;
    }
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "argon2 parse hash error");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash("secret1"), hash("secret1"));
        assert_ne!(hash("secret1"), hash("secret2"));
    }

    #[test]
    fn hash_matches_known_sha256_digest() {
        assert_eq!(
            hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash("").len(), 64);
    }

    #[test]
    fn sha256_scheme_verifies() {
        let stored = hash_password("secret1", PasswordScheme::Sha256).expect("sha256 hashing");
        assert!(verify_password("secret1", &stored));
        assert!(!verify_password("secret2", &stored));
    }

    #[test]
    fn argon2_scheme_is_salted_and_verifies() {
        let a = hash_password("Secur3P@ssw0rd!", PasswordScheme::Argon2).expect("argon2 hashing");
        let b = hash_password("Secur3P@ssw0rd!", PasswordScheme::Argon2).expect("argon2 hashing");
        assert!(a.starts_with(ARGON2_PREFIX));
        assert_ne!(a, b);
        assert!(verify_password("Secur3P@ssw0rd!", &a));
        assert!(!verify_password("wrong-password", &a));
    }

    #[test]
    fn malformed_argon2_string_never_matches() {
        assert!(!verify_password("anything", "$argon2id$garbage"));
    }

    #[test]
    fn scheme_parses_case_insensitively() {
        assert_eq!("SHA256".parse::<PasswordScheme>(), Ok(PasswordScheme::Sha256));
        assert_eq!(" argon2 ".parse::<PasswordScheme>(), Ok(PasswordScheme::Argon2));
        assert!("md5".parse::<PasswordScheme>().is_err());
    }
}
