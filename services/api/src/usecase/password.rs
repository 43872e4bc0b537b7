//! Password hashing.
//!
//! Stored form: `{salt_hex}${sha256_hex}` where the digest covers
//! `salt || password`.

use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash(password: &str) -> String {
    let mut salt = [0u8; SALT_BYTES];
    rand::rng().fill(&mut salt);
    format!("{}${}", hex::encode(salt), digest(&salt, password))
}

/// Check a password against a stored hash.
pub fn verify(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    digest(&salt, password) == expected
}

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}
