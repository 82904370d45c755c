//! Salted SHA-256 implementation of the `PasswordHasher` port.
//!
//! Stored hashes use the `sha256$<salt>$<digest>` format, mirroring the
//! `algorithm$salt$digest` credential layout of the system this replaces.
//! The format is opaque to the domain; swapping in a slower KDF only
//! touches this adapter.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::PasswordHasher;

const ALGORITHM: &str = "sha256";
const SALT_BYTES: usize = 12;

/// Salted-digest password hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    /// Create a new hasher.
    pub fn new() -> Self {
        Self
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> String {
        let mut salt_bytes = [0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = hex::encode(salt_bytes);
        let digest = digest(&salt, password);
        format!("{ALGORITHM}${salt}${digest}")
    }

    fn verify(&self, password: &str, stored: &str) -> bool {
        let mut parts = stored.splitn(3, '$');
        let (Some(algorithm), Some(salt), Some(expected)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if algorithm != ALGORITHM {
            return false;
        }
        digest(salt, password) == expected
    }
}
