//! Opaque refresh tokens.
//!
//! Tokens carry no structure a client could parse: 32 bytes from the OS RNG,
//! hex encoded. Only their SHA-256 digest is meant to be persisted.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use sha2::Digest;
use sha2::Sha256;

/// Number of random bytes in a refresh token.
pub const TOKEN_BYTES: usize = 32;

/// Generate a new refresh token (64 lowercase hex characters).
pub fn generate() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Digest under which a refresh token is stored.
pub fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
