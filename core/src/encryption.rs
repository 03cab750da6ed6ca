//! Encryption envelope for request and response bodies.
//!
//! # Format
//! ChaCha20-Poly1305 keyed with SHA-256 of the connection password. Every
//! call to [`encrypt`] draws a fresh 96-bit nonce, so two envelopes of the
//! same plaintext differ. The envelope is lowercase hex of
//! `nonce || ciphertext || tag` and travels as a `text/plain` body.

use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use sha2::{Digest, Sha256};

use crate::error::EncryptionError;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

fn cipher(password: &str) -> ChaCha20Poly1305 {
    let digest = Sha256::digest(password.as_bytes());
    ChaCha20Poly1305::new(Key::from_slice(digest.as_slice()))
}

/// Seal `plaintext` under `password`.
pub fn encrypt(plaintext: &str, password: &str) -> Result<String, EncryptionError> {
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    let sealed = cipher(password)
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| EncryptionError::Malformed("plaintext too large to seal".to_string()))?;

    let mut envelope = Vec::with_capacity(NONCE_LEN + sealed.len());
    envelope.extend_from_slice(nonce.as_slice());
    envelope.extend_from_slice(&sealed);
    Ok(hex::encode(envelope))
}

/// Open an envelope produced by [`encrypt`] with the same password.
pub fn decrypt(envelope: &str, password: &str) -> Result<String, EncryptionError> {
    let raw = hex::decode(envelope.trim())
        .map_err(|e| EncryptionError::Malformed(format!("not hex: {e}")))?;
    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(EncryptionError::Malformed(format!(
            "{} bytes is shorter than nonce and tag",
            raw.len()
        )));
    }

    let (nonce, sealed) = raw.split_at(NONCE_LEN);
    let plaintext = cipher(password)
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| EncryptionError::Authentication)?;
    String::from_utf8(plaintext).map_err(|_| EncryptionError::Authentication)
}

/// Password for a direction the policy encrypts, or `MissingPassword`.
pub(crate) fn require_password(password: Option<&str>) -> Result<&str, EncryptionError> {
    password.ok_or(EncryptionError::MissingPassword)
}
