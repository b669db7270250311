//! Password tags and content encryption for protected snippets.
//!
//! Ciphertext layout before base64 encoding:
//!
//! ```text
//! [salt 16][nonce 12][ciphertext][gcm tag 16]
//! ```
//!
//! The AES-256 key is Argon2id(password, salt) with default parameters.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const GCM_TAG_LEN: usize = 16;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("could not decrypt content")]
pub struct DecryptFailure;

/// Digest binding a password to a code. Same inputs, same tag.
pub fn tag(password: &str, code: &str) -> String {
    let digest = Sha256::new()
        .chain_update(code.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();
    hex::encode(digest)
}

pub fn encrypt(plaintext: &str, password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let cipher = Aes256Gcm::new(&derive_key(&salt, password));
    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .expect("aes-gcm encryption failed");

    let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + sealed.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    STANDARD.encode(out)
}

pub fn decrypt(ciphertext: &str, password: &str) -> Result<String, DecryptFailure> {
    let raw = STANDARD.decode(ciphertext).map_err(|_| DecryptFailure)?;
    if raw.len() < SALT_LEN + NONCE_LEN + GCM_TAG_LEN {
        return Err(DecryptFailure);
    }
    let (salt, rest) = raw.split_at(SALT_LEN);
    let (nonce, sealed) = rest.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(&derive_key(salt, password));
    let plain = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| DecryptFailure)?;
    String::from_utf8(plain).map_err(|_| DecryptFailure)
}

fn derive_key(salt: &[u8], password: &str) -> Key<Aes256Gcm> {
    let mut key = Key::<Aes256Gcm>::default();
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .expect("argon2 rejected a 16 byte salt");
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrypt_reverses_encrypt() {
        for (text, password) in [
            ("secret", "pw1"),
            ("multi\nline\tcontent", "correct horse battery staple"),
            ("ünïcødé ✓", "p"),
        ] {
            let sealed = encrypt(text, password);
            assert_ne!(sealed, text);
            assert_eq!(decrypt(&sealed, password).unwrap(), text);
        }
    }

    #[test]
    fn encryption_is_salted() {
        assert_ne!(encrypt("same", "pw"), encrypt("same", "pw"));
    }

    #[test]
    fn wrong_password_fails() {
        let sealed = encrypt("secret", "pw1");
        assert_eq!(decrypt(&sealed, "pw2"), Err(DecryptFailure));
    }

    #[test]
    fn garbage_fails() {
        assert_eq!(decrypt("not base64!", "pw"), Err(DecryptFailure));
        assert_eq!(decrypt(&STANDARD.encode([0u8; 8]), "pw"), Err(DecryptFailure));
        assert_eq!(decrypt("hello", "pw"), Err(DecryptFailure));
    }

    #[test]
    fn tag_is_deterministic_hex() {
        let a = tag("pw1", "ab12");
        assert_eq!(a, tag("pw1", "ab12"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tag_depends_on_password_and_code() {
        assert_ne!(tag("pw1", "ab12"), tag("pw2", "ab12"));
        assert_ne!(tag("pw1", "ab12"), tag("pw1", "ab13"));
    }

    #[test]
    fn tag_is_sha256_of_code_then_password() {
        let expected = hex::encode(Sha256::digest(b"ab12pw1"));
        assert_eq!(tag("pw1", "ab12"), expected);
    }

    #[test]
    fn key_comes_from_argon2id() {
        let salt = [7u8; SALT_LEN];
        let mut expected = [0u8; 32];
        Argon2::default()
            .hash_password_into(b"pw1", &salt, &mut expected)
            .unwrap();
        assert_eq!(derive_key(&salt, "pw1").as_slice(), &expected);

        let fast_hash = Sha256::new().chain_update(salt).chain_update(b"pw1").finalize();
        assert_ne!(derive_key(&salt, "pw1").as_slice(), fast_hash.as_slice());
    }

    #[test]
    fn ciphertext_always_carries_the_sealed_content() {
        let raw = STANDARD.decode(encrypt("hello", "pw")).unwrap();
        assert_eq!(raw.len(), SALT_LEN + NONCE_LEN + "hello".len() + GCM_TAG_LEN);
    }
}
