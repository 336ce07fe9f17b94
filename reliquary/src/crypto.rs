//! Cipher codec for keyed records
//!
//! Key material is derived from the user secret alone: SHA-256 for the
//! 256-bit key, MD5 for the 128-bit IV. The same secret always produces the
//! same key and IV, so encrypting a given plaintext twice yields identical
//! ciphertext. Re-saves are byte-stable, but repeated plaintexts are
//! visible across files sharing a secret; callers must not assume IND-CPA
//! security across records.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use md5::Md5;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::error::{Result, StoreError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// 256-bit cipher key from the secret's UTF-8 bytes.
fn derive_key(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}

/// 128-bit IV from the same bytes.
fn derive_iv(secret: &str) -> [u8; 16] {
    Md5::digest(secret.as_bytes()).into()
}

/// Encrypt `plaintext` under `secret` into a base64 transport string.
pub fn encrypt(plaintext: &str, secret: &str) -> String {
    let mut key = derive_key(secret);
    let mut iv = derive_iv(secret);

    let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    key.zeroize();
    iv.zeroize();

    BASE64.encode(ciphertext)
}

/// Decrypt a transport string produced by [`encrypt`] with the same secret.
///
/// All-or-nothing: malformed base64, a padding failure under the wrong key,
/// or garbage bytes that fail UTF-8 decoding each surface as a typed error.
pub fn decrypt(encoded: &str, secret: &str) -> Result<String> {
    let ciphertext = BASE64.decode(encoded)?;

    let mut key = derive_key(secret);
    let mut iv = derive_iv(secret);

    let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| StoreError::Cipher);

    key.zeroize();
    iv.zeroize();

    Ok(String::from_utf8(plaintext?)?)
}
