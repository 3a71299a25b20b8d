//! Cryptographic primitives used by the signing strategies and the
//! encryption gate.
//!
//! All string inputs are taken as UTF-8 bytes. Base64 output is standard
//! alphabet with padding and no line wraps; hex output is lowercase.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use ecb::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, block_padding::Pkcs7};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::Sha256;

use crate::errors::{SignError, SignResult};

type HmacSha256 = Hmac<Sha256>;
type HmacSha1 = Hmac<Sha1>;
type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;
type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;

/// Required AES key length in bytes.
pub const AES_KEY_LEN: usize = 16;

/// HMAC-SHA256 of `message` keyed by `secret`, base64 encoded.
pub fn hmac_sha256_base64(message: &str, secret: &str) -> SignResult<String> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .map_err(|e| SignError::CryptoFailure(format!("HMAC-SHA256 initialization failed: {e}")))?;
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// HMAC-SHA1 of `message` keyed by `secret`, base64 encoded.
pub fn hmac_sha1_base64(message: &str, secret: &str) -> SignResult<String> {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(secret.as_bytes())
        .map_err(|e| SignError::CryptoFailure(format!("HMAC-SHA1 initialization failed: {e}")))?;
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// MD5 digest of `message` as 32 lowercase hex characters.
pub fn md5_hex(message: &str) -> String {
    hex::encode(Md5::digest(message.as_bytes()))
}

/// AES-128-ECB with PKCS#7 padding, lowercase hex output.
///
/// `key16` must be exactly 16 bytes. ECB carries no IV; it is only used
/// behind the encryption gate toggle.
pub fn aes_ecb_encrypt_hex(plaintext: &str, key16: &str) -> SignResult<String> {
    check_key_len(key16)?;
    let cipher = <Aes128EcbEnc as KeyInit>::new_from_slice(key16.as_bytes())
        .map_err(|e| SignError::CryptoFailure(format!("AES key rejected: {e}")))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
    Ok(hex::encode(ciphertext))
}

/// Reverse of [`aes_ecb_encrypt_hex`].
pub fn aes_ecb_decrypt_hex(ciphertext_hex: &str, key16: &str) -> SignResult<String> {
    check_key_len(key16)?;
    let ciphertext = hex::decode(ciphertext_hex)
        .map_err(|e| SignError::CryptoFailure(format!("Ciphertext is not valid hex: {e}")))?;
    let cipher = <Aes128EcbDec as KeyInit>::new_from_slice(key16.as_bytes())
        .map_err(|e| SignError::CryptoFailure(format!("AES key rejected: {e}")))?;
    let plaintext = cipher
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|e| SignError::CryptoFailure(format!("AES decryption failed: {e}")))?;
    String::from_utf8(plaintext)
        .map_err(|e| SignError::CryptoFailure(format!("Decrypted data is not UTF-8: {e}")))
}

fn check_key_len(key16: &str) -> SignResult<()> {
    if key16.len() != AES_KEY_LEN {
        return Err(SignError::CryptoFailure(format!(
            "AES key must be {AES_KEY_LEN} bytes, got {}",
            key16.len()
        )));
    }
    Ok(())
}
