//! Transport encoding for unkeyed records
//!
//! Not confidentiality: records saved without a cipher key go through here
//! so the on-disk character set is the same whether or not encryption is
//! active.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::Result;

/// Encode text as a standard base64 transport string.
pub fn encode(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

/// Decode a transport string back to text.
pub fn decode(encoded: &str) -> Result<String> {
    let bytes = BASE64.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}
