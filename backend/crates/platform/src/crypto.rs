//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use sha1::{Digest, Sha1};

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Build a `data:` URI (`data:<content_type>;base64,<payload>`)
pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, to_base64(bytes))
}

/// Compute SHA-1 and render it as lowercase hex
///
/// Only for request signing schemes that mandate SHA-1; never for passwords.
pub fn sha1_hex(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_values() {
        // SHA-1 of empty string
        assert_eq!(sha1_hex(b""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");

        // SHA-1 of "abc"
        assert_eq!(sha1_hex(b"abc"), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        let encoded = to_base64(data);
        assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
        assert_eq!(general_purpose::STANDARD.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_data_uri() {
        let uri = data_uri("image/png", &[0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }
}
