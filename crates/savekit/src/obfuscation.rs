//! Reversible XOR obfuscation with base64 framing.
//!
//! The UTF-8 bytes of the text are XORed against the UTF-8 bytes of the key,
//! the key repeating cyclically, and the result is framed as standard base64.
//! This hides save data from casual inspection only: there is no
//! authentication, no integrity check, and no scheme version in the output.
//! It is not a substitute for encryption.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObfuscationError {
    #[error("obfuscation key must not be empty")]
    EmptyKey,

    #[error("obfuscated text is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("deobfuscated bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Obfuscator bound to a validated, non-empty key.
#[derive(Clone)]
pub struct Obfuscator {
    key: Vec<u8>,
}

impl Obfuscator {
    /// Rejects an empty key up front so cyclic indexing never divides by zero.
    pub fn new(key: &str) -> Result<Self, ObfuscationError> {
        if key.is_empty() {
            return Err(ObfuscationError::EmptyKey);
        }
        Ok(Self {
            key: key.as_bytes().to_vec(),
        })
    }

    pub fn obfuscate(&self, text: &str) -> String {
        STANDARD.encode(self.xor(text.as_bytes()))
    }

    pub fn deobfuscate(&self, text: &str) -> Result<String, ObfuscationError> {
        let bytes = STANDARD.decode(text.trim())?;
        Ok(String::from_utf8(self.xor(&bytes))?)
    }

    fn xor(&self, bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(byte, key)| byte ^ key)
            .collect()
    }
}

impl std::fmt::Debug for Obfuscator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Obfuscator")
            .field("key_len", &self.key.len())
            .finish()
    }
}

/// One-shot form of [`Obfuscator::obfuscate`].
pub fn obfuscate(text: &str, key: &str) -> Result<String, ObfuscationError> {
    Ok(Obfuscator::new(key)?.obfuscate(text))
}

/// One-shot form of [`Obfuscator::deobfuscate`].
pub fn deobfuscate(text: &str, key: &str) -> Result<String, ObfuscationError> {
    Obfuscator::new(key)?.deobfuscate(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_key_is_rejected() {
        assert!(matches!(Obfuscator::new(""), Err(ObfuscationError::EmptyKey)));
    }

    #[test]
    fn test_known_vector() {
        // 'a' ^ 'k' = 0x0a, 'b' ^ 'k' = 0x09
        let obfuscator = Obfuscator::new("k").unwrap();
        assert_eq!(obfuscator.obfuscate("ab"), STANDARD.encode([0x0a, 0x09]));
    }

    #[test]
    fn test_empty_text() {
        let obfuscator = Obfuscator::new("key").unwrap();
        let hidden = obfuscator.obfuscate("");
        assert_eq!(hidden, "");
        assert_eq!(obfuscator.deobfuscate(&hidden).unwrap(), "");
    }

    #[test]
    fn test_output_hides_plain_text() {
        let hidden = obfuscate(r#"{"gold":100}"#, "DefaultEncryptionKey").unwrap();
        assert!(!hidden.contains("gold"));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let obfuscator = Obfuscator::new("key").unwrap();
        assert!(matches!(
            obfuscator.deobfuscate("not base64!"),
            Err(ObfuscationError::Base64(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_deobfuscate_inverts_obfuscate(text in ".*", key in ".+") {
            let hidden = obfuscate(&text, &key).unwrap();
            prop_assert_eq!(deobfuscate(&hidden, &key).unwrap(), text);
        }

        #[test]
        fn prop_non_ascii_roundtrip(text in "[ぁ-んа-я😀-🙏 ]{0,64}", key in "[é中🔑]{1,8}") {
            let hidden = obfuscate(&text, &key).unwrap();
            prop_assert_eq!(deobfuscate(&hidden, &key).unwrap(), text);
        }
    }
}
