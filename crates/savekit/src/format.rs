//! Stored text pipeline: value serializer followed by optional obfuscation.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::obfuscation::Obfuscator;
use crate::serializer::{SerializerOptions, ValueSerializer};
use crate::settings::SerializerSettings;

/// Produces and reads the exact text handed to a storage backend.
///
/// Whether text is obfuscated is known only from configuration; nothing in
/// the stored payload marks it.
#[derive(Debug, Clone)]
pub struct TextFormat {
    serializer: ValueSerializer,
    obfuscator: Option<Obfuscator>,
}

impl TextFormat {
    pub fn new(serializer: ValueSerializer, obfuscator: Option<Obfuscator>) -> Self {
        Self {
            serializer,
            obfuscator,
        }
    }

    /// Plain JSON, no obfuscation.
    pub fn plain(pretty_print: bool) -> Self {
        Self::new(ValueSerializer::new(SerializerOptions { pretty_print }), None)
    }

    /// Build from settings, validating the obfuscation key.
    pub fn from_settings(settings: &SerializerSettings) -> Result<Self> {
        settings.validate()?;
        let obfuscator = if settings.use_encryption {
            Some(Obfuscator::new(&settings.encryption_key)?)
        } else {
            None
        };
        let serializer = ValueSerializer::new(SerializerOptions {
            pretty_print: settings.pretty_print,
        });
        Ok(Self::new(serializer, obfuscator))
    }

    pub fn is_obfuscated(&self) -> bool {
        self.obfuscator.is_some()
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let text = self.serializer.serialize(value)?;
        Ok(match &self.obfuscator {
            Some(obfuscator) => obfuscator.obfuscate(&text),
            None => text,
        })
    }

    pub fn decode<T: DeserializeOwned>(&self, stored: &str) -> Result<T> {
        match &self.obfuscator {
            Some(obfuscator) => {
                let text = obfuscator.deobfuscate(stored)?;
                self.serializer.deserialize(&text)
            }
            None => self.serializer.deserialize(stored),
        }
    }
}
