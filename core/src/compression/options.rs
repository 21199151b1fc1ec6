//! compression/options.rs
//! Codec options shared by every chunked compressor.
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::datatype::TypeTag;
use crate::types::CompressionError;

/// Options for a compression session.
///
/// Deserializes from JSON with every field optional, e.g.
/// `{"chunk_size": 65536, "data_type": "u_short"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Uncompressed bytes per independently compressed chunk.
    pub chunk_size: usize,
    /// Element type of the input; input sizes must be a whole number of
    /// elements.
    pub data_type: TypeTag,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { chunk_size: DEFAULT_CHUNK_SIZE, data_type: TypeTag::UChar }
    }
}

impl CodecOptions {
    pub fn new(chunk_size: usize, data_type: TypeTag) -> Result<Self, CompressionError> {
        let opts = Self { chunk_size, data_type };
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json(json: &str) -> Result<Self, CompressionError> {
        let opts: CodecOptions = serde_json::from_str(json)
            .map_err(|e| CompressionError::invalid_value(format!("invalid codec options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn to_json(&self) -> Result<String, CompressionError> {
        serde_json::to_string(self)
            .map_err(|e| CompressionError::invalid_value(format!("unserializable codec options: {e}")))
    }

    pub fn validate(&self) -> Result<(), CompressionError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(CompressionError::invalid_value(format!(
                "chunk size {} outside 1..={}",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        let width = self.data_type.size_of();
        if self.chunk_size % width != 0 {
            return Err(CompressionError::invalid_value(format!(
                "chunk size {} is not a multiple of the {:?} element width {}",
                self.chunk_size, self.data_type, width
            )));
        }
        Ok(())
    }
}
