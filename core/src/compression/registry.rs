//! compression/registry.rs
//! Codec registry and session factories.

use crate::compression::compressor::{Lz4Compressor, RawCompressor};
use crate::compression::decompressor::FrameDecompressor;
use crate::compression::options::CodecOptions;
use crate::compression::types::{CompressionCodec, Compressor, Decompressor};
use crate::types::CompressionError;

#[derive(Debug, Clone, Copy)]
pub struct CodecInfo {
    pub codec: CompressionCodec,
    pub name: &'static str,
    /// Whether the codec can shrink its input.
    pub reduces_size: bool,
}

pub fn resolve(codec_id: u16) -> Result<CodecInfo, CompressionError> {
    let codec = CompressionCodec::verify(codec_id)?;
    Ok(match codec {
        CompressionCodec::None => CodecInfo { codec, name: codec.name(), reduces_size: false },
        CompressionCodec::Lz4 => CodecInfo { codec, name: codec.name(), reduces_size: true },
    })
}

/// Compression session for `codec_id`, with default options when `None`.
pub fn create_compressor(codec_id: u16, options: Option<CodecOptions>)
    -> Result<Box<dyn Compressor + Send>, CompressionError>
{
    let options = options.unwrap_or_default();
    match CompressionCodec::verify(codec_id)? {
        CompressionCodec::None => Ok(Box::new(RawCompressor::new(options)?)),
        CompressionCodec::Lz4 => Ok(Box::new(Lz4Compressor::new(options)?)),
    }
}

/// Decompression session; the codec comes from the stream header.
pub fn create_decompressor() -> Box<dyn Decompressor + Send> {
    Box::new(FrameDecompressor::new())
}
