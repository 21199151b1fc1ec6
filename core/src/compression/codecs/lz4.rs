//! codecs/lz4.rs
//! LZ4 block codec, one independent block per chunk.
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size};

use crate::compression::constants::kernel_names;
use crate::compression::CompressionCodec;
use crate::compression::codecs::ChunkCodec;
use crate::types::CompressionError;

pub struct Lz4Codec;

impl ChunkCodec for Lz4Codec {
    const CODEC: CompressionCodec = CompressionCodec::Lz4;
    const COMPRESS_KERNEL: &'static str = kernel_names::LZ4_COMPRESS;
    const DECOMPRESS_KERNEL: &'static str = kernel_names::LZ4_DECOMPRESS;

    fn max_compressed_len(chunk_len: usize) -> usize {
        get_maximum_output_size(chunk_len)
    }

    fn compress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError> {
        compress_into(input, out)
            .map_err(|e| CompressionError::invalid_value(format!("lz4 chunk encode failed: {e}")))
    }

    fn decompress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError> {
        decompress_into(input, out)
            .map_err(|e| CompressionError::cannot_decompress(format!("lz4 chunk decode failed: {e}")))
    }
}
