//! codecs/raw.rs
//! Pass-through codec: chunks are stored verbatim.

use crate::compression::constants::kernel_names;
use crate::compression::CompressionCodec;
use crate::compression::codecs::ChunkCodec;
use crate::types::CompressionError;

pub struct RawCodec;

impl ChunkCodec for RawCodec {
    const CODEC: CompressionCodec = CompressionCodec::None;
    const COMPRESS_KERNEL: &'static str = kernel_names::NONE_COMPRESS;
    const DECOMPRESS_KERNEL: &'static str = kernel_names::NONE_DECOMPRESS;

    fn max_compressed_len(chunk_len: usize) -> usize {
        chunk_len
    }

    fn compress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError> {
        if out.len() < input.len() {
            return Err(CompressionError::invalid_value(format!(
                "raw chunk of {} bytes does not fit {} bytes",
                input.len(),
                out.len()
            )));
        }
        out[..input.len()].copy_from_slice(input);
        Ok(input.len())
    }

    fn decompress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError> {
        if input.len() != out.len() {
            return Err(CompressionError::cannot_decompress(format!(
                "raw chunk holds {} bytes, expected {}",
                input.len(),
                out.len()
            )));
        }
        out.copy_from_slice(input);
        Ok(input.len())
    }
}
