//! compression/codecs/mod.rs
//! Per-chunk codecs run by the compression kernels.
//!
//! A codec only sees one chunk at a time: the kernels own chunking, the
//! chunk table and the stream header.

pub mod lz4;
pub mod raw;

pub use lz4::*;
pub use raw::*;

use crate::compression::CompressionCodec;
use crate::types::CompressionError;

pub trait ChunkCodec: Send + Sync + 'static {
    const CODEC: CompressionCodec;
    const COMPRESS_KERNEL: &'static str;
    const DECOMPRESS_KERNEL: &'static str;

    /// Worst-case encoded size of a `chunk_len`-byte chunk.
    fn max_compressed_len(chunk_len: usize) -> usize;

    /// Encode `input` into `out`, returning the bytes written.
    fn compress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError>;

    /// Decode `input` into `out`, returning the bytes written.
    fn decompress_chunk(input: &[u8], out: &mut [u8]) -> Result<usize, CompressionError>;
}
