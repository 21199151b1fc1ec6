//! headers/types.rs
//! Stream header struct, flags and chunk table entries.
//!
//! Stream layout (little-endian):
//! - 40-byte `StreamHeader`
//! - `num_chunks` × 8-byte `ChunkEntry` (compressed length, CRC32 of the
//!   uncompressed chunk)
//! - chunk payloads, back to back, in chunk order
use bitflags::bitflags;
use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::compression::CompressionCodec;
use crate::constants::{FORMAT_V1, MAGIC_GCZ1, MAX_CHUNK_SIZE};
use crate::datatype::TypeTag;
use crate::types::CompressionError;
use crate::utils::chunk_count;

/// Fixed header size in bytes.
pub const HEADER_LEN: usize = 40;
/// Bytes covered by the header CRC.
pub const HEADER_CRC_SPAN: usize = 36;
/// Size of one chunk table entry in bytes.
pub const CHUNK_ENTRY_LEN: usize = 8;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct HeaderFlags: u16 {
        /// Chunk table CRCs are meaningful and must be verified.
        const CHUNK_CRC32 = 0x0001;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub codec: u16,
    pub data_type: u16,
    pub flags: u16,
    pub chunk_size: u32,
    pub uncompressed_bytes: u64,
    /// Whole stream: header + chunk table + payloads.
    pub compressed_bytes: u64,
    pub num_chunks: u32,
    pub crc32: u32,
}

impl StreamHeader {
    pub const LEN: usize = HEADER_LEN;

    /// Header for a stream before its payload sizes are known.
    pub fn new(codec: CompressionCodec, data_type: TypeTag, chunk_size: usize, uncompressed_bytes: usize) -> Self {
        Self {
            magic: MAGIC_GCZ1,
            version: FORMAT_V1,
            codec: codec as u16,
            data_type: data_type as u16,
            flags: HeaderFlags::CHUNK_CRC32.bits(),
            chunk_size: chunk_size as u32,
            uncompressed_bytes: uncompressed_bytes as u64,
            compressed_bytes: 0,
            num_chunks: chunk_count(uncompressed_bytes, chunk_size) as u32,
            crc32: 0,
        }
    }

    pub fn flags(&self) -> HeaderFlags {
        HeaderFlags::from_bits_truncate(self.flags)
    }

    /// Length of the chunk table that follows the header.
    pub fn table_len(&self) -> usize {
        self.num_chunks as usize * CHUNK_ENTRY_LEN
    }

    /// Offset of the first chunk payload.
    pub fn payload_offset(&self) -> usize {
        HEADER_LEN + self.table_len()
    }

    pub fn codec(&self) -> Result<CompressionCodec, HeaderError> {
        CompressionCodec::try_from_primitive(self.codec).map_err(|_| HeaderError::UnknownCodec { raw: self.codec })
    }

    pub fn data_type(&self) -> Result<TypeTag, HeaderError> {
        TypeTag::try_from_primitive(self.data_type).map_err(|_| HeaderError::UnknownDataType { raw: self.data_type })
    }

    /// Structural checks. The CRC is checked by `decode_header_le`.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != MAGIC_GCZ1 {
            return Err(HeaderError::BadMagic { have: self.magic });
        }
        if self.version != FORMAT_V1 {
            return Err(HeaderError::UnsupportedVersion { have: self.version });
        }
        self.codec()?;
        let data_type = self.data_type()?;
        let chunk_size = self.chunk_size as usize;
        if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE || chunk_size % data_type.size_of() != 0 {
            return Err(HeaderError::InvalidChunkSize { have: self.chunk_size });
        }
        let need = chunk_count(self.uncompressed_bytes as usize, chunk_size);
        if self.num_chunks as usize != need {
            return Err(HeaderError::ChunkCountMismatch { have: self.num_chunks as usize, need });
        }
        if self.compressed_bytes < self.payload_offset() as u64 {
            return Err(HeaderError::TruncatedStream {
                have: self.compressed_bytes as usize,
                need: self.payload_offset(),
            });
        }
        Ok(())
    }
}

/// One chunk table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkEntry {
    pub compressed_len: u32,
    pub crc32: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header buffer too short: {have} < {need}")]
    BufferTooShort { have: usize, need: usize },

    #[error("bad magic: {have:?}")]
    BadMagic { have: [u8; 4] },

    #[error("unsupported format version: {have}")]
    UnsupportedVersion { have: u16 },

    #[error("unknown codec id: 0x{raw:04x}")]
    UnknownCodec { raw: u16 },

    #[error("unknown element type: 0x{raw:04x}")]
    UnknownDataType { raw: u16 },

    #[error("invalid chunk size: {have}")]
    InvalidChunkSize { have: u32 },

    #[error("chunk count mismatch: header says {have}, sizes imply {need}")]
    ChunkCountMismatch { have: usize, need: usize },

    #[error("stream truncated: {have} < {need}")]
    TruncatedStream { have: usize, need: usize },

    #[error("header crc mismatch: stored {have:#010x}, computed {need:#010x}")]
    InvalidCrc32 { have: u32, need: u32 },
}

impl From<HeaderError> for CompressionError {
    fn from(e: HeaderError) -> Self {
        CompressionError::cannot_decompress(format!("invalid stream header: {e}"))
    }
}
