//! headers/decode.rs
//! Header and chunk table decoding.
use byteorder::{ByteOrder, LittleEndian};

use crate::constants::MAGIC_GCZ1;
use crate::headers::types::{
    ChunkEntry, HeaderError, StreamHeader, CHUNK_ENTRY_LEN, HEADER_CRC_SPAN, HEADER_LEN,
};
use crate::utils::compute_checksum;

/// Parse and validate the header at the start of `buf`.
pub fn decode_header_le(buf: &[u8]) -> Result<StreamHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HEADER_LEN });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&buf[0..4]);

    let h = StreamHeader {
        magic,
        version:            LittleEndian::read_u16(&buf[4..6]),
        codec:              LittleEndian::read_u16(&buf[6..8]),
        data_type:          LittleEndian::read_u16(&buf[8..10]),
        flags:              LittleEndian::read_u16(&buf[10..12]),
        chunk_size:         LittleEndian::read_u32(&buf[12..16]),
        uncompressed_bytes: LittleEndian::read_u64(&buf[16..24]),
        compressed_bytes:   LittleEndian::read_u64(&buf[24..32]),
        num_chunks:         LittleEndian::read_u32(&buf[32..36]),
        crc32:              LittleEndian::read_u32(&buf[36..40]),
    };

    // Magic first so foreign data reports as such rather than as a CRC error.
    if h.magic != MAGIC_GCZ1 {
        return Err(HeaderError::BadMagic { have: h.magic });
    }

    let computed = compute_checksum(&buf[..HEADER_CRC_SPAN]);
    if h.crc32 != computed {
        return Err(HeaderError::InvalidCrc32 { have: h.crc32, need: computed });
    }

    h.validate()?;
    Ok(h)
}

/// Read `num_chunks` chunk table entries from the front of `buf`.
pub fn decode_chunk_table(buf: &[u8], num_chunks: usize) -> Result<Vec<ChunkEntry>, HeaderError> {
    let need = num_chunks * CHUNK_ENTRY_LEN;
    if buf.len() < need {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need });
    }
    Ok(buf[..need]
        .chunks_exact(CHUNK_ENTRY_LEN)
        .map(|e| ChunkEntry {
            compressed_len: LittleEndian::read_u32(&e[0..4]),
            crc32: LittleEndian::read_u32(&e[4..8]),
        })
        .collect())
}
