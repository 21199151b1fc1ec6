//! headers/encode.rs
//! Header and chunk table encoding.
use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{ChunkEntry, StreamHeader, CHUNK_ENTRY_LEN, HEADER_CRC_SPAN, HEADER_LEN};
use crate::utils::compute_checksum;

/// Serialize `h` into its 40-byte little-endian form.
///
/// The stored CRC is recomputed over bytes 0..36; `h.crc32` is ignored.
pub fn encode_header_le(h: &StreamHeader) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];

    out[0..4].copy_from_slice(&h.magic);                          // 0..4   magic
    LittleEndian::write_u16(&mut out[4..6], h.version);           // 4..6   version
    LittleEndian::write_u16(&mut out[6..8], h.codec);             // 6..8   codec id
    LittleEndian::write_u16(&mut out[8..10], h.data_type);        // 8..10  element type
    LittleEndian::write_u16(&mut out[10..12], h.flags);           // 10..12 flags
    LittleEndian::write_u32(&mut out[12..16], h.chunk_size);      // 12..16 chunk size
    LittleEndian::write_u64(&mut out[16..24], h.uncompressed_bytes); // 16..24
    LittleEndian::write_u64(&mut out[24..32], h.compressed_bytes);   // 24..32
    LittleEndian::write_u32(&mut out[32..36], h.num_chunks);      // 32..36 chunk count

    let crc = compute_checksum(&out[..HEADER_CRC_SPAN]);
    LittleEndian::write_u32(&mut out[36..40], crc);               // 36..40 header crc

    out
}

/// Write `entries` as a chunk table into the front of `out`.
///
/// `out` must hold at least `entries.len() * CHUNK_ENTRY_LEN` bytes.
pub fn encode_chunk_table(entries: &[ChunkEntry], out: &mut [u8]) {
    for (entry, dst) in entries.iter().zip(out.chunks_exact_mut(CHUNK_ENTRY_LEN)) {
        LittleEndian::write_u32(&mut dst[0..4], entry.compressed_len);
        LittleEndian::write_u32(&mut dst[4..8], entry.crc32);
    }
}
