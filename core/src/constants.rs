/// Magic number for the compressed stream format.
/// "GCZ1" = GpuComp chunked stream, layout v1
pub const MAGIC_GCZ1: [u8; 4] = *b"GCZ1";
pub const FORMAT_V1: u16 = 1;

/// Defaults when an option is not provided.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024; // 64 KiB
/// Max chunk size sanity bound (16 MiB). Chunk lengths are stored as u32.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Pinned host memory preallocated by a fresh pool, in bytes.
pub const PINNED_POOL_PREALLOC_SIZE_BYTES: usize = 1024;
/// Pinned host memory added whenever an empty pool is asked for a slot.
pub const PINNED_POOL_REALLOC_SIZE_BYTES: usize = 256;

/// Native status codes (mirrored in `CompressionError::code`).
pub mod status_codes {
    pub const SUCCESS: i32            = 0;
    pub const INVALID_VALUE: i32      = 10;
    pub const NOT_SUPPORTED: i32      = 11;
    pub const CANNOT_DECOMPRESS: i32  = 12;
    pub const DEVICE_ERROR: i32       = 1000;
    pub const INTERNAL: i32           = 10000;
}
