/// Stable codec IDs (u16) for the stream header.
pub mod codec_ids {
    pub const NONE: u16 = 0x0000;
    pub const LZ4: u16  = 0x0001;
}

/// Kernel names reported by stream traces.
pub mod kernel_names {
    pub const FETCH_HEADER: &str    = "fetch_header";
    pub const NONE_COMPRESS: &str   = "none_compress";
    pub const NONE_DECOMPRESS: &str = "none_decompress";
    pub const LZ4_COMPRESS: &str    = "lz4_compress";
    pub const LZ4_DECOMPRESS: &str  = "lz4_decompress";
}
