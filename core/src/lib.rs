//! gpucomp-core
//!
//! Stream-ordered compression sessions over an emulated device.
//! Sessions size their buffers with `configure` and queue work with
//! `compress_async` / `decompress_async` on a `Stream`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;
pub mod datatype;

pub mod device;
pub mod headers;
pub mod compression;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{
        create_compressor, create_decompressor, codec_ids, CodecOptions, CompressSizes,
        Compressor, DecompressSizes, Decompressor, FrameDecompressor, Lz4Compressor,
        OutputSize, RawCompressor,
    };
    pub use crate::datatype::{type_tag, Element, TypeTag};
    pub use crate::device::{DeviceBuffer, Event, PinnedPtr, PinnedPtrPool, Stream};
    pub use crate::types::{check_status, CompressionError, Status};
}
