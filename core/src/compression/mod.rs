//! compression/mod.rs
//! Compression and decompression sessions.
//!
//! Notes:
//! - Sessions size their work in `configure`, then queue kernels on a
//!   `Stream` with `*_async`.
//! - Input is split into fixed-size chunks compressed independently, so
//!   kernels can spread chunks over the grid.
//! - Streams are self-describing; decompression needs no codec choice.

pub mod constants;
pub mod types;
pub mod options;
pub mod codecs;
pub mod kernels;
pub mod compressor;
pub mod decompressor;
pub mod registry;

pub use constants::*;
pub use types::*;
pub use options::*;
pub use compressor::*;
pub use decompressor::*;
pub use registry::*;
