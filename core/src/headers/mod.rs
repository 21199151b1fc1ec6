//! headers/mod.rs
//! Self-describing header at the start of every compressed stream.
//!
//! Notes:
//! - Fixed-size header (40 bytes) so a decompressor can size its work from
//!   the leading bytes alone.
//! - Followed by a chunk table and the chunk payloads (see `types.rs`).
//! - Header CRC covers bytes 0..36; a mismatch means the input is not a
//!   stream this crate produced.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
