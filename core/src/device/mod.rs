//! device/mod.rs
//! Emulated device: caller-owned buffers, ordered execution queues and
//! pinned host slots.
//!
//! Notes:
//! - Queued work runs on a per-stream worker thread, in submission order.
//! - Launch-time failures are returned by the launching call; execution
//!   failures surface from `Stream::synchronize`.

pub mod buffer;
pub mod pinned;
pub mod stream;

pub use buffer::DeviceBuffer;
pub use pinned::{PinnedPtr, PinnedPtrPool};
pub use stream::{Event, Stream};
