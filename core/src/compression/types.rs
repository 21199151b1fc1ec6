//! compression/types.rs
//! Codec identifiers, sizing results and the session traits.
use num_enum::TryFromPrimitive;

use crate::compression::constants::codec_ids;
use crate::device::{DeviceBuffer, PinnedPtr, Stream};
use crate::types::CompressionError;
use crate::utils::enum_name_or_hex;

/// Codec identifiers as stored in the stream header.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum CompressionCodec {
    None = codec_ids::NONE,
    Lz4  = codec_ids::LZ4,
}

impl CompressionCodec {
    pub fn verify(raw: u16) -> Result<CompressionCodec, CompressionError> {
        CompressionCodec::try_from_primitive(raw).map_err(|_| {
            CompressionError::not_supported(format!(
                "unsupported compression codec: {}",
                enum_name_or_hex::<CompressionCodec>(raw)
            ))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionCodec::None => "none",
            CompressionCodec::Lz4 => "lz4",
        }
    }
}

/// Result of `Compressor::configure`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CompressSizes {
    /// Temporary workspace the launch needs.
    pub temp_bytes: usize,
    /// Upper bound on the compressed output.
    pub max_out_bytes: usize,
}

/// Result of `Decompressor::configure`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecompressSizes {
    /// Temporary workspace the launch needs.
    pub temp_bytes: usize,
    /// Exact size of the decompressed output.
    pub out_bytes: usize,
}

/// Where `compress_async` reads the output capacity and writes the
/// compressed size.
pub enum OutputSize<'a> {
    /// Page-locked slot. The stream writes the produced size when the
    /// compression runs; the launch does not block.
    Pinned(&'a PinnedPtr<usize>),
    /// Ordinary host memory the stream cannot reach. The launch blocks until
    /// compression has finished and the produced size is written back.
    Pageable(&'a mut usize),
}

impl OutputSize<'_> {
    /// Capacity supplied by the caller.
    pub fn capacity(&self) -> usize {
        match self {
            OutputSize::Pinned(slot) => slot.get(),
            OutputSize::Pageable(size) => **size,
        }
    }

    /// True when the launch will wait for completion.
    pub fn blocks(&self) -> bool {
        matches!(self, OutputSize::Pageable(_))
    }
}

/// One compression session.
///
/// Buffers stay owned by the caller and must not be touched by anyone else
/// until the stream has run the queued work. Work on two streams must not
/// share a buffer that either one writes: kernels lock input, workspace and
/// output in that order, and buffers swapped between roles deadlock.
pub trait Compressor: Send {
    /// Sizes for compressing `in_bytes` bytes. Performs no data movement and
    /// returns the same answer for the same input size. `temp_bytes` covers
    /// all scratch memory the launch uses.
    fn configure(&self, in_bytes: usize) -> Result<CompressSizes, CompressionError>;

    /// Queue compression of `input[..in_bytes]` into `output` on `stream`.
    ///
    /// `out_bytes` carries the output capacity in and the compressed size
    /// out. With `OutputSize::Pageable` this call blocks until the stream
    /// has finished the compression; otherwise it returns once queued.
    ///
    /// # Errors
    /// Returned synchronously when the launch cannot be queued: buffers
    /// smaller than the sizes given, workspace or capacity below
    /// `configure`'s results, aliased buffers, or a dead stream.
    #[allow(clippy::too_many_arguments)]
    fn compress_async(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        temp: &DeviceBuffer,
        temp_bytes: usize,
        output: &DeviceBuffer,
        out_bytes: OutputSize<'_>,
        stream: &Stream,
    ) -> Result<(), CompressionError>;
}

/// One decompression session. The codec is read from the stream header.
///
/// Same buffer rules as `Compressor`: no buffer written by this session's
/// work may be in use by work on another stream.
pub trait Decompressor: Send {
    /// Read the header at the start of `input` and size the decompression.
    ///
    /// Synchronizes `stream` to fetch the header.
    fn configure(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        stream: &Stream,
    ) -> Result<DecompressSizes, CompressionError>;

    /// Queue decompression into `output[..out_bytes]` on `stream`.
    ///
    /// `out_bytes` must be at least the size `configure` reported.
    #[allow(clippy::too_many_arguments)]
    fn decompress_async(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        temp: &DeviceBuffer,
        temp_bytes: usize,
        output: &DeviceBuffer,
        out_bytes: usize,
        stream: &Stream,
    ) -> Result<(), CompressionError>;
}

/// Reject launches where two roles share one allocation.
pub(crate) fn check_distinct(buffers: &[(&DeviceBuffer, &str)]) -> Result<(), CompressionError> {
    for (i, (a, a_name)) in buffers.iter().enumerate() {
        for (b, b_name) in &buffers[i + 1..] {
            if a.same_allocation(b) {
                return Err(CompressionError::invalid_value(format!(
                    "{} and {} buffers must not alias",
                    a_name, b_name
                )));
            }
        }
    }
    Ok(())
}
