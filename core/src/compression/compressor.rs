//! compression/compressor.rs
//! Chunked compression sessions.
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use crate::compression::codecs::{ChunkCodec, Lz4Codec, RawCodec};
use crate::compression::kernels;
use crate::compression::options::CodecOptions;
use crate::compression::types::{check_distinct, CompressSizes, Compressor, OutputSize};
use crate::datatype::Element;
use crate::device::{DeviceBuffer, PinnedPtr, Stream};
use crate::headers::StreamHeader;
use crate::types::CompressionError;
use crate::utils::chunk_count;

/// Compression session splitting input into independent chunks of
/// `options.chunk_size` bytes, each encoded by codec `C`.
pub struct ChunkedCompressor<C: ChunkCodec> {
    options: CodecOptions,
    _codec: PhantomData<C>,
}

pub type Lz4Compressor = ChunkedCompressor<Lz4Codec>;
pub type RawCompressor = ChunkedCompressor<RawCodec>;

impl<C: ChunkCodec> ChunkedCompressor<C> {
    pub fn new(options: CodecOptions) -> Result<Self, CompressionError> {
        options.validate()?;
        Ok(Self { options, _codec: PhantomData })
    }

    /// Session for elements of type `T` with the given chunk size.
    pub fn for_type<T: Element>(chunk_size: usize) -> Result<Self, CompressionError> {
        Self::new(CodecOptions::new(chunk_size, T::TYPE)?)
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl<C: ChunkCodec> Compressor for ChunkedCompressor<C> {
    fn configure(&self, in_bytes: usize) -> Result<CompressSizes, CompressionError> {
        let width = self.options.data_type.size_of();
        if in_bytes % width != 0 {
            return Err(CompressionError::invalid_value(format!(
                "input of {} bytes is not a whole number of {:?} elements",
                in_bytes, self.options.data_type
            )));
        }
        if chunk_count(in_bytes, self.options.chunk_size) > u32::MAX as usize {
            return Err(CompressionError::invalid_value(format!(
                "input of {} bytes needs more chunks than a stream can index",
                in_bytes
            )));
        }

        let sizes = CompressSizes {
            temp_bytes: kernels::compress_temp_bytes::<C>(in_bytes, self.options.chunk_size),
            max_out_bytes: kernels::max_stream_len::<C>(in_bytes, self.options.chunk_size),
        };
        log::debug!(
            "{} compressor configured: in={} temp={} max_out={}",
            C::CODEC.name(),
            in_bytes,
            sizes.temp_bytes,
            sizes.max_out_bytes
        );
        Ok(sizes)
    }

    fn compress_async(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        temp: &DeviceBuffer,
        temp_bytes: usize,
        output: &DeviceBuffer,
        out_bytes: OutputSize<'_>,
        stream: &Stream,
    ) -> Result<(), CompressionError> {
        let sizes = self.configure(in_bytes)?;

        input.check_len(in_bytes, "input")?;
        temp.check_len(temp_bytes, "temporary workspace")?;
        if temp_bytes < sizes.temp_bytes {
            return Err(CompressionError::invalid_value(format!(
                "temporary workspace of {} bytes is smaller than the required {}",
                temp_bytes, sizes.temp_bytes
            )));
        }

        let capacity = out_bytes.capacity();
        output.check_len(capacity, "output capacity")?;
        if capacity < sizes.max_out_bytes {
            return Err(CompressionError::invalid_value(format!(
                "output capacity of {} bytes is below the configured bound of {}",
                capacity, sizes.max_out_bytes
            )));
        }
        check_distinct(&[(input, "input"), (temp, "temporary"), (output, "output")])?;

        let header = StreamHeader::new(C::CODEC, self.options.data_type, self.options.chunk_size, in_bytes);
        let host_size: Arc<Mutex<usize>> = Arc::default();
        let report = match &out_bytes {
            OutputSize::Pinned(slot) => SizeReport::Pinned(slot.share()),
            OutputSize::Pageable(_) => SizeReport::Host(Arc::clone(&host_size)),
        };

        let (src_buf, tmp_buf, dst_buf) = (input.clone(), temp.clone(), output.clone());
        stream.enqueue(C::COMPRESS_KERNEL, move || {
            let src = src_buf.read();
            let mut tmp = tmp_buf.write();
            let mut dst = dst_buf.write();
            let n = kernels::compress::<C>(&src[..in_bytes], header, &mut tmp[..temp_bytes], &mut dst[..capacity])?;
            report.write(n);
            Ok(())
        })?;

        if let OutputSize::Pageable(size) = out_bytes {
            // The stream cannot write pageable memory: wait for the kernel.
            stream.synchronize()?;
            *size = *host_size.lock().unwrap_or_else(PoisonError::into_inner);
        }
        Ok(())
    }
}

/// Where the compress kernel leaves the produced size.
enum SizeReport {
    Pinned(PinnedPtr<usize>),
    Host(Arc<Mutex<usize>>),
}

impl SizeReport {
    fn write(&self, n: usize) {
        match self {
            SizeReport::Pinned(slot) => slot.set(n),
            SizeReport::Host(size) => *size.lock().unwrap_or_else(PoisonError::into_inner) = n,
        }
    }
}
