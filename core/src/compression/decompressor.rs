//! compression/decompressor.rs
//! Header-driven decompression session.
use std::sync::{Arc, Mutex, PoisonError};

use crate::compression::codecs::{ChunkCodec, Lz4Codec, RawCodec};
use crate::compression::constants::kernel_names;
use crate::compression::kernels;
use crate::compression::types::{check_distinct, CompressionCodec, DecompressSizes, Decompressor};
use crate::device::{DeviceBuffer, Stream};
use crate::headers::{decode_header_le, StreamHeader, HEADER_LEN};
use crate::types::CompressionError;

/// Decompresses any stream this crate produces, picking the codec from the
/// stream header read by `configure`.
#[derive(Debug, Default)]
pub struct FrameDecompressor {
    header: Option<StreamHeader>,
}

impl FrameDecompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header read by the last successful `configure`.
    pub fn header(&self) -> Option<&StreamHeader> {
        self.header.as_ref()
    }
}

impl Decompressor for FrameDecompressor {
    fn configure(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        stream: &Stream,
    ) -> Result<DecompressSizes, CompressionError> {
        input.check_len(in_bytes, "input")?;
        if in_bytes < HEADER_LEN {
            return Err(CompressionError::cannot_decompress(format!(
                "input of {} bytes is too short for a stream header",
                in_bytes
            )));
        }

        // Fetch the header through the stream so it is ordered after any
        // pending writes to `input`.
        let staged: Arc<Mutex<Vec<u8>>> = Arc::default();
        let (src_buf, dst) = (input.clone(), Arc::clone(&staged));
        stream.enqueue(kernel_names::FETCH_HEADER, move || {
            let src = src_buf.read();
            *dst.lock().unwrap_or_else(PoisonError::into_inner) = src[..HEADER_LEN].to_vec();
            Ok(())
        })?;
        stream.synchronize()?;

        let bytes = staged.lock().unwrap_or_else(PoisonError::into_inner).clone();
        let header = decode_header_le(&bytes)?;
        if (in_bytes as u64) < header.compressed_bytes {
            return Err(CompressionError::invalid_value(format!(
                "input of {} bytes is shorter than the {}-byte stream it starts",
                in_bytes, header.compressed_bytes
            )));
        }

        let sizes = DecompressSizes {
            temp_bytes: kernels::temp_bytes_for(header.num_chunks as usize),
            out_bytes: header.uncompressed_bytes as usize,
        };
        log::debug!(
            "decompressor configured: codec={} in={} temp={} out={}",
            CompressionCodec::verify(header.codec)?.name(),
            in_bytes,
            sizes.temp_bytes,
            sizes.out_bytes
        );
        self.header = Some(header);
        Ok(sizes)
    }

    fn decompress_async(
        &mut self,
        input: &DeviceBuffer,
        in_bytes: usize,
        temp: &DeviceBuffer,
        temp_bytes: usize,
        output: &DeviceBuffer,
        out_bytes: usize,
        stream: &Stream,
    ) -> Result<(), CompressionError> {
        let header = self
            .header
            .clone()
            .ok_or_else(|| CompressionError::invalid_value("decompress_async called before configure"))?;

        input.check_len(in_bytes, "input")?;
        temp.check_len(temp_bytes, "temporary workspace")?;
        output.check_len(out_bytes, "output")?;
        if (in_bytes as u64) < header.compressed_bytes {
            return Err(CompressionError::invalid_value(format!(
                "input of {} bytes is shorter than the configured {}-byte stream",
                in_bytes, header.compressed_bytes
            )));
        }
        let need_temp = kernels::temp_bytes_for(header.num_chunks as usize);
        if temp_bytes < need_temp {
            return Err(CompressionError::invalid_value(format!(
                "temporary workspace of {} bytes is smaller than the required {}",
                temp_bytes, need_temp
            )));
        }
        if (out_bytes as u64) < header.uncompressed_bytes {
            return Err(CompressionError::invalid_value(format!(
                "output of {} bytes is smaller than the {} bytes to decompress",
                out_bytes, header.uncompressed_bytes
            )));
        }
        check_distinct(&[(input, "input"), (temp, "temporary"), (output, "output")])?;

        let codec = CompressionCodec::verify(header.codec)?;
        let kernel = match codec {
            CompressionCodec::None => RawCodec::DECOMPRESS_KERNEL,
            CompressionCodec::Lz4 => Lz4Codec::DECOMPRESS_KERNEL,
        };

        let (src_buf, tmp_buf, dst_buf) = (input.clone(), temp.clone(), output.clone());
        stream.enqueue(kernel, move || {
            let src = src_buf.read();
            let mut tmp = tmp_buf.write();
            let mut dst = dst_buf.write();
            let (src, tmp, dst) = (&src[..in_bytes], &mut tmp[..temp_bytes], &mut dst[..out_bytes]);
            match codec {
                CompressionCodec::None => kernels::decompress::<RawCodec>(&header, src, tmp, dst)?,
                CompressionCodec::Lz4 => kernels::decompress::<Lz4Codec>(&header, src, tmp, dst)?,
            };
            Ok(())
        })
    }
}
