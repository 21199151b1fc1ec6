#[cfg(test)]
mod tests {
    use gpucomp_core::{
        compression::{
            CodecOptions, Compressor, Decompressor, FrameDecompressor, Lz4Compressor, OutputSize,
            RawCompressor,
        },
        datatype::TypeTag,
        device::{DeviceBuffer, Stream},
        headers::HEADER_LEN,
        types::Status,
    };

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 / 7) as u8).collect()
    }

    fn compress_with(c: &mut dyn Compressor, data: &[u8], stream: &Stream) -> Vec<u8> {
        let sizes = c.configure(data.len()).unwrap();
        let input = DeviceBuffer::from_host(data);
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
        let output = DeviceBuffer::zeroed(sizes.max_out_bytes);
        let mut out_bytes = sizes.max_out_bytes;
        c.compress_async(&input, data.len(), &temp, sizes.temp_bytes, &output, OutputSize::Pageable(&mut out_bytes), stream)
            .unwrap();
        output.to_host(out_bytes).unwrap().to_vec()
    }

    fn lz4_stream(data: &[u8], stream: &Stream) -> Vec<u8> {
        let mut c = Lz4Compressor::new(CodecOptions::new(4096, TypeTag::UChar).unwrap()).unwrap();
        compress_with(&mut c, data, stream)
    }

    #[test]
    fn configure_reports_original_size() {
        let stream = Stream::new().unwrap();
        let data = sample(70_001);
        let compressed = DeviceBuffer::from_host(&lz4_stream(&data, &stream));

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
        assert_eq!(sizes.out_bytes, data.len());
        assert_eq!(sizes.temp_bytes, 18 * 8);

        let header = d.header().unwrap();
        assert_eq!(header.num_chunks, 18);
        assert_eq!(header.compressed_bytes as usize, compressed.len());
    }

    #[test]
    fn larger_buffers_than_needed_are_accepted() {
        let stream = Stream::new().unwrap();
        let data = sample(10_000);
        let mut bytes = lz4_stream(&data, &stream);
        let produced = bytes.len();
        bytes.resize(produced + 100, 0xEE);
        let compressed = DeviceBuffer::from_host(&bytes);

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, bytes.len(), &stream).unwrap();
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes + 16);
        let output = DeviceBuffer::zeroed(sizes.out_bytes + 64);
        d.decompress_async(&compressed, bytes.len(), &temp, temp.len(), &output, output.len(), &stream)
            .unwrap();
        stream.synchronize().unwrap();
        assert_eq!(output.to_host(data.len()).unwrap().as_ref(), &data[..]);
    }

    #[test]
    fn too_small_output_fails_without_touching_it() {
        let stream = Stream::new().unwrap();
        let data = sample(5_000);
        let compressed = DeviceBuffer::from_host(&lz4_stream(&data, &stream));

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
        let sentinel = vec![0xA5u8; sizes.out_bytes - 1];
        let output = DeviceBuffer::from_host(&sentinel);

        let err = d
            .decompress_async(&compressed, compressed.len(), &temp, sizes.temp_bytes, &output, output.len(), &stream)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::InvalidValue));
        stream.synchronize().unwrap();
        assert_eq!(output.to_host(output.len()).unwrap().as_ref(), &sentinel[..]);
    }

    #[test]
    fn undersized_workspace_fails() {
        let stream = Stream::new().unwrap();
        let compressed = DeviceBuffer::from_host(&lz4_stream(&sample(20_000), &stream));

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
        let output = DeviceBuffer::zeroed(sizes.out_bytes);
        let err = d
            .decompress_async(&compressed, compressed.len(), &temp, sizes.temp_bytes - 1, &output, sizes.out_bytes, &stream)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::InvalidValue));
    }

    #[test]
    fn decompress_before_configure_fails() {
        let stream = Stream::new().unwrap();
        let compressed = DeviceBuffer::from_host(&lz4_stream(&sample(100), &stream));
        let temp = DeviceBuffer::zeroed(64);
        let output = DeviceBuffer::zeroed(100);

        let mut d = FrameDecompressor::new();
        let err = d
            .decompress_async(&compressed, compressed.len(), &temp, 64, &output, 100, &stream)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::InvalidValue));
    }

    #[test]
    fn foreign_bytes_cannot_decompress() {
        let stream = Stream::new().unwrap();
        let junk = DeviceBuffer::from_host(&[0x42u8; 256]);
        let mut d = FrameDecompressor::new();
        let err = d.configure(&junk, junk.len(), &stream).unwrap_err();
        assert_eq!(err.status(), Some(Status::CannotDecompress));
        assert!(d.header().is_none());
    }

    #[test]
    fn short_input_cannot_decompress() {
        let stream = Stream::new().unwrap();
        let bytes = lz4_stream(&sample(1_000), &stream);
        let prefix = DeviceBuffer::from_host(&bytes[..HEADER_LEN - 1]);
        let err = FrameDecompressor::new().configure(&prefix, prefix.len(), &stream).unwrap_err();
        assert_eq!(err.status(), Some(Status::CannotDecompress));
    }

    #[test]
    fn corrupted_header_cannot_decompress() {
        let stream = Stream::new().unwrap();
        let mut bytes = lz4_stream(&sample(1_000), &stream);
        bytes[20] ^= 0x01;
        let compressed = DeviceBuffer::from_host(&bytes);
        let err = FrameDecompressor::new()
            .configure(&compressed, compressed.len(), &stream)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::CannotDecompress));
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let stream = Stream::new().unwrap();
        let bytes = lz4_stream(&sample(10_000), &stream);
        let compressed = DeviceBuffer::from_host(&bytes);
        let err = FrameDecompressor::new()
            .configure(&compressed, bytes.len() - 1, &stream)
            .unwrap_err();
        assert_eq!(err.status(), Some(Status::InvalidValue));
    }

    #[test]
    fn corrupted_payload_surfaces_on_synchronize() {
        let stream = Stream::new().unwrap();
        let data = sample(9_000);
        let mut c = RawCompressor::new(CodecOptions::new(4096, TypeTag::UChar).unwrap()).unwrap();
        let mut bytes = compress_with(&mut c, &data, &stream);
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let compressed = DeviceBuffer::from_host(&bytes);

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
        let output = DeviceBuffer::zeroed(sizes.out_bytes);
        d.decompress_async(&compressed, compressed.len(), &temp, sizes.temp_bytes, &output, sizes.out_bytes, &stream)
            .unwrap();

        let err = stream.synchronize().unwrap_err();
        assert_eq!(err.status(), Some(Status::CannotDecompress));
        stream.synchronize().unwrap();
    }

    #[test]
    fn corrupted_lz4_payload_is_an_execution_error() {
        let stream = Stream::new().unwrap();
        let data = sample(9_000);
        let mut bytes = lz4_stream(&data, &stream);
        let mid = HEADER_LEN + 3 * 8 + 5;
        bytes[mid] = bytes[mid].wrapping_add(0x55);
        let compressed = DeviceBuffer::from_host(&bytes);

        let mut d = FrameDecompressor::new();
        let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
        let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
        let output = DeviceBuffer::zeroed(sizes.out_bytes);
        d.decompress_async(&compressed, compressed.len(), &temp, sizes.temp_bytes, &output, sizes.out_bytes, &stream)
            .unwrap();
        assert!(stream.synchronize().is_err());
    }

    #[test]
    fn session_is_reusable_across_streams() {
        let stream = Stream::new().unwrap();
        let mut d = FrameDecompressor::new();
        for len in [0usize, 1, 4096, 12_345] {
            let data = sample(len);
            let compressed = DeviceBuffer::from_host(&lz4_stream(&data, &stream));
            let sizes = d.configure(&compressed, compressed.len(), &stream).unwrap();
            let temp = DeviceBuffer::zeroed(sizes.temp_bytes);
            let output = DeviceBuffer::zeroed(sizes.out_bytes);
            d.decompress_async(&compressed, compressed.len(), &temp, sizes.temp_bytes, &output, sizes.out_bytes, &stream)
                .unwrap();
            stream.synchronize().unwrap();
            assert_eq!(output.to_host(len).unwrap().as_ref(), &data[..]);
        }
    }
}
