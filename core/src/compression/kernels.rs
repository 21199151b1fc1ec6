//! compression/kernels.rs
//! Chunked compress/decompress kernels.
//!
//! Kernels run on a stream worker. Independent chunks are spread over a
//! scoped thread group (the emulated grid), one contiguous run of chunks per
//! thread, and results are reassembled in chunk order. Kernels work only in
//! the caller's buffers; encoded chunks are staged in the temp workspace.
use crate::compression::codecs::ChunkCodec;
use crate::headers::{
    decode_chunk_table, decode_header_le, encode_chunk_table, encode_header_le, ChunkEntry,
    HeaderFlags, StreamHeader, CHUNK_ENTRY_LEN, HEADER_LEN,
};
use crate::types::{CompressionError, Status};
use crate::utils::compute_checksum;

/// Temporary workspace decompression needs for `num_chunks` chunks: the
/// staged chunk table.
pub fn temp_bytes_for(num_chunks: usize) -> usize {
    num_chunks * CHUNK_ENTRY_LEN
}

/// Temporary workspace compression needs: the chunk table followed by a
/// worst-case encoding slot per chunk.
pub fn compress_temp_bytes<C: ChunkCodec>(in_bytes: usize, chunk_size: usize) -> usize {
    max_stream_len::<C>(in_bytes, chunk_size) - HEADER_LEN
}

/// Upper bound on the stream `C` produces for `in_bytes` input bytes.
pub fn max_stream_len<C: ChunkCodec>(in_bytes: usize, chunk_size: usize) -> usize {
    let full = in_bytes / chunk_size;
    let tail = in_bytes % chunk_size;
    let mut bound = HEADER_LEN + temp_bytes_for(full) + full * C::max_compressed_len(chunk_size);
    if tail > 0 {
        bound += CHUNK_ENTRY_LEN + C::max_compressed_len(tail);
    }
    bound
}

/// Compress `input` into a complete stream in `out`.
///
/// `header` carries everything but the compressed size. `temp` holds the
/// chunk table and one encoding slot per chunk (see `compress_temp_bytes`).
/// Nothing is written to `out` unless the whole stream fits.
pub fn compress<C: ChunkCodec>(
    input: &[u8],
    mut header: StreamHeader,
    temp: &mut [u8],
    out: &mut [u8],
) -> Result<usize, CompressionError> {
    let chunk_size = header.chunk_size as usize;
    let need_temp = compress_temp_bytes::<C>(input.len(), chunk_size);
    if temp.len() < need_temp {
        return Err(CompressionError::invalid_value(format!(
            "temporary workspace of {} bytes is smaller than the required {}",
            temp.len(),
            need_temp
        )));
    }

    let table_len = header.table_len();
    let (table, mut scratch) = temp.split_at_mut(table_len);
    let mut jobs = Vec::with_capacity(header.num_chunks as usize);
    for chunk in input.chunks(chunk_size) {
        let (slot, rest) = std::mem::take(&mut scratch).split_at_mut(C::max_compressed_len(chunk.len()));
        jobs.push((chunk, slot));
        scratch = rest;
    }

    let encoded = run_grid(jobs, |(chunk, slot)| {
        let n = C::compress_chunk(chunk, slot)?;
        let entry = ChunkEntry { compressed_len: n as u32, crc32: compute_checksum(chunk) };
        let slot: &[u8] = slot;
        Ok((entry, &slot[..n]))
    })?;

    let entries: Vec<ChunkEntry> = encoded.iter().map(|(entry, _)| *entry).collect();
    encode_chunk_table(&entries, table);

    let total = header.payload_offset() + encoded.iter().map(|(_, p)| p.len()).sum::<usize>();
    if total > out.len() {
        return Err(CompressionError::invalid_value(format!(
            "compressed stream of {} bytes exceeds output capacity of {} bytes",
            total,
            out.len()
        )));
    }

    header.compressed_bytes = total as u64;
    out[..HEADER_LEN].copy_from_slice(&encode_header_le(&header));
    out[HEADER_LEN..header.payload_offset()].copy_from_slice(table);
    let mut offset = header.payload_offset();
    for (_, payload) in &encoded {
        out[offset..offset + payload.len()].copy_from_slice(payload);
        offset += payload.len();
    }
    debug_assert_eq!(offset, total);

    Ok(total)
}

/// Decompress the stream in `input` into `out`.
///
/// `expected` is the header read at configure time; the stream must still
/// carry it. The chunk table is staged in `temp`.
pub fn decompress<C: ChunkCodec>(
    expected: &StreamHeader,
    input: &[u8],
    temp: &mut [u8],
    out: &mut [u8],
) -> Result<usize, CompressionError> {
    let header = decode_header_le(input)?;
    if &header != expected {
        return Err(CompressionError::cannot_decompress(
            "input header differs from the one read at configure time",
        ));
    }

    let stream_len = header.compressed_bytes as usize;
    let table_len = header.table_len();
    if input.len() < stream_len || temp.len() < table_len {
        return Err(CompressionError::invalid_value(format!(
            "stream of {} bytes with a {}-byte chunk table does not fit the given buffers",
            stream_len, table_len
        )));
    }
    temp[..table_len].copy_from_slice(&input[HEADER_LEN..header.payload_offset()]);
    let entries = decode_chunk_table(&temp[..table_len], header.num_chunks as usize)?;

    let mut payloads = Vec::with_capacity(entries.len());
    let mut offset = header.payload_offset();
    for (i, entry) in entries.iter().enumerate() {
        let end = offset + entry.compressed_len as usize;
        if end > stream_len {
            return Err(CompressionError::cannot_decompress(format!(
                "chunk {} overruns the {}-byte stream",
                i, stream_len
            )));
        }
        payloads.push(&input[offset..end]);
        offset = end;
    }
    if offset != stream_len {
        return Err(CompressionError::cannot_decompress(format!(
            "chunk table covers {} bytes, stream has {}",
            offset, stream_len
        )));
    }

    let total = header.uncompressed_bytes as usize;
    if out.len() < total {
        return Err(CompressionError::invalid_value(format!(
            "output of {} bytes is smaller than the {} bytes to decompress",
            out.len(),
            total
        )));
    }
    let verify_crc = header.flags().contains(HeaderFlags::CHUNK_CRC32);
    let jobs: Vec<ChunkIn<'_>> = entries
        .into_iter()
        .zip(payloads)
        .zip(out[..total].chunks_mut(header.chunk_size as usize))
        .enumerate()
        .map(|(index, ((entry, payload), dst))| ChunkIn { index, entry, payload, dst })
        .collect();

    run_grid(jobs, |job| {
        let n = C::decompress_chunk(job.payload, job.dst)?;
        if n != job.dst.len() {
            return Err(CompressionError::cannot_decompress(format!(
                "chunk {} decoded to {} bytes, expected {}",
                job.index,
                n,
                job.dst.len()
            )));
        }
        if verify_crc && compute_checksum(job.dst) != job.entry.crc32 {
            return Err(CompressionError::cannot_decompress(format!(
                "chunk {} failed its crc check",
                job.index
            )));
        }
        Ok(())
    })?;

    Ok(total)
}

struct ChunkIn<'a> {
    index: usize,
    entry: ChunkEntry,
    payload: &'a [u8],
    dst: &'a mut [u8],
}

/// Run `f` over `items` on up to `num_cpus` scoped threads, keeping order.
fn run_grid<T, R, F>(items: Vec<T>, f: F) -> Result<Vec<R>, CompressionError>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R, CompressionError> + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let workers = num_cpus::get().clamp(1, items.len());
    if workers == 1 {
        return items.into_iter().map(f).collect();
    }

    let per_worker = items.len().div_ceil(workers);
    let mut groups: Vec<Vec<T>> = Vec::with_capacity(workers);
    let mut rest = items.into_iter();
    loop {
        let group: Vec<T> = rest.by_ref().take(per_worker).collect();
        if group.is_empty() {
            break;
        }
        groups.push(group);
    }

    let f = &f;
    crossbeam::thread::scope(|s| {
        let handles: Vec<_> = groups
            .into_iter()
            .map(|group| s.spawn(move |_| group.into_iter().map(f).collect::<Result<Vec<R>, _>>()))
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(part) => results.extend(part?),
                Err(_) => {
                    return Err(CompressionError::from_status(Status::Internal, "kernel worker panicked"));
                }
            }
        }
        Ok(results)
    })
    .map_err(|_| CompressionError::from_status(Status::Internal, "kernel grid panicked"))?
}
