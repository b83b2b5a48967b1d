use crate::error::{Result, TshareError};
use crate::join::join_payloads;
use crate::share::{Tag, TagPair, SHARE_COUNT, TAG_SIZE};
use crate::split::{generate_mask, split_into};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::io::{ErrorKind, Read, Write};
use tracing::debug;

/// Default chunk size for stream splitting and joining
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Options shared by the stream adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOptions {
    /// Bytes processed per chunk
    pub buffer_size: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl StreamOptions {
    pub fn new(buffer_size: usize) -> Result<Self> {
        let options = Self { buffer_size };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(TshareError::InvalidBufferSize(self.buffer_size));
        }
        Ok(())
    }
}

/// Split everything read from `reader` into three share streams.
///
/// Each writer receives its tag byte followed by the masked payload, so the
/// finished streams use the same layout as [`crate::split`] output.
/// Returns the number of secret bytes consumed.
pub fn split_stream<R, W>(
    reader: &mut R,
    writers: &mut [W; SHARE_COUNT],
    options: &StreamOptions,
) -> Result<u64>
where
    R: Read,
    W: Write,
{
    split_stream_with_rng(reader, writers, options, &mut OsRng)
}

/// [`split_stream`] with a caller-supplied RNG
pub fn split_stream_with_rng<R, W, G>(
    reader: &mut R,
    writers: &mut [W; SHARE_COUNT],
    options: &StreamOptions,
    rng: &mut G,
) -> Result<u64>
where
    R: Read,
    W: Write,
    G: RngCore + CryptoRng,
{
    options.validate()?;
    let size = options.buffer_size;

    for (writer, tag) in writers.iter_mut().zip(Tag::ALL) {
        writer.write_all(&[tag.index()])?;
    }

    let mut m = vec![0u8; size];
    let mut s0 = vec![0u8; size];
    let mut s1 = vec![0u8; size];
    let mut s2 = vec![0u8; size];
    let mut total = 0u64;
    let mut chunks = 0usize;

    loop {
        let n = fill_buffer(reader, &mut m)?;
        if n == 0 {
            break;
        }

        let mask = generate_mask(rng, n)?;
        split_into(&m[..n], &mask, &mut s0[..n], &mut s1[..n], &mut s2[..n]);

        let [w0, w1, w2] = &mut *writers;
        w0.write_all(&s0[..n])?;
        w1.write_all(&s1[..n])?;
        w2.write_all(&s2[..n])?;

        total += n as u64;
        chunks += 1;
    }

    for writer in writers.iter_mut() {
        writer.flush()?;
    }

    debug!(bytes = total, chunks, buffer_size = size, "Split stream complete");
    Ok(total)
}

/// Recover a secret from two or three share streams, writing it to `writer`.
///
/// Every supplied stream must carry a distinct tag and the same payload
/// length; the first two streams are used for recovery and a third, when
/// given, is only checked for consistency.
/// Returns the number of secret bytes written.
pub fn join_stream<R, W>(readers: &mut [R], writer: &mut W, options: &StreamOptions) -> Result<u64>
where
    R: Read,
    W: Write,
{
    options.validate()?;
    let tags = read_stream_tags(readers)?;
    join_tagged_streams(readers, &tags, writer, options)
}

/// Consume and check the tag byte at the head of each share stream.
///
/// Fails with `InsufficientShares` for fewer than two streams and with
/// `InvalidShares` for more than three, an empty stream, an unknown tag or
/// a repeated tag. Nothing is read past the tag byte.
pub fn read_stream_tags<R: Read>(readers: &mut [R]) -> Result<Vec<Tag>> {
    if readers.len() < 2 {
        return Err(TshareError::InsufficientShares(readers.len()));
    }
    if readers.len() > SHARE_COUNT {
        return Err(TshareError::InvalidShares(format!(
            "{} shares supplied, at most {} exist",
            readers.len(),
            SHARE_COUNT
        )));
    }

    let mut tags = Vec::with_capacity(readers.len());
    for (i, reader) in readers.iter_mut().enumerate() {
        let mut tag = [0u8; TAG_SIZE];
        if fill_buffer(reader, &mut tag)? == 0 {
            return Err(TshareError::InvalidShares(format!("share {} is empty", i)));
        }
        tags.push(Tag::try_from(tag[0])?);
    }
    for i in 0..tags.len() {
        for j in (i + 1)..tags.len() {
            TagPair::from_tags(tags[i], tags[j])?;
        }
    }
    Ok(tags)
}

/// Join share streams whose tags were already consumed by [`read_stream_tags`].
/// `tags[i]` must be the tag read from `readers[i]`.
pub fn join_tagged_streams<R, W>(
    readers: &mut [R],
    tags: &[Tag],
    writer: &mut W,
    options: &StreamOptions,
) -> Result<u64>
where
    R: Read,
    W: Write,
{
    options.validate()?;
    let size = options.buffer_size;

    if readers.len() != tags.len() || tags.len() < 2 {
        return Err(TshareError::InsufficientShares(tags.len().min(readers.len())));
    }
    let (pair, swapped) = TagPair::from_tags(tags[0], tags[1])?;
    let (lo, hi) = if swapped { (1, 0) } else { (0, 1) };
    debug!(?pair, shares = readers.len(), "Joining share streams");

    let mut buffers = vec![vec![0u8; size]; readers.len()];
    let mut counts = vec![0usize; readers.len()];
    let mut totals = vec![0usize; readers.len()];
    let mut m = vec![0u8; size];
    let mut total = 0u64;

    loop {
        for (((reader, buffer), count), sum) in readers
            .iter_mut()
            .zip(buffers.iter_mut())
            .zip(counts.iter_mut())
            .zip(totals.iter_mut())
        {
            *count = fill_buffer(reader, buffer)?;
            *sum += *count;
        }

        // Report payload bytes read so far, not the size of this chunk
        let n = counts[0];
        if let Some(k) = counts.iter().position(|&c| c != n) {
            return Err(TshareError::SizeMismatch {
                left: totals[0],
                right: totals[k],
            });
        }
        if n == 0 {
            break;
        }

        join_payloads(pair, &buffers[lo][..n], &buffers[hi][..n], &mut m[..n]);
        writer.write_all(&m[..n])?;
        total += n as u64;
    }

    writer.flush()?;
    debug!(bytes = total, "Join stream complete");
    Ok(total)
}

/// Read until `buf` is full or the reader is exhausted.
/// Returns the number of bytes read; 0 means end of stream.
fn fill_buffer<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
