use std::io::{self, Read};
use std::marker::PhantomData;
use crate::engine::io::format::{decode_chunk, decode_chunk_header, entry_len, CHUNK_HEADER_SIZE};
use crate::engine::io::RecordSource;
use crate::engine::mem::FixedCodec;
use crate::error::IndexError;

/// Reads the chunks written by `SparseMultimapMem::dump_as_list`.
///
/// A clean end of input at a chunk boundary ends the list. A short chunk or
/// a checksum mismatch is reported as corruption.
pub struct ListReader<R: Read, I, V> {
    r: R,
    payload: Vec<u8>,
    chunks_read: u64,
    _entry: PhantomData<fn() -> (I, V)>,
}

impl<R: Read, I: FixedCodec, V: FixedCodec> ListReader<R, I, V> {
    pub fn new(r: R) -> Self {
        Self {
            r,
            payload: Vec::new(),
            chunks_read: 0,
            _entry: PhantomData,
        }
    }

    pub fn chunks_read(&self) -> u64 {
        self.chunks_read
    }

    /// Fills `buf` as far as the input allows; returns bytes read.
    fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut off = 0;
        while off < buf.len() {
            match self.r.read(&mut buf[off..]) {
                Ok(0) => break,
                Ok(n) => off += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(off)
    }
}

impl<R: Read, I: FixedCodec, V: FixedCodec> RecordSource for ListReader<R, I, V> {
    type Item = (I, V);

    fn read(&mut self) -> Result<Option<Vec<(I, V)>>, IndexError> {
        let mut header = [0u8; CHUNK_HEADER_SIZE];
        match self.read_full(&mut header)? {
            0 => return Ok(None),
            CHUNK_HEADER_SIZE => {}
            n => {
                return Err(IndexError::Corruption(format!(
                    "truncated chunk header ({} of {} bytes) after chunk {}",
                    n, CHUNK_HEADER_SIZE, self.chunks_read
                )));
            }
        }

        let (crc, count) = decode_chunk_header(&header)?;
        let want = count * entry_len::<I, V>();

        let mut payload = std::mem::take(&mut self.payload);
        payload.resize(want, 0);
        let got = self.read_full(&mut payload)?;
        if got != want {
            return Err(IndexError::Corruption(format!(
                "truncated chunk payload ({} of {} bytes) after chunk {}",
                got, want, self.chunks_read
            )));
        }

        let entries = decode_chunk(crc, count, &payload)?;
        self.payload = payload;
        self.chunks_read += 1;
        Ok(Some(entries))
    }
}
