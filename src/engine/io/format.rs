use crate::engine::mem::FixedCodec;
use crate::error::IndexError;

/// Maximum number of entries framed into one dump chunk.
pub const DUMP_CHUNK_ENTRIES: usize = 4096;
pub const CHUNK_HEADER_SIZE: usize = 8; // crc32c(4) + count(u32)

pub fn entry_len<I: FixedCodec, V: FixedCodec>() -> usize {
    I::ENCODED_LEN + V::ENCODED_LEN
}

/// CRC over (count bytes || payload)
pub fn chunk_crc32c(count_bytes: &[u8], payload: &[u8]) -> u32 {
    crc32c::crc32c_append(crc32c::crc32c(count_bytes), payload)
}

/// Appends one framed chunk holding `entries` to `dst`.
pub fn encode_chunk<I: FixedCodec, V: FixedCodec>(entries: &[(I, V)], dst: &mut Vec<u8>) {
    debug_assert!(!entries.is_empty() && entries.len() <= DUMP_CHUNK_ENTRIES);

    let count = (entries.len() as u32).to_le_bytes();

    let mut payload = Vec::with_capacity(entries.len() * entry_len::<I, V>());
    for (id, value) in entries {
        id.encode_to(&mut payload);
        value.encode_to(&mut payload);
    }

    dst.extend_from_slice(&chunk_crc32c(&count, &payload).to_le_bytes());
    dst.extend_from_slice(&count);
    dst.extend_from_slice(&payload);
}

/// Splits a chunk header into (crc, count).
pub fn decode_chunk_header(header: &[u8; CHUNK_HEADER_SIZE]) -> Result<(u32, usize), IndexError> {
    let crc = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    let count = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;

    if count == 0 || count > DUMP_CHUNK_ENTRIES {
        return Err(IndexError::Corruption(format!("invalid chunk entry count: {}", count)));
    }
    Ok((crc, count))
}

pub fn decode_chunk<I: FixedCodec, V: FixedCodec>(
    crc: u32,
    count: usize,
    payload: &[u8],
) -> Result<Vec<(I, V)>, IndexError> {
    let len = entry_len::<I, V>();
    if payload.len() != count * len {
        return Err(IndexError::Corruption(format!(
            "chunk payload is {} bytes, expected {}",
            payload.len(),
            count * len
        )));
    }

    if chunk_crc32c(&(count as u32).to_le_bytes(), payload) != crc {
        return Err(IndexError::Corruption("chunk checksum mismatch".into()));
    }

    Ok(payload
        .chunks_exact(len)
        .map(|raw| (I::decode(&raw[..I::ENCODED_LEN]), V::decode(&raw[I::ENCODED_LEN..])))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_header(buf: &[u8]) -> [u8; CHUNK_HEADER_SIZE] {
        buf[..CHUNK_HEADER_SIZE].try_into().unwrap()
    }

    #[test]
    fn test_chunk_layout() {
        let mut buf = Vec::new();
        encode_chunk(&[(7u32, 70u64), (9, 90)], &mut buf);

        assert_eq!(buf.len(), CHUNK_HEADER_SIZE + 2 * 12);
        assert_eq!(&buf[4..8], &2u32.to_le_bytes());
        assert_eq!(&buf[8..12], &7u32.to_le_bytes());
        assert_eq!(&buf[12..20], &70u64.to_le_bytes());

        let (crc, count) = decode_chunk_header(&split_header(&buf)).unwrap();
        let entries: Vec<(u32, u64)> = decode_chunk(crc, count, &buf[CHUNK_HEADER_SIZE..]).unwrap();
        assert_eq!(entries, vec![(7, 70), (9, 90)]);
    }

    #[test]
    fn test_flipped_payload_bit_is_corruption() {
        let mut buf = Vec::new();
        encode_chunk(&[(1u64, 10u32)], &mut buf);
        let last = buf.len() - 1;
        buf[last] ^= 0x01;

        let (crc, count) = decode_chunk_header(&split_header(&buf)).unwrap();
        let res = decode_chunk::<u64, u32>(crc, count, &buf[CHUNK_HEADER_SIZE..]);
        assert!(matches!(res, Err(IndexError::Corruption(_))));
    }

    #[test]
    fn test_zero_count_header_rejected() {
        let header = [0u8; CHUNK_HEADER_SIZE];
        assert!(matches!(decode_chunk_header(&header), Err(IndexError::Corruption(_))));
    }
}
