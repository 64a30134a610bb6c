//! `container::header` reads and writes the fixed 28-byte header, the way
//! `flac::mod::FlacReader::read_stream_info` reads FLAC's STREAMINFO block:
//! fixed-width fields read in order, each checked as it comes off the wire.

use crate::container::io::{ByteReader, ByteWriter};
use crate::error::CodecError;

pub const MAGIC: &[u8; 4] = b"LSG2";
pub const VERSION: u16 = 1;

/// Bit 0 of `flags`: residual coding format (0 = raw, 1 = varint+zigzag).
pub const FLAG_RESIDUAL_VARINT: u16 = 1 << 0;
/// All other bits are reserved and must be zero.
const FLAG_RESERVED_MASK: u16 = !FLAG_RESIDUAL_VARINT;

pub const FIXED_HEADER_LEN: usize = 4 + 2 + 2 + 8 + 4 + 4 + 8;
const RESERVED_LEN: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedHeader {
    pub flags: u16,
    pub n_points: u64,
    pub n_segments: u32,
    pub context_len: u32,
}

impl FixedHeader {
    pub fn residual_is_varint(&self) -> bool {
        self.flags & FLAG_RESIDUAL_VARINT != 0
    }

    pub fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(MAGIC);
        w.write_le_u16(VERSION);
        w.write_le_u16(self.flags);
        w.write_le_u64(self.n_points);
        w.write_le_u32(self.n_segments);
        w.write_le_u32(self.context_len);
        w.write_bytes(&[0u8; RESERVED_LEN]);
    }

    /// Parses and validates the fixed header. Bounds- and content-checks every
    /// field before returning, per §4.7 ("refuses to allocate before counts
    /// have been sanity-checked").
    pub fn read(r: &mut ByteReader) -> Result<Self, CodecError> {
        let magic = r.read_bytes(4).ok_or(CodecError::TruncatedHeader)?;
        if magic != MAGIC {
            return Err(CodecError::BadMagic);
        }

        let version = r.read_le_u16().ok_or(CodecError::TruncatedHeader)?;
        if version != VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let flags = r.read_le_u16().ok_or(CodecError::TruncatedHeader)?;
        if flags & FLAG_RESERVED_MASK != 0 {
            return Err(CodecError::TruncatedHeader);
        }

        let n_points = r.read_le_u64().ok_or(CodecError::TruncatedHeader)?;
        let n_segments = r.read_le_u32().ok_or(CodecError::TruncatedHeader)?;
        let context_len = r.read_le_u32().ok_or(CodecError::TruncatedHeader)?;

        if context_len as u64 > (1u64 << 20) {
            return Err(CodecError::TruncatedHeader);
        }

        match r.peek_is_zero(RESERVED_LEN) {
            Some(true) => {}
            Some(false) => return Err(CodecError::TruncatedHeader),
            None => return Err(CodecError::TruncatedHeader),
        }
        r.skip(RESERVED_LEN).ok_or(CodecError::TruncatedHeader)?;

        Ok(FixedHeader {
            flags,
            n_points,
            n_segments,
            context_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> FixedHeader {
        FixedHeader {
            flags: FLAG_RESIDUAL_VARINT,
            n_points: 1000,
            n_segments: 12,
            context_len: 40,
        }
    }

    #[test]
    fn header_round_trips() {
        let header = sample_header();
        let mut w = ByteWriter::new();
        header.write(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), FIXED_HEADER_LEN);

        let mut r = ByteReader::new(&bytes);
        let parsed = FixedHeader::read(&mut r).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = vec![0u8; FIXED_HEADER_LEN];
        bytes[..4].copy_from_slice(b"XXXX");
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(FixedHeader::read(&mut r), Err(CodecError::BadMagic)));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut w = ByteWriter::new();
        w.write_bytes(MAGIC);
        w.write_le_u16(99);
        w.write_le_u16(0);
        w.write_le_u64(0);
        w.write_le_u32(0);
        w.write_le_u32(0);
        w.write_bytes(&[0u8; RESERVED_LEN]);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            FixedHeader::read(&mut r),
            Err(CodecError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn rejects_reserved_flag_bits() {
        let mut w = ByteWriter::new();
        w.write_bytes(MAGIC);
        w.write_le_u16(VERSION);
        w.write_le_u16(0b10);
        w.write_le_u64(0);
        w.write_le_u32(0);
        w.write_le_u32(0);
        w.write_bytes(&[0u8; RESERVED_LEN]);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(FixedHeader::read(&mut r).is_err());
    }

    #[test]
    fn rejects_context_len_over_one_megabyte() {
        let mut header = sample_header();
        header.context_len = (1 << 20) + 1;
        let mut w = ByteWriter::new();
        header.write(&mut w);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            FixedHeader::read(&mut r),
            Err(CodecError::TruncatedHeader)
        ));
    }

    #[test]
    fn truncated_buffer_fails_without_panicking() {
        let bytes = [b'L', b'S', b'G', b'2', 1, 0];
        let mut r = ByteReader::new(&bytes);
        assert!(FixedHeader::read(&mut r).is_err());
    }
}
