//! `container::residual` reads and writes the residual section: one
//! length-prefixed block per segment, in either raw `i32` little-endian or
//! ZigZag+varint form, mirroring how `flac::frame` reads one subframe's worth
//! of residual samples after its header declares how many to expect.

use crate::container::io::{ByteReader, ByteWriter};
use crate::error::CodecError;
use crate::varint;

/// Appends one segment's residual block: a u32 byte-length prefix followed by
/// the encoded residuals themselves.
pub fn write_block(w: &mut ByteWriter, residuals: &[i64], varint_coded: bool) -> Result<(), CodecError> {
    let mut body: Vec<u8> = Vec::new();
    if varint_coded {
        for &r in residuals {
            varint::write_varint(&mut body, r);
        }
    } else {
        for &r in residuals {
            let v = i32::try_from(r)
                .map_err(|_| CodecError::InvalidInput("residual exceeds raw i32 range"))?;
            body.extend_from_slice(&v.to_le_bytes());
        }
    }
    let block_len =
        u32::try_from(body.len()).map_err(|_| CodecError::InvalidInput("residual block too large"))?;
    w.write_le_u32(block_len);
    w.write_bytes(&body);
    Ok(())
}

/// Reads one segment's residual block and decodes exactly `expected_len`
/// residuals from it. Any mismatch between the block's declared byte length,
/// its actual decoded count, and `expected_len` is `MalformedResidualBlock`.
pub fn read_block(r: &mut ByteReader, expected_len: usize, varint_coded: bool) -> Result<Vec<i64>, CodecError> {
    let block_len = r
        .read_le_u32()
        .ok_or(CodecError::MalformedResidualBlock)? as usize;

    if !varint_coded {
        if block_len != expected_len * 4 {
            return Err(CodecError::MalformedResidualBlock);
        }
        let body = r.read_bytes(block_len).ok_or(CodecError::MalformedResidualBlock)?;
        let mut out = Vec::with_capacity(expected_len);
        for chunk in body.chunks_exact(4) {
            let mut a = [0u8; 4];
            a.copy_from_slice(chunk);
            out.push(i32::from_le_bytes(a) as i64);
        }
        return Ok(out);
    }

    let body = r.read_bytes(block_len).ok_or(CodecError::MalformedResidualBlock)?;
    let mut pos = 0usize;
    let mut out = Vec::with_capacity(expected_len);
    while pos < body.len() {
        let value = varint::read_varint(body, &mut pos)?;
        out.push(value);
    }
    if pos != body.len() {
        return Err(CodecError::MalformedResidualBlock);
    }
    if out.len() != expected_len {
        return Err(CodecError::MalformedResidualBlock);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_block_round_trips() {
        let residuals = vec![-3, 0, 1, 2000, -70000];
        let mut w = ByteWriter::new();
        write_block(&mut w, &residuals, false).unwrap();
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        let decoded = read_block(&mut r, residuals.len(), false).unwrap();
        assert_eq!(decoded, residuals);
    }

    #[test]
    fn varint_block_round_trips() {
        let residuals = vec![-3, 0, 1, 2000, -70000, i32::MAX as i64];
        let mut w = ByteWriter::new();
        write_block(&mut w, &residuals, true).unwrap();
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        let decoded = read_block(&mut r, residuals.len(), true).unwrap();
        assert_eq!(decoded, residuals);
    }

    #[test]
    fn raw_block_rejects_length_mismatch() {
        let residuals = vec![1, 2, 3];
        let mut w = ByteWriter::new();
        write_block(&mut w, &residuals, false).unwrap();
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            read_block(&mut r, 2, false),
            Err(CodecError::MalformedResidualBlock)
        ));
    }

    #[test]
    fn varint_block_rejects_count_mismatch() {
        let residuals = vec![1, 2, 3, 4];
        let mut w = ByteWriter::new();
        write_block(&mut w, &residuals, true).unwrap();
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            read_block(&mut r, 3, true),
            Err(CodecError::MalformedResidualBlock)
        ));
    }

    #[test]
    fn truncated_block_fails_without_panicking() {
        let mut w = ByteWriter::new();
        w.write_le_u32(100);
        w.write_bytes(&[1, 2, 3]);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            read_block(&mut r, 10, false),
            Err(CodecError::MalformedResidualBlock)
        ));
    }

    #[test]
    fn raw_block_rejects_residual_outside_i32_range() {
        let residuals = vec![i64::from(i32::MAX) + 1];
        let mut w = ByteWriter::new();
        assert!(write_block(&mut w, &residuals, false).is_err());
    }
}
