//! The `container` module assembles and parses the on-disk byte format:
//! fixed header, JSON context block, fixed-width segment table, and the
//! residual section, in that order. Each submodule owns one section's wire
//! format; this module sequences them and owns the cross-section invariants
//! (coverage of `[0, n_points)`, table size fits the buffer before anything
//! is allocated from a declared count).

pub mod context;
pub mod header;
pub mod io;
pub mod residual;
pub mod segment_table;

use crate::config::{EncodeConfig, ResidualCoding};
use crate::error::CodecError;
use crate::timeseries::{Segment, TimeOrigin};

use header::FixedHeader;
use io::{ByteReader, ByteWriter};
use segment_table::SEGMENT_ENTRY_LEN;

/// Serializes a fully-fit set of segments plus series metadata into a
/// complete container buffer.
pub fn write(
    dt: f64,
    t0: &TimeOrigin,
    unit: &str,
    n_points: u64,
    segments: &[Segment],
    cfg: &EncodeConfig,
) -> Result<Vec<u8>, CodecError> {
    let varint_coded = matches!(cfg.residual_coding, ResidualCoding::Varint);
    let context_bytes = context::write(dt, t0, unit);

    let header = FixedHeader {
        flags: if varint_coded { header::FLAG_RESIDUAL_VARINT } else { 0 },
        n_points,
        n_segments: u32::try_from(segments.len())
            .map_err(|_| CodecError::InvalidInput("too many segments to encode"))?,
        context_len: u32::try_from(context_bytes.len())
            .map_err(|_| CodecError::InvalidInput("context block too large"))?,
    };

    let mut w = ByteWriter::new();
    header.write(&mut w);
    w.write_bytes(&context_bytes);
    for seg in segments {
        segment_table::write(&mut w, seg);
    }
    // Redundant with the header's residual-coding flag bit, but validated on
    // read per §6.1.
    w.write_u8(if varint_coded { 1 } else { 0 });
    for seg in segments {
        residual::write_block(&mut w, &seg.residuals, varint_coded)?;
    }

    Ok(w.into_bytes())
}

/// Parsed container contents, before predictor reconstruction turns segments
/// back into sample values (that last step lives in `codec::decode`, since it
/// needs nothing this module owns).
pub struct Parsed {
    pub dt: f64,
    pub t0: TimeOrigin,
    pub unit: String,
    pub n_points: u64,
    pub segments: Vec<Segment>,
}

/// Parses and fully validates a container buffer, refusing to allocate
/// anything sized from a declared count until that count has been checked
/// against the remaining buffer length.
pub fn read(bytes: &[u8]) -> Result<Parsed, CodecError> {
    let mut r = ByteReader::new(bytes);
    let header = FixedHeader::read(&mut r)?;

    let context_bytes = r
        .read_bytes(header.context_len as usize)
        .ok_or(CodecError::TruncatedHeader)?;
    let (dt, t0, unit) = context::read(context_bytes)?;

    let table_len = (header.n_segments as usize)
        .checked_mul(SEGMENT_ENTRY_LEN)
        .ok_or(CodecError::TruncatedSegmentTable)?;
    if table_len > r.remaining() {
        return Err(CodecError::TruncatedSegmentTable);
    }

    let mut segments = Vec::with_capacity(header.n_segments as usize);
    for _ in 0..header.n_segments {
        segments.push(segment_table::read_entry(&mut r)?);
    }
    validate_coverage(&segments, header.n_points)?;

    let varint_coded = header.residual_is_varint();
    let coding_type = r.read_u8().ok_or(CodecError::MalformedResidualBlock)?;
    if (coding_type != 0) != varint_coded {
        return Err(CodecError::InconsistentCounts(
            "residual section coding_type byte does not match header flags",
        ));
    }

    for seg in segments.iter_mut() {
        let expected_len = seg.len() as usize;
        seg.residuals = residual::read_block(&mut r, expected_len, varint_coded)?;
    }

    Ok(Parsed {
        dt,
        t0,
        unit,
        n_points: header.n_points,
        segments,
    })
}

/// Parses header, context, and segment table only — never touches the
/// residual section. Used by `info` projections that only need per-segment
/// metadata (`read_info`, `export_tags`, `export_profile`).
pub fn read_metadata_only(bytes: &[u8]) -> Result<Parsed, CodecError> {
    let mut r = ByteReader::new(bytes);
    let header = FixedHeader::read(&mut r)?;

    let context_bytes = r
        .read_bytes(header.context_len as usize)
        .ok_or(CodecError::TruncatedHeader)?;
    let (dt, t0, unit) = context::read(context_bytes)?;

    let table_len = (header.n_segments as usize)
        .checked_mul(SEGMENT_ENTRY_LEN)
        .ok_or(CodecError::TruncatedSegmentTable)?;
    if table_len > r.remaining() {
        return Err(CodecError::TruncatedSegmentTable);
    }

    let mut segments = Vec::with_capacity(header.n_segments as usize);
    for _ in 0..header.n_segments {
        segments.push(segment_table::read_entry(&mut r)?);
    }
    validate_coverage(&segments, header.n_points)?;

    Ok(Parsed {
        dt,
        t0,
        unit,
        n_points: header.n_points,
        segments,
    })
}

fn validate_coverage(segments: &[Segment], n_points: u64) -> Result<(), CodecError> {
    if segments.is_empty() {
        return if n_points == 0 {
            Ok(())
        } else {
            Err(CodecError::CoverageMismatch)
        };
    }
    if segments[0].start != 0 {
        return Err(CodecError::CoverageMismatch);
    }
    for pair in segments.windows(2) {
        if pair[0].end != pair[1].start {
            return Err(CodecError::CoverageMismatch);
        }
    }
    if segments.last().unwrap().end != n_points {
        return Err(CodecError::CoverageMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodeConfig;
    use crate::timeseries::{Pattern, PredictorType};

    fn sample_segment(start: u64, end: u64) -> Segment {
        let len = (end - start) as usize;
        Segment {
            start,
            end,
            predictor_type: PredictorType::Mean,
            mean: 1.0,
            slope: 0.0,
            intercept: 1.0,
            seed_value: 1.0,
            q: 0.1,
            residuals: vec![0; len],
            patt: Pattern::Flat,
            sal: 0,
            energy: 0.0,
        }
    }

    #[test]
    fn container_round_trips_structure() {
        let segments = vec![sample_segment(0, 5), sample_segment(5, 12)];
        let cfg = EncodeConfig::default();
        let bytes = write(1.0, &TimeOrigin::Number(0.0), "degC", 12, &segments, &cfg).unwrap();
        let parsed = read(&bytes).unwrap();
        assert_eq!(parsed.n_points, 12);
        assert_eq!(parsed.segments.len(), 2);
        assert_eq!(parsed.segments[1].start, 5);
        assert_eq!(parsed.segments[1].end, 12);
        assert_eq!(parsed.unit, "degC");
    }

    #[test]
    fn rejects_coverage_gap() {
        let segments = vec![sample_segment(0, 5), sample_segment(6, 12)];
        let cfg = EncodeConfig::default();
        let bytes = write(1.0, &TimeOrigin::Number(0.0), "s", 12, &segments, &cfg).unwrap();
        assert!(matches!(read(&bytes), Err(CodecError::CoverageMismatch)));
    }

    #[test]
    fn rejects_coding_type_byte_mismatched_with_header_flags() {
        let segments = vec![sample_segment(0, 5)];
        let cfg = EncodeConfig::default();
        let mut bytes = write(1.0, &TimeOrigin::Number(0.0), "s", 5, &segments, &cfg).unwrap();
        // The coding_type byte sits right after the single segment-table entry.
        let context_len = context::write(1.0, &TimeOrigin::Number(0.0), "s").len();
        let coding_type_pos = header::FIXED_HEADER_LEN + context_len + SEGMENT_ENTRY_LEN;
        bytes[coding_type_pos] ^= 1;
        assert!(matches!(
            read(&bytes),
            Err(CodecError::InconsistentCounts(_))
        ));
    }

    #[test]
    fn rejects_oversized_declared_segment_count() {
        let segments = vec![sample_segment(0, 5)];
        let cfg = EncodeConfig::default();
        let mut bytes = write(1.0, &TimeOrigin::Number(0.0), "s", 5, &segments, &cfg).unwrap();
        // Corrupt the header's n_segments field (after magic+version+flags+n_points) to
        // claim far more segments than the buffer could possibly hold.
        bytes[16..20].copy_from_slice(&0xffff_ff00u32.to_le_bytes());
        assert!(matches!(read(&bytes), Err(CodecError::TruncatedSegmentTable)));
    }
}
