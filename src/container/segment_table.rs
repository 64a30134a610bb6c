//! `container::segment_table` reads and writes the fixed-width segment table:
//! one entry per segment, laid out exactly in the order the fields are listed
//! below, with the same "bounds-check the whole table before touching a
//! single entry" discipline the header module uses.

use crate::container::io::{ByteReader, ByteWriter};
use crate::error::CodecError;
use crate::timeseries::{Pattern, PredictorType, Segment};

/// Bytes per entry: 2 × u64 (start/end) + u8 predictor_type + 3 reserved
/// + 5 × f64 (mean, slope, intercept, Q, seed_value) + u8 patt + u8 sal
/// + 2 reserved = 16 + 4 + 40 + 4 = 64.
pub const SEGMENT_ENTRY_LEN: usize = 64;

pub fn write(w: &mut ByteWriter, seg: &Segment) {
    w.write_le_u64(seg.start);
    w.write_le_u64(seg.end);
    w.write_u8(seg.predictor_type.tag());
    w.write_bytes(&[0u8; 3]);
    w.write_le_f64(seg.mean);
    w.write_le_f64(seg.slope);
    w.write_le_f64(seg.intercept);
    w.write_le_f64(seg.q);
    w.write_le_f64(seg.seed_value);
    w.write_u8(seg.patt.tag());
    w.write_u8(seg.sal);
    w.write_bytes(&[0u8; 2]);
}

/// Parses one entry without yet checking it against its neighbors; the caller
/// (`reader::read_segment_table`) is responsible for the cross-entry coverage
/// checks (`start_idx[0] == 0`, `start_idx[k] == end_idx[k-1]`, ...).
pub fn read_entry(r: &mut ByteReader) -> Result<Segment, CodecError> {
    let start = r.read_le_u64().ok_or(CodecError::TruncatedSegmentTable)?;
    let end = r.read_le_u64().ok_or(CodecError::TruncatedSegmentTable)?;
    if end <= start {
        return Err(CodecError::CoverageMismatch);
    }

    let predictor_tag = r.read_u8().ok_or(CodecError::TruncatedSegmentTable)?;
    let predictor_type = PredictorType::from_tag(predictor_tag)
        .ok_or(CodecError::InconsistentCounts("unknown predictor_type tag"))?;
    r.skip(3).ok_or(CodecError::TruncatedSegmentTable)?;

    let mean = r.read_le_f64().ok_or(CodecError::TruncatedSegmentTable)?;
    let slope = r.read_le_f64().ok_or(CodecError::TruncatedSegmentTable)?;
    let intercept = r.read_le_f64().ok_or(CodecError::TruncatedSegmentTable)?;
    let q = r.read_le_f64().ok_or(CodecError::TruncatedSegmentTable)?;
    let seed_value = r.read_le_f64().ok_or(CodecError::TruncatedSegmentTable)?;

    for value in [mean, slope, intercept, q, seed_value] {
        if !value.is_finite() {
            return Err(CodecError::InconsistentCounts(
                "segment table field is not finite",
            ));
        }
    }
    if !(q > 0.0) {
        return Err(CodecError::InconsistentCounts("Q must be > 0"));
    }

    let patt_tag = r.read_u8().ok_or(CodecError::TruncatedSegmentTable)?;
    let patt = Pattern::from_tag(patt_tag).ok_or(CodecError::InconsistentCounts("unknown patt tag"))?;

    let sal = r.read_u8().ok_or(CodecError::TruncatedSegmentTable)?;
    if sal > 2 {
        return Err(CodecError::InconsistentCounts("sal must be 0..=2"));
    }

    r.skip(2).ok_or(CodecError::TruncatedSegmentTable)?;

    let len = (end - start) as usize;
    let energy = 0.0; // recomputed by the caller once residuals are decoded, if at all.

    Ok(Segment {
        start,
        end,
        predictor_type,
        mean,
        slope,
        intercept,
        seed_value,
        q,
        residuals: Vec::with_capacity(len),
        patt,
        sal,
        energy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_segment() -> Segment {
        Segment {
            start: 0,
            end: 10,
            predictor_type: PredictorType::Linear,
            mean: 1.5,
            slope: 0.25,
            intercept: 1.0,
            seed_value: 1.0,
            q: 0.01,
            residuals: vec![0; 10],
            patt: Pattern::Trend,
            sal: 2,
            energy: 12.3,
        }
    }

    #[test]
    fn entry_round_trips_fixed_fields() {
        let seg = sample_segment();
        let mut w = ByteWriter::new();
        write(&mut w, &seg);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), SEGMENT_ENTRY_LEN);

        let mut r = ByteReader::new(&bytes);
        let parsed = read_entry(&mut r).unwrap();
        assert_eq!(parsed.start, seg.start);
        assert_eq!(parsed.end, seg.end);
        assert_eq!(parsed.predictor_type, seg.predictor_type);
        assert_eq!(parsed.mean, seg.mean);
        assert_eq!(parsed.slope, seg.slope);
        assert_eq!(parsed.intercept, seg.intercept);
        assert_eq!(parsed.q, seg.q);
        assert_eq!(parsed.seed_value, seg.seed_value);
        assert_eq!(parsed.patt, seg.patt);
        assert_eq!(parsed.sal, seg.sal);
    }

    #[test]
    fn rejects_end_not_greater_than_start() {
        let mut w = ByteWriter::new();
        w.write_le_u64(10);
        w.write_le_u64(10);
        w.write_bytes(&[0u8; SEGMENT_ENTRY_LEN - 16]);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(read_entry(&mut r), Err(CodecError::CoverageMismatch)));
    }

    #[test]
    fn rejects_unknown_predictor_tag() {
        let mut seg = sample_segment();
        seg.predictor_type = PredictorType::Mean;
        let mut w = ByteWriter::new();
        write(&mut w, &seg);
        let mut bytes = w.into_bytes();
        bytes[16] = 9;
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            read_entry(&mut r),
            Err(CodecError::InconsistentCounts(_))
        ));
    }

    #[test]
    fn rejects_non_finite_q() {
        let mut seg = sample_segment();
        seg.q = f64::NAN;
        let mut w = ByteWriter::new();
        write(&mut w, &seg);
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert!(matches!(
            read_entry(&mut r),
            Err(CodecError::InconsistentCounts(_))
        ));
    }
}
