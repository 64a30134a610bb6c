//! The `info` module projects a container's header, context, and segment
//! table into read-only summaries, the way `flac::mod::read_stream_info`
//! exposes STREAMINFO without decoding a single frame. None of these
//! functions touch the residual section, so they stay cheap even on a large
//! container.

use crate::container;
use crate::error::CodecError;
use crate::timeseries::{Pattern, PredictorType, TimeOrigin};

/// Top-level metadata, without per-segment detail.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesInfo {
    pub dt: f64,
    pub t0: TimeOrigin,
    pub unit: String,
    pub n_points: u64,
    pub n_segments: usize,
}

/// Reads just `TimeSeriesInfo` from a container buffer.
pub fn read_info(bytes: &[u8]) -> Result<TimeSeriesInfo, CodecError> {
    let parsed = container::read_metadata_only(bytes)?;
    Ok(TimeSeriesInfo {
        dt: parsed.dt,
        t0: parsed.t0,
        unit: parsed.unit,
        n_points: parsed.n_points,
        n_segments: parsed.segments.len(),
    })
}

/// One segment's classification, projected without decoding its residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTag {
    pub index: usize,
    pub start: u64,
    pub end: u64,
    pub predictor: PredictorType,
    pub pattern: Pattern,
    pub salience: u8,
    /// Lower bound on the segment's true energy, `Q^2/3 * len` — the
    /// quantization noise floor guaranteed by the bounded-error invariant.
    /// The exact energy needs the decoded residuals, which this view never
    /// touches.
    pub energy_floor: f64,
}

/// Lists every segment's tag, in order, without decoding any residuals.
pub fn export_tags(bytes: &[u8]) -> Result<Vec<SegmentTag>, CodecError> {
    let parsed = container::read_metadata_only(bytes)?;
    Ok(parsed
        .segments
        .iter()
        .enumerate()
        .map(|(index, seg)| SegmentTag {
            index,
            start: seg.start,
            end: seg.end,
            predictor: seg.predictor_type,
            pattern: seg.patt,
            salience: seg.sal,
            energy_floor: seg.q * seg.q / 3.0 * seg.len() as f64,
        })
        .collect())
}

/// A maximal run of contiguous segments sharing the same pattern tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Motif {
    pub pattern: Pattern,
    pub start_segment: usize,
    pub segment_count: usize,
    pub point_count: u64,
}

/// Aggregate statistics over a container's segment table: what fraction of
/// points fall under each pattern, the salience distribution, and the
/// motifs (maximal contiguous runs of one pattern).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub n_points: u64,
    pub n_segments: usize,
    /// Fraction of points, by pattern (`Flat`, `Trend`, `Oscillation`, `Noisy`).
    pub pattern_fractions: [f64; 4],
    pub salience_min: u8,
    pub salience_max: u8,
    pub salience_mean: f64,
    pub motifs: Vec<Motif>,
}

pub fn export_profile(bytes: &[u8]) -> Result<Profile, CodecError> {
    let parsed = container::read_metadata_only(bytes)?;
    let segments = &parsed.segments;

    let mut points_per_pattern = [0u64; 4];
    let mut sal_min = u8::MAX;
    let mut sal_max = 0u8;
    let mut sal_sum: u64 = 0;

    for seg in segments {
        points_per_pattern[seg.patt.tag() as usize] += seg.len();
        sal_min = sal_min.min(seg.sal);
        sal_max = sal_max.max(seg.sal);
        sal_sum += seg.sal as u64;
    }

    let total = parsed.n_points.max(1) as f64;
    let pattern_fractions = [
        points_per_pattern[0] as f64 / total,
        points_per_pattern[1] as f64 / total,
        points_per_pattern[2] as f64 / total,
        points_per_pattern[3] as f64 / total,
    ];

    let (salience_min, salience_max) = if segments.is_empty() { (0, 0) } else { (sal_min, sal_max) };
    let salience_mean = if segments.is_empty() {
        0.0
    } else {
        sal_sum as f64 / segments.len() as f64
    };

    Ok(Profile {
        n_points: parsed.n_points,
        n_segments: segments.len(),
        pattern_fractions,
        salience_min,
        salience_max,
        salience_mean,
        motifs: motifs_of(segments),
    })
}

fn motifs_of(segments: &[crate::timeseries::Segment]) -> Vec<Motif> {
    let mut motifs = Vec::new();
    let mut i = 0usize;
    while i < segments.len() {
        let pattern = segments[i].patt;
        let start_segment = i;
        let mut point_count = segments[i].len();
        let mut j = i + 1;
        while j < segments.len() && segments[j].patt == pattern {
            point_count += segments[j].len();
            j += 1;
        }
        motifs.push(Motif {
            pattern,
            start_segment,
            segment_count: j - i,
            point_count,
        });
        i = j;
    }
    motifs
}
