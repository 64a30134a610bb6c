//! The `codec` module is the public entry point (C8): `encode` turns a
//! `TimeSeries` into a container buffer by segmenting, fitting, and
//! classifying each window; `decode` turns a container buffer back into a
//! `TimeSeries` by reconstructing each segment's predictor and dequantizing
//! its residuals. This mirrors the shape of `flac::decoder::Decoder::decode_frame`
//! gluing frame-header parsing to per-subframe reconstruction, but for the
//! whole series at once rather than one block at a time.

use tracing::debug;

use crate::classifier;
use crate::config::EncodeConfig;
use crate::container;
use crate::error::CodecError;
use crate::predictors;
use crate::segmenter;
use crate::timeseries::{Segment, TimeSeries};

/// Encodes `ts` into a container buffer using `cfg`.
///
/// Validates the input and the configuration before doing any work: every
/// sample must be finite, `dt` must be strictly positive, and `cfg` must
/// satisfy its own internal invariants.
pub fn encode(ts: &TimeSeries, cfg: &EncodeConfig) -> Result<Vec<u8>, CodecError> {
    cfg.validate().map_err(CodecError::InvalidInput)?;

    if ts.is_empty() {
        return Err(CodecError::InvalidInput("series must contain at least one sample"));
    }
    if !(ts.dt > 0.0) {
        return Err(CodecError::InvalidInput("dt must be > 0"));
    }
    if ts.values.iter().any(|v| !v.is_finite()) {
        return Err(CodecError::InvalidInput("all samples must be finite"));
    }

    let spans = segmenter::segment(&ts.values, cfg)?;
    debug!(n_points = ts.values.len(), n_segments = spans.len(), "segmented series");

    let mut segments = Vec::with_capacity(spans.len());
    for span in spans {
        let window = &ts.values[span.start..span.end];
        let input = classifier::classifier_input(window, span.fit.params.predictor_type, span.fit.params.slope);
        let patt = classifier::classify_pattern(&input, cfg);
        let sal = classifier::classify_salience(&input, cfg);

        segments.push(Segment {
            start: span.start as u64,
            end: span.end as u64,
            predictor_type: span.fit.params.predictor_type,
            mean: span.fit.params.mean,
            slope: span.fit.params.slope,
            intercept: span.fit.params.intercept,
            seed_value: span.fit.params.seed_value,
            q: span.fit.q,
            residuals: span.fit.quantized_residuals,
            patt,
            sal,
            energy: input.energy,
        });
    }

    container::write(ts.dt, &ts.t0, &ts.unit, ts.values.len() as u64, &segments, cfg)
}

/// Decodes a container buffer back into a `TimeSeries`.
pub fn decode(bytes: &[u8]) -> Result<TimeSeries, CodecError> {
    let parsed = container::read(bytes)?;

    let mut values = Vec::with_capacity(parsed.n_points as usize);
    for seg in &parsed.segments {
        let len = seg.len() as usize;
        let x_hat = predictors::reconstruct(
            &predictors::PredictorParams {
                predictor_type: seg.predictor_type,
                mean: seg.mean,
                slope: seg.slope,
                intercept: seg.intercept,
                seed_value: seg.seed_value,
            },
            len,
        );
        if seg.residuals.len() != len {
            return Err(CodecError::InconsistentCounts(
                "segment residual count does not match its declared length",
            ));
        }
        for (predicted, &r) in x_hat.iter().zip(seg.residuals.iter()) {
            values.push(predicted + r as f64 * seg.q);
        }
    }

    debug!(n_points = values.len(), n_segments = parsed.segments.len(), "decoded container");

    Ok(TimeSeries::new(values, parsed.dt, parsed.t0, parsed.unit))
}
