//! The `segmenter` module partitions a series into segments (C4), either by
//! fixed-length windows or by greedy MSE-driven growth. Each frozen window is
//! handed straight to the classifier by the caller (`codec::encode`); this
//! module only decides boundaries and the winning fit per boundary.

use crate::config::{EncodeConfig, PredictorChoice, SegmentMode};
use crate::error::CodecError;
use crate::fitter::{self, FitResult};
use crate::selector;
use crate::timeseries::PredictorType;

/// One frozen window: its bounds and the fit chosen for it.
pub struct SegmentSpan {
    pub start: usize,
    pub end: usize,
    pub fit: FitResult,
}

/// Fits `x[start..end)` with whichever predictor `choice` names, running all
/// three and selecting by post-decode MSE for `Auto`.
fn fit_window(x: &[f64], choice: PredictorChoice, c_q: f64, q_min: f64) -> FitResult {
    match choice {
        PredictorChoice::Mean => fitter::fit_segment(PredictorType::Mean, x, c_q, q_min),
        PredictorChoice::Linear => fitter::fit_segment(PredictorType::Linear, x, c_q, q_min),
        PredictorChoice::RandomWalk => fitter::fit_segment(PredictorType::RandomWalk, x, c_q, q_min),
        PredictorChoice::Auto => selector::select_auto(x, c_q, q_min),
    }
}

/// Partitions `values` into segments per `cfg.segment_mode`. `values` must be
/// non-empty; callers validate that before calling (§4.4: `EmptyInput`).
pub fn segment(values: &[f64], cfg: &EncodeConfig) -> Result<Vec<SegmentSpan>, CodecError> {
    if values.len() == 1 {
        // §4.4 edge case: a single-point series always gets a one-point
        // segment with the mean predictor, regardless of the configured
        // predictor choice — there is no meaningful trend or walk to fit.
        let fit = fitter::fit_segment(PredictorType::Mean, values, cfg.c_q, cfg.q_min);
        return Ok(vec![SegmentSpan { start: 0, end: 1, fit }]);
    }

    match cfg.segment_mode {
        SegmentMode::Fixed => Ok(segment_fixed(values, cfg)),
        SegmentMode::Adaptive => Ok(segment_adaptive(values, cfg)),
    }
}

fn segment_fixed(values: &[f64], cfg: &EncodeConfig) -> Vec<SegmentSpan> {
    let n = values.len();
    let l_fix = (cfg.min_segment_length.max(1) as usize).min(cfg.max_segment_length as usize);
    let mut spans = Vec::new();
    let mut start = 0;
    while start < n {
        let end = (start + l_fix).min(n);
        let fit = fit_window(&values[start..end], cfg.predictor, cfg.c_q, cfg.q_min);
        spans.push(SegmentSpan { start, end, fit });
        start = end;
    }
    spans
}

fn segment_adaptive(values: &[f64], cfg: &EncodeConfig) -> Vec<SegmentSpan> {
    let n = values.len();
    let min_len = cfg.min_segment_length as usize;
    let max_len = cfg.max_segment_length as usize;
    let mut spans = Vec::new();
    let mut start = 0usize;

    while start < n {
        let remaining = n - start;
        if remaining < min_len {
            // Tail shorter than min_len: emit as a final short segment (§4.4).
            let end = n;
            let fit = fit_window(&values[start..end], cfg.predictor, cfg.c_q, cfg.q_min);
            spans.push(SegmentSpan { start, end, fit });
            break;
        }

        let mut len = min_len;
        let mut best_fit = fit_window(&values[start..start + len], cfg.predictor, cfg.c_q, cfg.q_min);
        let mut best_len = len;

        loop {
            let meets_threshold = best_fit.post_mse <= cfg.mse_threshold;
            let can_grow = len < max_len && start + len + 1 <= n;
            if !(meets_threshold && can_grow) {
                break;
            }
            let candidate = fit_window(&values[start..start + len + 1], cfg.predictor, cfg.c_q, cfg.q_min);
            if candidate.post_mse > cfg.mse_threshold {
                // Growing past this length fails the threshold; freeze at the
                // last length that satisfied it (§4.4 step 3).
                break;
            }
            len += 1;
            best_fit = candidate;
            best_len = len;
        }

        // If the minimum-length window itself never met the threshold, freeze
        // at min_len anyway to guarantee progress (§4.4 step 3).
        let end = start + best_len;
        spans.push(SegmentSpan {
            start,
            end,
            fit: best_fit,
        });
        start = end;
    }

    spans
}
