//! The `selector` module implements `auto` predictor selection (C5): fit all
//! three predictors to a candidate window and keep the one with lowest
//! post-decode MSE, breaking ties by a fixed priority order.

use crate::fitter::{self, FitResult};
use crate::timeseries::PredictorType;

/// Priority order used to break exact `post_mse` ties: earlier entries win.
const TIE_BREAK_ORDER: [PredictorType; 3] = [
    PredictorType::Linear,
    PredictorType::Mean,
    PredictorType::RandomWalk,
];

/// Fits all three predictors to `x` and returns the one with the lowest
/// post-decode MSE, consulting `TIE_BREAK_ORDER` on exact ties.
pub fn select_auto(x: &[f64], c_q: f64, q_min: f64) -> FitResult {
    let candidates = [
        fitter::fit_segment(PredictorType::Mean, x, c_q, q_min),
        fitter::fit_segment(PredictorType::Linear, x, c_q, q_min),
        fitter::fit_segment(PredictorType::RandomWalk, x, c_q, q_min),
    ];

    let mut best_idx = 0usize;
    for &pt in TIE_BREAK_ORDER.iter() {
        let idx = predictor_index(pt);
        if candidates[idx].post_mse < candidates[best_idx].post_mse {
            best_idx = idx;
        }
    }
    // Walk again, this time preferring the tie-break order on exact ties: the
    // loop above already finds the global minimum, but two different indices
    // can share that minimum exactly, so resolve ties explicitly.
    let min_mse = candidates[best_idx].post_mse;
    for &pt in TIE_BREAK_ORDER.iter() {
        let idx = predictor_index(pt);
        if candidates[idx].post_mse == min_mse {
            return candidates[idx].clone();
        }
    }
    candidates[best_idx].clone()
}

fn predictor_index(pt: PredictorType) -> usize {
    match pt {
        PredictorType::Mean => 0,
        PredictorType::Linear => 1,
        PredictorType::RandomWalk => 2,
    }
}
