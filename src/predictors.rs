//! The `predictors` module fits and reconstructs from the three closed parametric
//! models. The shape mirrors `flac::decoder`'s fixed/LPC predictors: a `fit`
//! pass that derives a handful of scalar parameters, and a `reconstruct` pass
//! that walks the buffer applying them — except here both directions are
//! explicit functions rather than bitstream-driven, since the container stores
//! parameters directly rather than coefficients to re-derive.

use crate::timeseries::PredictorType;

/// Parameters fit for one segment, regardless of which predictor produced them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PredictorParams {
    pub predictor_type: PredictorType,
    pub mean: f64,
    pub slope: f64,
    pub intercept: f64,
    pub seed_value: f64,
}

/// Fits `predictor_type` against `x` and returns predictions `x̂` alongside params.
pub fn fit(predictor_type: PredictorType, x: &[f64]) -> (PredictorParams, Vec<f64>) {
    match predictor_type {
        PredictorType::Mean => fit_mean(x),
        PredictorType::Linear => fit_linear(x),
        PredictorType::RandomWalk => fit_random_walk(x),
    }
}

/// Reconstructs `L` predicted values from already-fit params, without needing
/// the original samples. Used by decode, where only `params` survive.
pub fn reconstruct(params: &PredictorParams, len: usize) -> Vec<f64> {
    match params.predictor_type {
        PredictorType::Mean => vec![params.mean; len],
        PredictorType::Linear => (0..len)
            .map(|i| params.intercept + params.slope * i as f64)
            .collect(),
        PredictorType::RandomWalk => {
            // One-step hold: x̂_0 = seed, x̂_i = x̂_{i-1}.
            vec![params.seed_value; len]
        }
    }
}

fn fit_mean(x: &[f64]) -> (PredictorParams, Vec<f64>) {
    let l = x.len();
    let mean = x.iter().sum::<f64>() / l as f64;
    let params = PredictorParams {
        predictor_type: PredictorType::Mean,
        mean,
        slope: 0.0,
        intercept: mean,
        seed_value: mean,
    };
    (params, vec![mean; l])
}

fn fit_linear(x: &[f64]) -> (PredictorParams, Vec<f64>) {
    let l = x.len();
    let (alpha, beta) = ols_fit(x);
    let fitted: Vec<f64> = (0..l).map(|i| alpha + beta * i as f64).collect();
    let mean = fitted.iter().sum::<f64>() / l as f64;
    let params = PredictorParams {
        predictor_type: PredictorType::Linear,
        mean,
        slope: beta,
        intercept: alpha,
        seed_value: alpha,
    };
    (params, fitted)
}

fn fit_random_walk(x: &[f64]) -> (PredictorParams, Vec<f64>) {
    let l = x.len();
    let seed = x[0];
    let mean = x.iter().sum::<f64>() / l as f64;
    let slope = if l > 1 {
        (x[l - 1] - x[0]) / (l - 1) as f64
    } else {
        0.0
    };
    // Reconstruction is a one-step hold of the previous reconstructed value,
    // which for a segment fit from scratch is simply the seed repeated: the
    // actual per-step deltas become residuals, not part of x̂.
    let predicted = vec![seed; l];
    let params = PredictorParams {
        predictor_type: PredictorType::RandomWalk,
        mean,
        slope,
        intercept: seed,
        seed_value: seed,
    };
    (params, predicted)
}

/// Ordinary least squares fit of `x_i = alpha + beta * i` over `i in [0, x.len())`.
fn ols_fit(x: &[f64]) -> (f64, f64) {
    let l = x.len() as f64;
    if x.len() < 2 {
        return (x.first().copied().unwrap_or(0.0), 0.0);
    }

    let mean_i = (l - 1.0) / 2.0;
    let mean_x = x.iter().sum::<f64>() / l;

    let mut cov = 0.0;
    let mut var_i = 0.0;
    for (i, &xi) in x.iter().enumerate() {
        let di = i as f64 - mean_i;
        cov += di * (xi - mean_x);
        var_i += di * di;
    }

    let beta = if var_i > 0.0 { cov / var_i } else { 0.0 };
    let alpha = mean_x - beta * mean_i;
    (alpha, beta)
}
