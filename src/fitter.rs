//! The `fitter` module turns a fitted predictor into quantized residuals and a
//! post-decode MSE, the way `flac::decoder::decode_residual` turns a partition's
//! Rice parameter into reconstructed samples — except here quantization step is
//! derived from the data (residual stddev) rather than read from the bitstream,
//! since this format picks `Q` at encode time instead of transmitting it as a
//! coefficient.

use crate::predictors::{self, PredictorParams};
use crate::timeseries::PredictorType;

/// The result of fitting one predictor to one candidate window.
#[derive(Clone, Debug, PartialEq)]
pub struct FitResult {
    pub params: PredictorParams,
    pub q: f64,
    pub quantized_residuals: Vec<i64>,
    /// Mean squared error between the input and the post-quantization reconstruction.
    pub post_mse: f64,
}

/// Fits `predictor_type` to `x`, quantizes the residuals with step `Q = max(c_q
/// * stddev(r), q_min)`, and reports the post-decode MSE (§4.3).
pub fn fit_segment(predictor_type: PredictorType, x: &[f64], c_q: f64, q_min: f64) -> FitResult {
    let (params, x_hat) = predictors::fit(predictor_type, x);
    fit_with_prediction(params, x, &x_hat, c_q, q_min)
}

fn fit_with_prediction(
    params: PredictorParams,
    x: &[f64],
    x_hat: &[f64],
    c_q: f64,
    q_min: f64,
) -> FitResult {
    let residuals: Vec<f64> = x.iter().zip(x_hat).map(|(xi, xh)| xi - xh).collect();
    let sigma = population_stddev(&residuals);
    let q = (c_q * sigma).max(q_min);

    let quantized: Vec<i64> = residuals.iter().map(|&r| round_half_to_even(r / q)).collect();

    let mut sq_err_sum = 0.0;
    for (i, &xi) in x.iter().enumerate() {
        let r_tilde = quantized[i] as f64 * q;
        let x_tilde = x_hat[i] + r_tilde;
        let e = xi - x_tilde;
        sq_err_sum += e * e;
    }
    let post_mse = sq_err_sum / x.len() as f64;

    FitResult {
        params,
        q,
        quantized_residuals: quantized,
        post_mse,
    }
}

/// Population standard deviation, single pass via the naive sum/sum-of-squares
/// formula (acceptable per §4.3: "single pass acceptable").
fn population_stddev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.max(0.0).sqrt()
}

/// Rounds half-way cases to the nearest even integer (banker's rounding),
/// matching IEEE 754 `roundTiesToEven` rather than Rust's default `f64::round`
/// (which rounds halves away from zero).
pub fn round_half_to_even(x: f64) -> i64 {
    if !x.is_finite() {
        return 0;
    }
    let floor = x.floor();
    let diff = x - floor;
    let floor_i = floor as i64;

    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}
