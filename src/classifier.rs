//! The `classifier` module computes the pattern tag and salience level for a
//! fitted segment (C6), reading thresholds from the caller's `EncodeConfig`
//! rather than module-level constants (Design Note: "Global mutable state in
//! tools" — the source hoists these into config precisely to keep encodes
//! reproducible and testable).

use crate::config::EncodeConfig;
use crate::predictors;
use crate::timeseries::{Pattern, PredictorType};

/// Per-segment statistics the classifier needs, independent of which predictor
/// was actually used to encode the segment.
pub struct ClassifierInput {
    pub energy: f64,
    pub slope_mag: f64,
    pub sign_changes: usize,
    pub len: usize,
}

/// Computes `energy`, `slope_mag` (refit via OLS if the segment's own predictor
/// isn't linear), and the sign-change count of first differences.
pub fn classifier_input(x: &[f64], predictor_type: PredictorType, fitted_slope: f64) -> ClassifierInput {
    let l = x.len();
    let mean = x.iter().sum::<f64>() / l as f64;
    let energy = x.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>();

    let slope_mag = if predictor_type == PredictorType::Linear {
        fitted_slope.abs()
    } else {
        let (params, _) = predictors::fit(PredictorType::Linear, x);
        params.slope.abs()
    };

    let mut sign_changes = 0usize;
    if l >= 3 {
        let diffs: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        for pair in diffs.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a != 0.0 && b != 0.0 && (a > 0.0) != (b > 0.0) {
                sign_changes += 1;
            }
        }
    }

    ClassifierInput {
        energy,
        slope_mag,
        sign_changes,
        len: l,
    }
}

/// Assigns the pattern tag per §4.6.
pub fn classify_pattern(input: &ClassifierInput, cfg: &EncodeConfig) -> Pattern {
    let l = input.len.max(1) as f64;
    let energy_per_point = input.energy / l;

    if energy_per_point < cfg.e_flat && input.slope_mag < cfg.s_flat {
        return Pattern::Flat;
    }
    if input.slope_mag >= cfg.s_trend {
        return Pattern::Trend;
    }
    let osc_threshold = cfg.c_osc * (input.len.saturating_sub(1)) as f64;
    if (input.sign_changes as f64) > osc_threshold {
        return Pattern::Oscillation;
    }
    Pattern::Noisy
}

/// Assigns the salience level per §4.6.
pub fn classify_salience(input: &ClassifierInput, cfg: &EncodeConfig) -> u8 {
    let l = input.len.max(1) as f64;
    let energy_per_point = input.energy / l;

    if energy_per_point < cfg.e_low {
        0
    } else if energy_per_point >= cfg.e_high {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_is_tagged_flat_and_low_salience() {
        let cfg = EncodeConfig::default();
        let x = vec![0.001; 50];
        let input = classifier_input(&x, PredictorType::Mean, 0.0);
        assert_eq!(classify_pattern(&input, &cfg), Pattern::Flat);
        assert_eq!(classify_salience(&input, &cfg), 0);
    }

    #[test]
    fn strong_linear_trend_is_tagged_trend() {
        let cfg = EncodeConfig::default();
        let x: Vec<f64> = (0..50).map(|i| 0.2 * i as f64).collect();
        let input = classifier_input(&x, PredictorType::Linear, 0.2);
        assert_eq!(classify_pattern(&input, &cfg), Pattern::Trend);
    }

    #[test]
    fn oscillating_series_is_tagged_oscillation() {
        let cfg = EncodeConfig::default();
        let x: Vec<f64> = (0..60).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let input = classifier_input(&x, PredictorType::Mean, 0.0);
        assert_eq!(classify_pattern(&input, &cfg), Pattern::Oscillation);
    }

    #[test]
    fn high_energy_segment_is_salient() {
        let cfg = EncodeConfig::default();
        let x: Vec<f64> = (0..50).map(|i| 10.0 * (i as f64).sin()).collect();
        let input = classifier_input(&x, PredictorType::Mean, 0.0);
        assert_eq!(classify_salience(&input, &cfg), 2);
    }
}
