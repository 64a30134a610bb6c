//! The `config` module defines the immutable configuration consumed by encode.
//!
//! There is no global defaults state: every threshold the pipeline needs is a
//! field here, constructed once per call and passed down by value/reference.

/// Segmentation strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentMode {
    /// Split into consecutive fixed-length windows.
    Fixed,
    /// Grow each segment greedily while post-decode MSE stays under threshold.
    Adaptive,
}

/// Predictor selection strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PredictorChoice {
    Mean,
    Linear,
    RandomWalk,
    /// Fit all three and pick the one with lowest post-decode MSE.
    Auto,
}

/// Residual entropy coding format.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResidualCoding {
    /// `L` little-endian `i32` values per segment.
    Raw,
    /// `L` ZigZag+varint encoded values per segment.
    Varint,
}

/// Immutable configuration for a single `encode` call.
///
/// Construct via `EncodeConfig::default()` and override individual fields, or
/// build one from scratch — there is no hidden global state either way.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeConfig {
    pub segment_mode: SegmentMode,
    pub min_segment_length: u32,
    pub max_segment_length: u32,
    pub mse_threshold: f64,
    pub predictor: PredictorChoice,
    pub residual_coding: ResidualCoding,
    /// Floor on the quantization step `Q`.
    pub q_min: f64,
    /// Multiplier applied to residual stddev when deriving `Q`.
    pub c_q: f64,

    /// Classifier thresholds (§4.6). These are ordinary fields, not module-level
    /// constants, so an encode is fully reproducible from `(ts, config)` alone.
    pub e_flat: f64,
    pub s_flat: f64,
    pub s_trend: f64,
    pub c_osc: f64,
    pub e_low: f64,
    pub e_high: f64,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        EncodeConfig {
            segment_mode: SegmentMode::Adaptive,
            min_segment_length: 8,
            max_segment_length: 256,
            mse_threshold: 0.05,
            predictor: PredictorChoice::Auto,
            residual_coding: ResidualCoding::Varint,
            q_min: 1e-6,
            c_q: 0.25,

            e_flat: 0.01,
            s_flat: 0.01,
            s_trend: 0.05,
            c_osc: 0.5,
            e_low: 0.01,
            e_high: 1.0,
        }
    }
}

impl EncodeConfig {
    /// Validates the configuration's own invariants (independent of any series).
    ///
    /// `encode` calls this before touching the input samples.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_segment_length < 1 {
            return Err("min_segment_length must be >= 1");
        }
        if self.max_segment_length < self.min_segment_length {
            return Err("max_segment_length must be >= min_segment_length");
        }
        if !(self.mse_threshold > 0.0) {
            return Err("mse_threshold must be > 0");
        }
        if !(self.q_min > 0.0) {
            return Err("q_min must be > 0");
        }
        if !(self.c_q > 0.0) {
            return Err("c_q must be > 0");
        }
        Ok(())
    }
}
