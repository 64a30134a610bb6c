//! The `timeseries` module defines the in-memory data model shared by encode and decode.

use std::fmt;

/// A timestamp or numeric origin, opaque to the codec. Round-trips verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum TimeOrigin {
    Text(String),
    Number(f64),
}

impl fmt::Display for TimeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimeOrigin::Text(s) => write!(f, "{}", s),
            TimeOrigin::Number(n) => write!(f, "{}", n),
        }
    }
}

/// An ordered sequence of samples plus metadata the codec never interprets.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    pub values: Vec<f64>,
    pub dt: f64,
    pub t0: TimeOrigin,
    pub unit: String,
}

impl TimeSeries {
    pub fn new(values: Vec<f64>, dt: f64, t0: TimeOrigin, unit: String) -> Self {
        TimeSeries { values, dt, t0, unit }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The closed set of parametric models a segment can be fit with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PredictorType {
    Mean = 0,
    Linear = 1,
    RandomWalk = 2,
}

impl PredictorType {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PredictorType::Mean),
            1 => Some(PredictorType::Linear),
            2 => Some(PredictorType::RandomWalk),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Qualitative shape label assigned by the classifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    Flat = 0,
    Trend = 1,
    Oscillation = 2,
    Noisy = 3,
}

impl Pattern {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Pattern::Flat),
            1 => Some(Pattern::Trend),
            2 => Some(Pattern::Oscillation),
            3 => Some(Pattern::Noisy),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// A contiguous, half-open index range over `values`, modeled by one predictor.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: u64,
    pub end: u64,
    pub predictor_type: PredictorType,
    pub mean: f64,
    pub slope: f64,
    pub intercept: f64,
    pub seed_value: f64,
    /// Strictly positive quantization step.
    pub q: f64,
    /// One quantized residual per sample in `[start, end)`.
    pub residuals: Vec<i64>,
    pub patt: Pattern,
    /// Energetic prominence, `0..=2`.
    pub sal: u8,
    /// Sum of squared demeaned values over the segment.
    pub energy: f64,
}

impl Segment {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }
}
