//! Semantic lossy codec for univariate, uniformly-sampled numeric time series.
//!
//! A series is segmented into runs that each fit one of three closed
//! predictor models (mean, linear trend, random-walk hold), the residual
//! between prediction and actual sample is scalar-quantized and entropy
//! coded, and every segment is tagged with a coarse shape (`Pattern`) and
//! salience level for cheap downstream filtering without a full decode.
//!
//! [`codec::encode`] and [`codec::decode`] are the two operations most
//! callers need; [`info`] exposes read-only projections (point count,
//! per-segment tags, a shape profile) that never touch the residual section.

pub mod classifier;
pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod fitter;
pub mod info;
pub mod predictors;
pub mod segmenter;
pub mod selector;
pub mod timeseries;
pub mod varint;

pub use codec::{decode, encode};
pub use config::{EncodeConfig, PredictorChoice, ResidualCoding, SegmentMode};
pub use error::CodecError;
pub use info::{export_profile, export_tags, read_info, Motif, Profile, SegmentTag, TimeSeriesInfo};
pub use timeseries::{Pattern, PredictorType, Segment, TimeOrigin, TimeSeries};
