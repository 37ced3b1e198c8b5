//! Signal processing over telemetry windows.
//!
//! - [`downsample`] - min/max envelope decimation that keeps spikes visible
//! - [`statistics`] - histograms and descriptive statistics
//! - [`threshold`] - runs of samples above a threshold
//!
//! Everything here is a pure function of its inputs. Memoisation lives in
//! [`crate::cache`].

pub mod downsample;
pub mod statistics;
pub mod threshold;

pub use downsample::{downsample, downsample_indices, max_output_len};
pub use statistics::{
    channel_values, histogram, stats, HistogramBin, Stats, DEFAULT_HISTOGRAM_BINS,
};
pub use threshold::{exceedances, Excursion, ThresholdReport};
