//! Statistical summaries over a window of channel values.
//!
//! Provides fixed-bin histograms and descriptive statistics. Non-finite
//! values are skipped before any aggregation.

use serde::{Deserialize, Serialize};

use crate::telemetry::{ChannelId, Sample};

/// Bin count used when a caller asks for zero bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 24;

// ============================================================================
// Histogram
// ============================================================================

/// One equal-width bin covering `[lower, upper)`.
///
/// The last bin of a histogram also holds values equal to its upper edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn label(&self) -> String {
        format!("[{:.1}, {:.1})", self.lower, self.upper)
    }
}

/// Build a histogram of `bin_count` equal-width bins spanning the value range.
///
/// Empty input gives an empty histogram. When every value is equal the span
/// is forced to 1 so no bin has zero width.
pub fn histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    let bin_count = if bin_count == 0 {
        DEFAULT_HISTOGRAM_BINS
    } else {
        bin_count
    };

    let Some((v_min, v_max)) = finite_range(values) else {
        return vec![];
    };

    let width = if v_max - v_min == 0.0 {
        1.0
    } else {
        v_max - v_min
    };

    let mut counts = vec![0usize; bin_count];
    for v in finite(values) {
        counts[bin_index(v, v_min, width, bin_count)] += 1;
    }

    let step = width / bin_count as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: v_min + i as f64 * step,
            upper: v_min + (i + 1) as f64 * step,
            count,
        })
        .collect()
}

#[inline]
fn bin_index(value: f64, v_min: f64, width: f64, bin_count: usize) -> usize {
    let position = ((value - v_min) / width * bin_count as f64).floor();
    if position <= 0.0 {
        0
    } else {
        (position as usize).min(bin_count - 1)
    }
}

// ============================================================================
// Descriptive statistics
// ============================================================================

/// Summary of one channel over a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of values that were aggregated
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std: f64,
}

impl Stats {
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Compute mean, extrema and population standard deviation.
///
/// An empty input (or one with no finite values) gives all zeros.
pub fn stats(values: &[f64]) -> Stats {
    let Some((min, max)) = finite_range(values) else {
        return Stats::default();
    };

    let (count, sum) = finite(values).fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
    let n = count as f64;
    let mean = sum / n;

    // Two-pass variance, divided by n rather than n - 1
    let variance = finite(values).map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Stats {
        count,
        mean,
        min,
        max,
        std: variance.sqrt(),
    }
}

/// Non-missing values of one channel, in sample order
pub fn channel_values(samples: &[Sample], channel: ChannelId) -> Vec<f64> {
    samples.iter().filter_map(|s| s.get(channel)).collect()
}

fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| v.is_finite())
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    finite(values).fold(None, |range, v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
