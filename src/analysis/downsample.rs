//! Min/max envelope downsampling.
//!
//! The visible window is cut into equal-width time buckets. Every non-empty
//! bucket keeps its first and last sample plus, for each requested channel,
//! the samples carrying that channel's minimum and maximum. Peaks and troughs
//! therefore survive no matter how far the series is reduced, and the output
//! never holds more than `bucket_count * (2 * channels.len() + 2)` samples.

use std::ops::Range;

use crate::telemetry::{ChannelId, Sample, TimeWindow};

/// Upper bound on the samples [`downsample`] can return
pub fn max_output_len(bucket_count: usize, channel_count: usize) -> usize {
    bucket_count.saturating_mul(channel_count.saturating_mul(2).saturating_add(2))
}

/// Downsample `samples` to the envelope of `bucket_count` buckets spanning
/// `[window_start, window_end]`.
///
/// An empty input or a zero bucket count returns the input unchanged.
/// Samples outside the window are dropped. The result is a subsequence of
/// the input, ordered by timestamp.
pub fn downsample(
    samples: &[Sample],
    bucket_count: usize,
    channels: &[ChannelId],
    window_start: f64,
    window_end: f64,
) -> Vec<Sample> {
    if samples.is_empty() || bucket_count == 0 {
        return samples.to_vec();
    }

    downsample_indices(samples, bucket_count, channels, window_start, window_end)
        .into_iter()
        .map(|i| samples[i])
        .collect()
}

/// Same selection as [`downsample`], returned as positions into `samples`.
///
/// Positions are the identity of a sample: two samples with equal values
/// and timestamps are still distinct entries.
pub fn downsample_indices(
    samples: &[Sample],
    bucket_count: usize,
    channels: &[ChannelId],
    window_start: f64,
    window_end: f64,
) -> Vec<usize> {
    if samples.is_empty() || bucket_count == 0 {
        return (0..samples.len()).collect();
    }

    let window = TimeWindow::new(window_start, window_end);
    let visible = window.range(samples);
    if visible.is_empty() {
        return vec![];
    }

    let span = if window.span() == 0.0 {
        1.0
    } else {
        window.span()
    };

    let capacity = max_output_len(bucket_count, channels.len()).min(visible.len());
    let mut selected = Vec::with_capacity(capacity);

    // Timestamps are ordered, so each bucket is a contiguous run of positions
    let mut run_start = visible.start;
    let mut run_bucket =
        bucket_index(samples[run_start].timestamp, window_start, span, bucket_count);
    for i in visible.start + 1..visible.end {
        let bucket = bucket_index(samples[i].timestamp, window_start, span, bucket_count);
        if bucket != run_bucket {
            push_envelope(samples, run_start..i, channels, &mut selected);
            run_start = i;
            run_bucket = bucket;
        }
    }
    push_envelope(samples, run_start..visible.end, channels, &mut selected);

    selected.sort_by(|&a, &b| {
        samples[a]
            .timestamp
            .total_cmp(&samples[b].timestamp)
            .then(a.cmp(&b))
    });
    selected
}

/// Linear bucket position of `timestamp`, clamped to the valid range
#[inline]
fn bucket_index(timestamp: f64, window_start: f64, span: f64, bucket_count: usize) -> usize {
    let position = ((timestamp - window_start) / span * bucket_count as f64).floor();
    if position.is_nan() || position <= 0.0 {
        0
    } else {
        (position as usize).min(bucket_count - 1)
    }
}

/// Append the envelope of one non-empty bucket
fn push_envelope(
    samples: &[Sample],
    bucket: Range<usize>,
    channels: &[ChannelId],
    selected: &mut Vec<usize>,
) {
    let first = bucket.start;
    let last = bucket.end - 1;
    let offset = selected.len();

    selected.push(first);
    if last != first {
        selected.push(last);
    }

    for &channel in channels {
        let Some((min, max)) = extrema(samples, bucket.clone(), channel) else {
            // All missing in this bucket
            continue;
        };
        for i in [min, max] {
            if !selected[offset..].contains(&i) {
                selected.push(i);
            }
        }
    }
}

/// Positions of the first minimum and first maximum of a channel
fn extrema(samples: &[Sample], bucket: Range<usize>, channel: ChannelId) -> Option<(usize, usize)> {
    let mut min: Option<(usize, f64)> = None;
    let mut max: Option<(usize, f64)> = None;

    for i in bucket {
        let Some(value) = samples[i].get(channel) else {
            continue;
        };
        if min.map_or(true, |(_, m)| value < m) {
            min = Some((i, value));
        }
        if max.map_or(true, |(_, m)| value > m) {
            max = Some((i, value));
        }
    }

    Some((min?.0, max?.0))
}
