//! Tests for histograms and descriptive statistics

use dashlog::analysis::{channel_values, histogram, stats, Stats, DEFAULT_HISTOGRAM_BINS};
use dashlog::ChannelId;

use crate::common::synthetic;

// ============================================
// Statistics
// ============================================

#[test]
fn test_stats_known_values() {
    let s = stats(&[10.0, 20.0, 30.0]);
    assert!((s.mean - 20.0).abs() < 1e-9);
    assert!((s.min - 10.0).abs() < 1e-9);
    assert!((s.max - 30.0).abs() < 1e-9);
    assert!((s.std - 8.16).abs() < 0.01);
}

#[test]
fn test_stats_empty() {
    let s = stats(&[]);
    assert_eq!(
        s,
        Stats {
            count: 0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            std: 0.0
        }
    );
}

#[test]
fn test_stats_single_value() {
    let s = stats(&[4.2]);
    assert_eq!(s.count, 1);
    assert!((s.mean - 4.2).abs() < 1e-9);
    assert_eq!(s.std, 0.0);
    assert_eq!(s.range(), 0.0);
}

#[test]
fn test_stats_is_population_not_sample() {
    // Sample-corrected std of [1, 3] would be sqrt(2)
    let s = stats(&[1.0, 3.0]);
    assert!((s.std - 1.0).abs() < 1e-9);
}

// ============================================
// Histogram
// ============================================

#[test]
fn test_histogram_empty() {
    assert!(histogram(&[], 24).is_empty());
}

#[test]
fn test_histogram_constant_values() {
    let bins = histogram(&[5.0, 5.0, 5.0], 3);
    assert_eq!(bins.len(), 3);
    assert_eq!(bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![3, 0, 0]);
    assert!((bins[0].lower - 5.0).abs() < 1e-9);
    assert!((bins[2].upper - 6.0).abs() < 1e-9);
}

#[test]
fn test_histogram_bins_are_contiguous_and_cover_range() {
    let values: Vec<f64> = (0..1000).map(|i| ((i * 37) % 101) as f64 - 20.0).collect();
    let bins = histogram(&values, DEFAULT_HISTOGRAM_BINS);

    assert_eq!(bins.len(), DEFAULT_HISTOGRAM_BINS);
    assert!((bins[0].lower - -20.0).abs() < 1e-9);
    assert!((bins[bins.len() - 1].upper - 80.0).abs() < 1e-9);

    let width = bins[0].width();
    for pair in bins.windows(2) {
        assert!((pair[0].upper - pair[1].lower).abs() < 1e-9);
        assert!((pair[1].width() - width).abs() < 1e-9);
    }

    let total: usize = bins.iter().map(|b| b.count).sum();
    assert_eq!(total, values.len());
}

#[test]
fn test_histogram_ignores_non_finite() {
    let bins = histogram(&[1.0, f64::NAN, 2.0, f64::INFINITY], 2);
    let total: usize = bins.iter().map(|b| b.count).sum();
    assert_eq!(total, 2);
    assert!((bins[1].upper - 2.0).abs() < 1e-9);
}

// ============================================
// Channel extraction
// ============================================

#[test]
fn test_channel_values_skip_missing() {
    let samples = synthetic::drive(500, 11);
    let rpm = channel_values(&samples, ChannelId::Rpm);
    let present = samples
        .iter()
        .filter(|s| s.get(ChannelId::Rpm).is_some())
        .count();

    assert_eq!(rpm.len(), present);
    assert!(rpm.len() < samples.len());
    assert!(rpm.iter().all(|v| *v > 0.0));
}
