//! Tests for dashboard view recomputation

use dashlog::analysis::{downsample, histogram, stats};
use dashlog::settings::DashboardSettings;
use dashlog::{ChannelId, DashboardView, Sample, TimeWindow};

use crate::common::synthetic;

fn view_with(samples: Vec<Sample>) -> DashboardView {
    let settings = DashboardSettings {
        bucket_count: 40,
        histogram_bins: 12,
        channels: vec![ChannelId::Rpm, ChannelId::Speed],
        threshold: Some(7000.0),
        ..Default::default()
    };
    DashboardView::new(samples, &settings)
}

#[test]
fn test_visible_matches_core_downsample() {
    let samples = synthetic::drive(4000, 8);
    let mut view = view_with(samples.clone());
    view.set_window(TimeWindow::new(30.0, 90.0));

    let expected = downsample(&samples, 40, &[ChannelId::Rpm, ChannelId::Speed], 30.0, 90.0);
    assert_eq!(view.visible(), expected.as_slice());
}

#[test]
fn test_every_key_part_invalidates() {
    let mut view = view_with(synthetic::drive(1000, 4));
    view.visible();
    view.visible();
    assert_eq!(view.cache_stats().misses, 1);

    view.zoom(0.5, view.window().center());
    view.visible();
    assert_eq!(view.cache_stats().misses, 2);

    view.set_channels(vec![ChannelId::Speed]);
    view.visible();
    assert_eq!(view.cache_stats().misses, 3);

    view.set_bucket_count(7);
    view.visible();
    assert_eq!(view.cache_stats().misses, 4);

    view.extend_samples(vec![Sample::new(1.0e6)]);
    view.visible();
    assert_eq!(view.cache_stats().misses, 5);

    // Histogram settings do not affect the downsampled view
    view.set_histogram_bins(3);
    view.visible();
    assert_eq!(view.cache_stats().misses, 5);
}

#[test]
fn test_zero_buckets_shows_raw_window() {
    let samples = synthetic::drive(500, 6);
    let mut view = view_with(samples);
    view.set_window(TimeWindow::new(5.0, 10.0));
    view.set_bucket_count(0);

    let raw = view.window_samples().to_vec();
    assert_eq!(view.visible(), raw.as_slice());
}

#[test]
fn test_histogram_and_stats_follow_focus_channel() {
    let samples = synthetic::drive(2000, 12);
    let mut view = view_with(samples.clone());
    view.set_window(TimeWindow::new(10.0, 50.0));

    let window = TimeWindow::new(10.0, 50.0).filter(&samples);
    let rpm: Vec<f64> = window.iter().filter_map(|s| s.get(ChannelId::Rpm)).collect();
    assert_eq!(view.stats(), stats(&rpm));
    assert_eq!(view.histogram(), histogram(&rpm, 12));

    view.set_focus_channel(Some(ChannelId::Speed));
    let speed: Vec<f64> = window.iter().filter_map(|s| s.get(ChannelId::Speed)).collect();
    assert_eq!(view.stats(), stats(&speed));

    let all = view.channel_stats();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, ChannelId::Rpm);
}

#[test]
fn test_threshold_report_on_focus_channel() {
    let mut view = view_with(synthetic::drive(3000, 1));
    let report = view.threshold_report().unwrap();

    assert_eq!(report.channel, Some(ChannelId::Rpm));
    assert!(report.above > 0);
    assert!(report.excursions.iter().all(|e| e.peak > 7000.0));

    view.set_threshold(None);
    assert!(view.threshold_report().is_none());
}

#[test]
fn test_pan_and_zoom_stay_inside_recording() {
    let mut view = view_with(synthetic::drive(1000, 13));
    let bounds = view.bounds().unwrap();

    view.zoom(0.1, bounds.end);
    view.pan(1.0e6);
    let window = view.window();
    assert!(window.start >= bounds.start);
    assert!(window.end <= bounds.end + 1e-9);

    view.reset_window();
    assert_eq!(view.window(), bounds);
}

#[test]
fn test_session_navigation() {
    let mut samples = synthetic::drive(200, 2);
    let offset = samples[samples.len() - 1].timestamp + 30.0;
    samples.extend(synthetic::drive(100, 5).into_iter().map(|mut s| {
        s.timestamp += offset;
        s
    }));
    let mut view = view_with(samples);

    let sessions = view.sessions();
    assert_eq!(sessions.len(), 2);

    view.select_session(&sessions[1]);
    assert_eq!(view.window(), sessions[1].window);
    assert_eq!(view.window_samples().len(), 100);
}

#[test]
fn test_replace_samples_resets_window() {
    let mut view = view_with(synthetic::drive(100, 1));
    view.set_window(TimeWindow::new(1.0, 2.0));
    let version = view.source_version();

    view.replace_samples(synthetic::series(ChannelId::Rpm, &[(100.0, 1.0), (200.0, 2.0)]));
    assert_eq!(view.source_version(), version + 1);
    assert_eq!(view.window(), TimeWindow::new(100.0, 200.0));
}

#[test]
fn test_export_uses_selected_channels() {
    let mut view = view_with(synthetic::drive(300, 4));
    let csv = view.export_csv();
    let mut lines = csv.lines();

    assert_eq!(lines.next(), Some("timestamp,rpm,speed"));
    assert_eq!(lines.count(), view.visible().len());
}
