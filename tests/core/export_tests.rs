//! Tests for CSV export and import

use dashlog::analysis::downsample;
use dashlog::export::{export_csv_file, parse_csv, read_csv_file, to_csv, CsvError};
use dashlog::{ChannelId, Sample};

use crate::common::synthetic;

#[test]
fn test_round_trip_of_downsampled_window() {
    let samples = synthetic::drive(2000, 5);
    let channels = [ChannelId::Rpm, ChannelId::Speed, ChannelId::CoolantTemp];
    let visible = downsample(&samples, 60, &channels, 10.0, 80.0);

    let table = parse_csv(&to_csv(&visible, &channels)).unwrap();

    assert_eq!(table.channels, channels.to_vec());
    assert_eq!(table.samples.len(), visible.len());
    for (parsed, original) in table.samples.iter().zip(&visible) {
        assert_eq!(parsed.timestamp, original.timestamp);
        for channel in channels {
            assert_eq!(parsed.get(channel), original.get(channel));
        }
    }
}

#[test]
fn test_missing_round_trips_as_missing() {
    let samples = vec![
        Sample::new(0.0).with(ChannelId::Speed, 0.0),
        Sample::new(0.25),
    ];
    let csv = to_csv(&samples, &[ChannelId::Speed]);
    assert_eq!(csv, "timestamp,speed\n0,0\n0.25,\n");

    let table = parse_csv(&csv).unwrap();
    assert_eq!(table.samples[0].get(ChannelId::Speed), Some(0.0));
    assert_eq!(table.samples[1].get(ChannelId::Speed), None);
}

#[test]
fn test_unselected_channels_are_not_exported() {
    let samples = vec![Sample::new(1.0)
        .with(ChannelId::Speed, 10.0)
        .with(ChannelId::Rpm, 2000.0)];
    let csv = to_csv(&samples, &[ChannelId::Rpm]);
    assert_eq!(csv, "timestamp,rpm\n1,2000\n");
}

#[test]
fn test_file_round_trip() {
    let samples = synthetic::drive(100, 9);
    let channels = [ChannelId::Speed];
    let path = std::env::temp_dir().join(format!("dashlog_export_{}.csv", std::process::id()));

    export_csv_file(&path, &samples, &channels).unwrap();
    let table = read_csv_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(table.samples.len(), samples.len());
    assert_eq!(table.samples[42].get(ChannelId::Speed), samples[42].get(ChannelId::Speed));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = read_csv_file(std::path::Path::new("/nonexistent/dashlog.csv")).unwrap_err();
    assert!(matches!(err, CsvError::Io(_)));
}
