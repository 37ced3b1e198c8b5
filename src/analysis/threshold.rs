//! Threshold exceedance detection for a single channel.

use serde::{Deserialize, Serialize};

use crate::telemetry::{ChannelId, Sample};

/// A maximal run of consecutive samples above the threshold
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Excursion {
    /// Timestamp of the first sample above the threshold
    pub start: f64,
    /// Timestamp of the last sample above the threshold
    pub end: f64,
    /// Highest value reached during the run
    pub peak: f64,
    pub samples: usize,
}

impl Excursion {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Exceedance summary for one channel over a window
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub channel: Option<ChannelId>,
    pub threshold: f64,
    /// Samples with a value for the channel
    pub total: usize,
    /// Samples strictly above the threshold
    pub above: usize,
    pub excursions: Vec<Excursion>,
}

impl ThresholdReport {
    pub fn fraction_above(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.above as f64 / self.total as f64
        }
    }
}

/// Find every run of samples whose value is strictly above `threshold`.
///
/// A missing value ends the current run.
pub fn exceedances(samples: &[Sample], channel: ChannelId, threshold: f64) -> ThresholdReport {
    let mut report = ThresholdReport {
        channel: Some(channel),
        threshold,
        ..Default::default()
    };
    let mut current: Option<Excursion> = None;

    for sample in samples {
        match sample.get(channel) {
            Some(value) if value > threshold => {
                report.total += 1;
                report.above += 1;
                let run = current.get_or_insert(Excursion {
                    start: sample.timestamp,
                    end: sample.timestamp,
                    peak: value,
                    samples: 0,
                });
                run.end = sample.timestamp;
                run.peak = run.peak.max(value);
                run.samples += 1;
            }
            Some(_) => {
                report.total += 1;
                report.excursions.extend(current.take());
            }
            None => report.excursions.extend(current.take()),
        }
    }
    report.excursions.extend(current);

    report
}
