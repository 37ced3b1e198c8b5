//! Visible time windows and recording sessions.
//!
//! Every function here assumes samples are ordered by non-decreasing
//! timestamp, which is what data sources deliver.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::types::Sample;

/// Narrowest window a zoom is allowed to produce, in seconds
pub const MIN_WINDOW_SPAN: f64 = 1e-3;

/// Closed time interval `[start, end]` in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Window covering every sample, or `None` for an empty slice
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;
        Some(Self::new(first.timestamp, last.timestamp))
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn contains(&self, timestamp: f64) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// Positions of the samples that fall inside the window
    pub fn range(&self, samples: &[Sample]) -> Range<usize> {
        let lo = samples.partition_point(|s| s.timestamp < self.start);
        let hi = samples.partition_point(|s| s.timestamp <= self.end);
        lo..hi.max(lo)
    }

    /// Contiguous slice of the samples inside the window
    pub fn filter<'a>(&self, samples: &'a [Sample]) -> &'a [Sample] {
        &samples[self.range(samples)]
    }

    /// Scale the window around `center`.
    ///
    /// A factor below 1 zooms in. Non-positive or non-finite factors leave
    /// the window untouched.
    pub fn zoom(&self, factor: f64, center: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return *self;
        }
        let span = (self.span() * factor).max(MIN_WINDOW_SPAN);
        let ratio = if self.span() > 0.0 {
            ((center - self.start) / self.span()).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let start = center - span * ratio;
        Self::new(start, start + span)
    }

    /// Shift the window by `delta` seconds
    pub fn pan(&self, delta: f64) -> Self {
        Self::new(self.start + delta, self.end + delta)
    }

    /// Keep the window inside `bounds`, preserving its span where possible
    pub fn clamp_to(&self, bounds: TimeWindow) -> Self {
        let span = self.span().min(bounds.span()).max(0.0);
        let start = self.start.max(bounds.start).min(bounds.end - span);
        Self::new(start, start + span)
    }
}

/// A run of samples without a recording gap
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Zero-based position in recording order
    pub index: usize,
    pub window: TimeWindow,
    /// Positions of the session's samples in the source slice
    pub samples: Range<usize>,
}

impl Session {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Split a recording wherever consecutive timestamps are more than
/// `max_gap` seconds apart.
///
/// A non-positive or non-finite gap yields a single session.
pub fn split_sessions(samples: &[Sample], max_gap: f64) -> Vec<Session> {
    if samples.is_empty() {
        return vec![];
    }

    let split = max_gap.is_finite() && max_gap > 0.0;
    let mut sessions = Vec::new();
    let mut start = 0;

    for i in 1..=samples.len() {
        let boundary = i == samples.len()
            || (split && samples[i].timestamp - samples[i - 1].timestamp > max_gap);
        if boundary {
            sessions.push(Session {
                index: sessions.len(),
                window: TimeWindow::new(samples[start].timestamp, samples[i - 1].timestamp),
                samples: start..i,
            });
            start = i;
        }
    }

    sessions
}
