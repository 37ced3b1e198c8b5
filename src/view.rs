//! Dashboard view state.
//!
//! [`DashboardView`] owns a recording and the current view parameters, and
//! serves the derived data a chart needs: the downsampled visible window,
//! a histogram and statistics for the focus channel, threshold excursions
//! and a CSV export. Downsampling is memoised and recomputed only when the
//! window, channel selection, bucket count or data change.

use crate::analysis::{
    channel_values, downsample, exceedances, histogram, stats, HistogramBin, Stats,
    ThresholdReport,
};
use crate::cache::{CacheKey, CacheStats, WindowCache};
use crate::export::to_csv;
use crate::settings::DashboardSettings;
use crate::telemetry::{split_sessions, ChannelId, Sample, Session, TimeWindow};

pub struct DashboardView {
    samples: Vec<Sample>,
    /// Bumped on every change to `samples`
    source_version: u64,
    window: TimeWindow,
    channels: Vec<ChannelId>,
    /// Overrides the first selected channel as histogram source
    focus: Option<ChannelId>,
    bucket_count: usize,
    histogram_bins: usize,
    threshold: Option<f64>,
    session_gap_secs: f64,
    cache: WindowCache<Vec<Sample>>,
}

impl DashboardView {
    /// Create a view over `samples` showing the full recording
    pub fn new(samples: Vec<Sample>, settings: &DashboardSettings) -> Self {
        let settings = settings.clone().sanitized();
        let window = TimeWindow::from_samples(&samples).unwrap_or_default();

        Self {
            samples,
            source_version: 0,
            window,
            channels: settings.channels,
            focus: None,
            bucket_count: settings.bucket_count,
            histogram_bins: settings.histogram_bins,
            threshold: settings.threshold,
            session_gap_secs: settings.session_gap_secs,
            cache: WindowCache::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn source_version(&self) -> u64 {
        self.source_version
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Full extent of the recording
    pub fn bounds(&self) -> Option<TimeWindow> {
        TimeWindow::from_samples(&self.samples)
    }

    /// Channel whose values feed the histogram, statistics and threshold
    pub fn focus_channel(&self) -> Option<ChannelId> {
        self.focus.or_else(|| self.channels.first().copied())
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------------
    // View parameters
    // ------------------------------------------------------------------------

    pub fn set_window(&mut self, window: TimeWindow) {
        tracing::debug!("Window set to [{}, {}]", window.start, window.end);
        self.window = window;
    }

    /// Zoom around `center`, staying inside the recording
    pub fn zoom(&mut self, factor: f64, center: f64) {
        let zoomed = self.window.zoom(factor, center);
        self.set_window(self.clamped(zoomed));
    }

    /// Pan by `delta` seconds, staying inside the recording
    pub fn pan(&mut self, delta: f64) {
        let panned = self.window.pan(delta);
        self.set_window(self.clamped(panned));
    }

    /// Show the whole recording
    pub fn reset_window(&mut self) {
        self.set_window(self.bounds().unwrap_or_default());
    }

    /// Replace the channel selection, dropping repeated channels
    pub fn set_channels(&mut self, channels: Vec<ChannelId>) {
        let mut unique: Vec<ChannelId> = Vec::with_capacity(channels.len());
        for channel in channels {
            if !unique.contains(&channel) {
                unique.push(channel);
            }
        }
        self.channels = unique;
    }

    pub fn set_focus_channel(&mut self, channel: Option<ChannelId>) {
        self.focus = channel;
    }

    /// Set the bucket count; zero disables downsampling
    pub fn set_bucket_count(&mut self, bucket_count: usize) {
        self.bucket_count = bucket_count;
    }

    /// Set the histogram bin count; zero selects the default
    pub fn set_histogram_bins(&mut self, bins: usize) {
        self.histogram_bins = bins;
    }

    pub fn set_threshold(&mut self, threshold: Option<f64>) {
        self.threshold = threshold.filter(|t| t.is_finite());
    }

    // ------------------------------------------------------------------------
    // Data source
    // ------------------------------------------------------------------------

    /// Swap in a new recording and show all of it
    pub fn replace_samples(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
        self.source_version += 1;
        self.cache.invalidate();
        self.reset_window();
    }

    /// Append live samples.
    ///
    /// Samples older than the last stored one are dropped to keep the
    /// recording ordered. Returns the number of samples appended.
    pub fn extend_samples<I>(&mut self, samples: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut appended = 0;
        let mut dropped = 0;

        for sample in samples {
            let ordered = self
                .samples
                .last()
                .map_or(true, |last| sample.timestamp >= last.timestamp);
            if ordered && !sample.timestamp.is_nan() {
                self.samples.push(sample);
                appended += 1;
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} out-of-order samples", dropped);
        }
        if appended > 0 {
            self.source_version += 1;
        }
        appended
    }

    // ------------------------------------------------------------------------
    // Derived data
    // ------------------------------------------------------------------------

    /// Raw samples inside the visible window
    pub fn window_samples(&self) -> &[Sample] {
        self.window.filter(&self.samples)
    }

    /// Downsampled visible window for the selected channels
    pub fn visible(&mut self) -> &[Sample] {
        let key = CacheKey::new(
            self.window,
            &self.channels,
            self.bucket_count,
            self.source_version,
        );
        let samples = &self.samples;
        let channels = &self.channels;
        let window = self.window;
        let bucket_count = self.bucket_count;

        self.cache.get_or_compute(key, || {
            if bucket_count == 0 {
                // Downsampling disabled, still honour the window
                return window.filter(samples).to_vec();
            }
            downsample(samples, bucket_count, channels, window.start, window.end)
        })
    }

    /// Focus channel values inside the visible window
    pub fn focus_values(&self) -> Vec<f64> {
        match self.focus_channel() {
            Some(channel) => channel_values(self.window_samples(), channel),
            None => vec![],
        }
    }

    pub fn histogram(&self) -> Vec<HistogramBin> {
        histogram(&self.focus_values(), self.histogram_bins)
    }

    pub fn stats(&self) -> Stats {
        stats(&self.focus_values())
    }

    /// Statistics for every selected channel over the visible window
    pub fn channel_stats(&self) -> Vec<(ChannelId, Stats)> {
        let visible = self.window_samples();
        self.channels
            .iter()
            .map(|&c| (c, stats(&channel_values(visible, c))))
            .collect()
    }

    /// Excursions of the focus channel above the configured threshold
    pub fn threshold_report(&self) -> Option<ThresholdReport> {
        let threshold = self.threshold?;
        let channel = self.focus_channel()?;
        Some(exceedances(self.window_samples(), channel, threshold))
    }

    /// Recording sessions separated by gaps longer than the configured gap
    pub fn sessions(&self) -> Vec<Session> {
        split_sessions(&self.samples, self.session_gap_secs)
    }

    /// Show the given session
    pub fn select_session(&mut self, session: &Session) {
        tracing::debug!("Selecting session {}", session.index);
        self.set_window(session.window);
    }

    /// Export the downsampled visible window as CSV
    pub fn export_csv(&mut self) -> String {
        let channels = self.channels.clone();
        to_csv(self.visible(), &channels)
    }

    fn clamped(&self, window: TimeWindow) -> TimeWindow {
        match self.bounds() {
            Some(bounds) => window.clamp_to(bounds),
            None => window,
        }
    }
}
