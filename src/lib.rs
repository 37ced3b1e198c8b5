//! DashLog - telemetry window shaping for vehicle sensor dashboards
//!
//! This library turns an ordered recording of multi-channel sensor samples
//! into the data a zoomable chart needs: a spike-preserving downsampled view
//! of the visible window, histograms and summary statistics, and CSV export.
//!
//! ## Module Structure
//!
//! - [`telemetry`] - Sample and channel types, time windows and sessions
//! - [`analysis`] - Envelope downsampling, histograms, statistics, thresholds
//! - [`cache`] - Memoisation keyed by window, channels, buckets and data version
//! - [`view`] - Dashboard view state tying the pieces together
//! - [`export`] - CSV export and import
//! - [`settings`] - User settings persistence

pub mod analysis;
pub mod cache;
pub mod export;
pub mod settings;
pub mod telemetry;
pub mod view;

pub use analysis::{downsample, histogram, stats, HistogramBin, Stats};
pub use telemetry::{ChannelId, Sample, TimeWindow};
pub use view::DashboardView;
