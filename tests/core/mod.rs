//! Core module tests
//!
//! Tests for:
//! - Envelope downsampling properties
//! - Histograms and statistics
//! - Time windows and sessions
//! - CSV export round trips
//! - Settings persistence
//! - Dashboard view recomputation

pub mod export_tests;
pub mod statistics_tests;
pub mod view_tests;
