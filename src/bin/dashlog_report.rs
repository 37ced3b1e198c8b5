//! Summarise a telemetry CSV export from the command line.
//!
//! Usage: dashlog-report <file.csv> [bucket_count]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dashlog::export::read_csv_file;
use dashlog::settings::DashboardSettings;
use dashlog::DashboardView;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: dashlog-report <file.csv> [bucket_count]");
    };

    let mut settings = DashboardSettings::load();
    if let Some(buckets) = args.next() {
        settings.bucket_count = buckets
            .parse()
            .with_context(|| format!("invalid bucket count '{}'", buckets))?;
    }

    let table =
        read_csv_file(&path).with_context(|| format!("failed to load {}", path.display()))?;
    settings.channels = table.channels.clone();

    let mut view = DashboardView::new(table.samples, &settings);
    tracing::info!("Loaded {} samples from {}", view.samples().len(), path.display());

    let window = view.window();
    let visible = view.visible().len();
    println!("File:     {}", path.display());
    println!("Window:   {:.3}s .. {:.3}s", window.start, window.end);
    println!("Samples:  {}", view.samples().len());
    println!(
        "Visible:  {} after downsampling into {} buckets",
        visible,
        view.bucket_count()
    );

    let sessions = view.sessions();
    println!("Sessions: {}", sessions.len());
    for session in &sessions {
        println!(
            "  #{:<3} {:>10.3}s .. {:>10.3}s  {} samples",
            session.index,
            session.window.start,
            session.window.end,
            session.len()
        );
    }

    println!();
    println!(
        "{:<22} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "Channel", "n", "mean", "min", "max", "std"
    );
    for (channel, stats) in view.channel_stats() {
        println!(
            "{:<22} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            format!("{} ({})", channel.display_name(), channel.unit()),
            stats.count,
            stats.mean,
            stats.min,
            stats.max,
            stats.std
        );
    }

    if let Some(channel) = view.focus_channel() {
        println!();
        println!("Histogram of {}:", channel.display_name());
        let bins = view.histogram();
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &bins {
            let bar = "#".repeat(bin.count * 40 / peak);
            println!("  {:>24} {:>7} {}", bin.label(), bin.count, bar);
        }
    }

    if let Some(report) = view.threshold_report() {
        println!();
        println!(
            "Above {}: {} of {} samples ({:.1}%), {} excursions",
            report.threshold,
            report.above,
            report.total,
            report.fraction_above() * 100.0,
            report.excursions.len()
        );
    }

    Ok(())
}
