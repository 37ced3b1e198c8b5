//! CSV export and import of telemetry windows.
//!
//! The table has a `timestamp` column followed by one column per channel in
//! the caller's order. Missing values are empty fields. Numbers are written
//! with the shortest representation that parses back to the same `f64`, so
//! an exported window re-imports exactly.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::telemetry::{ChannelId, Sample};

/// Name of the first column
pub const TIMESTAMP_COLUMN: &str = "timestamp";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while reading a CSV table
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Failed to read CSV file: {0}")]
    Io(#[from] io::Error),

    #[error("CSV input is empty")]
    Empty,

    #[error("Line {line}: first column must be 'timestamp', found '{found}'")]
    MissingTimestampColumn { line: usize, found: String },

    #[error("Line {line}: unknown channel '{name}'")]
    UnknownChannel { line: usize, name: String },

    #[error("Line {line}: channel '{name}' appears more than once")]
    DuplicateChannel { line: usize, name: String },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}, column {column}: invalid number '{value}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        value: String,
    },

    #[error("Line {line}: timestamp goes backwards")]
    UnsortedTimestamps { line: usize },
}

// ============================================================================
// Export
// ============================================================================

/// Render samples as a CSV table with a trailing newline
pub fn to_csv(samples: &[Sample], channels: &[ChannelId]) -> String {
    let mut out = String::new();
    out.push_str(&header(channels));
    out.push('\n');
    for sample in samples {
        push_row(&mut out, sample, channels);
        out.push('\n');
    }
    out
}

/// Stream samples as a CSV table into `writer`
pub fn write_csv<W: Write>(
    writer: &mut W,
    samples: &[Sample],
    channels: &[ChannelId],
) -> io::Result<()> {
    writeln!(writer, "{}", header(channels))?;
    let mut row = String::new();
    for sample in samples {
        row.clear();
        push_row(&mut row, sample, channels);
        writeln!(writer, "{}", row)?;
    }
    Ok(())
}

/// Write samples to a CSV file at `path`
pub fn export_csv_file(
    path: &Path,
    samples: &[Sample],
    channels: &[ChannelId],
) -> Result<(), CsvError> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_csv(&mut writer, samples, channels)?;
    writer.flush()?;

    tracing::info!(
        "Exported {} samples ({} channels) to {}",
        samples.len(),
        channels.len(),
        path.display()
    );
    Ok(())
}

fn header(channels: &[ChannelId]) -> String {
    std::iter::once(TIMESTAMP_COLUMN)
        .chain(channels.iter().map(|c| c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

fn push_row(out: &mut String, sample: &Sample, channels: &[ChannelId]) {
    // Writing into a String cannot fail
    let _ = write!(out, "{}", sample.timestamp);
    for &channel in channels {
        out.push(',');
        if let Some(value) = sample.get(channel) {
            let _ = write!(out, "{}", value);
        }
    }
}

// ============================================================================
// Import
// ============================================================================

/// A parsed CSV table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvTable {
    /// Channel columns in file order
    pub channels: Vec<ChannelId>,
    pub samples: Vec<Sample>,
}

/// Parse a table produced by [`to_csv`].
///
/// Blank lines are ignored. Channels not present as columns are missing in
/// every sample.
pub fn parse_csv(text: &str) -> Result<CsvTable, CsvError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let (header_line, header) = lines.next().ok_or(CsvError::Empty)?;
    let channels = parse_header(header_line, header)?;

    let mut samples: Vec<Sample> = Vec::new();
    for (line, row) in lines {
        let sample = parse_row(line, row, &channels)?;
        if let Some(previous) = samples.last() {
            if sample.timestamp < previous.timestamp {
                return Err(CsvError::UnsortedTimestamps { line });
            }
        }
        samples.push(sample);
    }

    tracing::info!(
        "Parsed {} samples across {} channels",
        samples.len(),
        channels.len()
    );

    Ok(CsvTable { channels, samples })
}

/// Read and parse a CSV file
pub fn read_csv_file(path: &Path) -> Result<CsvTable, CsvError> {
    let text = std::fs::read_to_string(path)?;
    parse_csv(&text)
}

fn parse_header(line: usize, header: &str) -> Result<Vec<ChannelId>, CsvError> {
    let mut fields = header.split(',').map(str::trim);

    let first = fields.next().unwrap_or_default();
    if first != TIMESTAMP_COLUMN {
        return Err(CsvError::MissingTimestampColumn {
            line,
            found: first.to_string(),
        });
    }

    let mut channels = Vec::new();
    for name in fields {
        let channel = ChannelId::from_str(name).map_err(|_| CsvError::UnknownChannel {
            line,
            name: name.to_string(),
        })?;
        if channels.contains(&channel) {
            return Err(CsvError::DuplicateChannel {
                line,
                name: name.to_string(),
            });
        }
        channels.push(channel);
    }

    Ok(channels)
}

fn parse_row(line: usize, row: &str, channels: &[ChannelId]) -> Result<Sample, CsvError> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() != channels.len() + 1 {
        return Err(CsvError::FieldCount {
            line,
            expected: channels.len() + 1,
            found: fields.len(),
        });
    }

    let timestamp = parse_number(line, 1, fields[0])?;
    let mut sample = Sample::new(timestamp);

    for (i, (&channel, field)) in channels.iter().zip(&fields[1..]).enumerate() {
        if field.is_empty() {
            continue;
        }
        sample.set(channel, Some(parse_number(line, i + 2, field)?));
    }

    Ok(sample)
}

fn parse_number(line: usize, column: usize, value: &str) -> Result<f64, CsvError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CsvError::InvalidNumber {
            line,
            column,
            value: value.to_string(),
        })
}
