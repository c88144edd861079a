//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write their
//! report to the supplied writer so that the binary can target stdout and
//! tests can capture the text.

pub mod cdf;
pub mod generators;
pub mod qrng;
pub mod sample;
pub mod stats;

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::Result;

/// Report format shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned human-readable text.
    #[default]
    Table,
    /// Comma-separated values, one record per line.
    Csv,
    /// A single JSON document.
    Json,
}

/// Write `rows` as pretty JSON followed by a newline.
pub(crate) fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, rows: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}

/// Write numeric records as CSV, with an optional header row.
pub(crate) fn write_csv<W: Write>(
    out: &mut W,
    header: Option<&[&str]>,
    records: &[Vec<f64>],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(&mut *out);
    if let Some(header) = header {
        writer.write_record(header)?;
    }
    for record in records {
        writer.write_record(record.iter().map(|x| x.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
