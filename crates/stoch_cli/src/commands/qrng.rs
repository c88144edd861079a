//! Qrng command implementation
//!
//! Prints points of a low-discrepancy sequence.

use std::io::Write;
use tracing::info;

use stoch_random::qrng::{QrngMethod, QuasiRandom};

use super::{write_csv, write_json, OutputFormat};
use crate::Result;

/// The `count` points following the first `skip`.
pub fn points(method: QrngMethod, dimension: usize, skip: usize, count: usize) -> Result<Vec<Vec<f64>>> {
    let mut qrng = QuasiRandom::new(method, dimension)?;
    qrng.skip(skip)?;
    let points = qrng.take_points(count)?;
    qrng.release()?;
    Ok(points)
}

/// Run the qrng command
pub fn run<W: Write>(
    out: &mut W,
    method: QrngMethod,
    dimension: usize,
    skip: usize,
    count: usize,
    format: OutputFormat,
) -> Result<()> {
    info!(method = %method, dimension, skip, count, "Generating quasirandom points");
    let points = points(method, dimension, skip, count)?;

    match format {
        OutputFormat::Table => {
            for point in &points {
                let line: Vec<String> = point.iter().map(|x| format!("{:.10}", x)).collect();
                writeln!(out, "{}", line.join("  "))?;
            }
        }
        OutputFormat::Csv => {
            let names: Vec<String> = (1..=dimension).map(|i| format!("x{}", i)).collect();
            let header: Vec<&str> = names.iter().map(String::as_str).collect();
            write_csv(out, Some(&header), &points)?;
        }
        OutputFormat::Json => write_json(out, &points)?,
    }
    Ok(())
}
