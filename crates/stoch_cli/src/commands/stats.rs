//! Stats command implementation
//!
//! Reports every moment and order statistic of a sample, weighted moments
//! when a weights file is given, and association measures and the
//! two-sample t statistic when a second sample is given.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use stoch_stats::correlation::{correlation, covariance, spearman};
use stoch_stats::moments::{
    absdev, kurtosis, lag1_autocorrelation, mean, sd, skew, tss, variance,
};
use stoch_stats::order::{max, max_index, median, min, min_index, quantile_from_sorted_data};
use stoch_stats::two_sample::{pooled_variance, ttest};
use stoch_stats::weighted::{wabsdev, wkurtosis, wmean, wsd, wskew, wtss, wvariance};
use stoch_stats::{StatsError, Strided};

use super::{write_json, OutputFormat};
use crate::{CliError, Result};

/// Inputs of the `stats` command.
#[derive(Debug, Clone, Default)]
pub struct StatsArgs {
    /// Inline sample values.
    pub values: Option<Vec<f64>>,
    /// File of sample values.
    pub input: Option<PathBuf>,
    /// Stride applied to the sample (and to `against`).
    pub stride: usize,
    /// File of weights, read with `weight_stride`.
    pub weights: Option<PathBuf>,
    /// Stride applied to the weights.
    pub weight_stride: usize,
    /// File holding a second sample for association measures.
    pub against: Option<PathBuf>,
}

/// One line of the report. Statistics that cannot be computed for this
/// sample carry the reason instead of a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub statistic: &'static str,
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Row {
    fn new(statistic: &'static str, result: std::result::Result<f64, StatsError>) -> Self {
        match result {
            Ok(value) => Self {
                statistic,
                value: Some(value),
                error: None,
            },
            Err(e) => Self {
                statistic,
                value: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Read every number in a CSV file, or a plain list with one number per line.
///
/// Blank fields are skipped; anything else that is not a number is an error.
pub fn read_numbers(path: &Path) -> Result<Vec<f64>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        for field in record.iter().filter(|f| !f.is_empty()) {
            let value = field.parse::<f64>().map_err(|_| {
                CliError::InvalidArgument(format!(
                    "{}:{}: not a number: {}",
                    path.display(),
                    line,
                    field
                ))
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Moments and order statistics of `data`.
pub fn summary(data: Strided<'_>) -> Vec<Row> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    vec![
        Row::new("n", Ok(data.len() as f64)),
        Row::new("mean", mean(data)),
        Row::new("variance", variance(data)),
        Row::new("sd", sd(data)),
        Row::new("tss", tss(data)),
        Row::new("absdev", absdev(data)),
        Row::new("skew", skew(data)),
        Row::new("kurtosis", kurtosis(data)),
        Row::new("lag1_autocorrelation", lag1_autocorrelation(data)),
        Row::new("min", min(data)),
        Row::new("max", max(data)),
        Row::new("min_index", min_index(data).map(|i| i as f64)),
        Row::new("max_index", max_index(data).map(|i| i as f64)),
        Row::new("median", median(data)),
        Row::new("quantile_0.25", quantile_from_sorted_data(&sorted, 0.25)),
        Row::new("quantile_0.75", quantile_from_sorted_data(&sorted, 0.75)),
    ]
}

/// Weighted moments of `data`.
pub fn weighted_summary(data: Strided<'_>, weights: Strided<'_>) -> Vec<Row> {
    vec![
        Row::new("wmean", wmean(data, weights)),
        Row::new("wvariance", wvariance(data, weights)),
        Row::new("wsd", wsd(data, weights)),
        Row::new("wtss", wtss(data, weights)),
        Row::new("wabsdev", wabsdev(data, weights)),
        Row::new("wskew", wskew(data, weights)),
        Row::new("wkurtosis", wkurtosis(data, weights)),
    ]
}

/// Association between two samples and the two-sample t statistic.
pub fn association_summary(x: Strided<'_>, y: Strided<'_>) -> Vec<Row> {
    vec![
        Row::new("covariance", covariance(x, y)),
        Row::new("correlation", correlation(x, y)),
        Row::new("spearman", spearman(x, y)),
        Row::new("pooled_variance", pooled_variance(x, y)),
        Row::new("ttest", ttest(x, y)),
    ]
}

/// Run the stats command
pub fn run<W: Write>(out: &mut W, args: &StatsArgs, format: OutputFormat) -> Result<()> {
    let data = match (&args.values, &args.input) {
        (Some(values), None) => values.clone(),
        (None, Some(path)) => read_numbers(path)?,
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidArgument(
                "Give either --values or --input, not both".to_string(),
            ))
        }
        (None, None) => {
            return Err(CliError::InvalidArgument(
                "One of --values or --input is required".to_string(),
            ))
        }
    };
    let view = Strided::new(&data, args.stride)?;
    info!(elements = view.len(), stride = args.stride, "Computing statistics");

    let mut rows = summary(view);

    let weights = args.weights.as_deref().map(read_numbers).transpose()?;
    if let Some(weights) = &weights {
        let weight_view = Strided::new(weights, args.weight_stride)?;
        rows.extend(weighted_summary(view, weight_view));
    }

    let other = args.against.as_deref().map(read_numbers).transpose()?;
    if let Some(other) = &other {
        let other_view = Strided::new(other, args.stride)?;
        rows.extend(association_summary(view, other_view));
    }

    match format {
        OutputFormat::Table => {
            for row in &rows {
                match (row.value, &row.error) {
                    (Some(value), _) => writeln!(out, "{:<22}{:>24.12}", row.statistic, value)?,
                    (None, Some(error)) => writeln!(out, "{:<22}n/a ({})", row.statistic, error)?,
                    (None, None) => writeln!(out, "{:<22}n/a", row.statistic)?,
                }
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "statistic,value")?;
            for row in &rows {
                match row.value {
                    Some(value) => writeln!(out, "{},{}", row.statistic, value)?,
                    None => writeln!(out, "{},", row.statistic)?,
                }
            }
        }
        OutputFormat::Json => write_json(out, &rows)?,
    }

    Ok(())
}
