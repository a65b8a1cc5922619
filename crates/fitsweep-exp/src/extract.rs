//! Metric extraction from the simulator's textual output.
//!
//! The pipeline only sees the [`MetricExtractor`] trait. [`PatternExtractor`]
//! scrapes the four labelled lines the simulator prints today, while
//! [`KeyValueExtractor`] reads a structured `res=<n>` contract. Either way a
//! metric that cannot be found is left as `None`; it never fails the point.

use fitsweep_core::{ErrorInfo, Metric, MetricQuadruple, SweepError, SweepParameter};
use regex::Regex;

/// Signed decimal or scientific-notation number, captured as group 1. ASCII
/// digits only: `\d` would also match non-ASCII digits that `str::parse` rejects.
const NUMBER: &str = r"([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)";

/// Literal label and suffix for each metric line.
const LABELS: [(Metric, &str, &str); 4] = [
    (Metric::Res, "TOTAL: RES_SUM: ", ""),
    (Metric::Lat, "TOTAL: LAT_SUM: ", ""),
    (Metric::Spfm, "SPFM:  ", "%"),
    (Metric::Lfm, "LFM:   ", "%"),
];

/// Pulls the four metrics out of one captured output.
pub trait MetricExtractor {
    /// Returns every metric that could be found. Absent metrics are `None`.
    fn extract(&self, output: &str) -> MetricQuadruple;
}

/// Regex scraper for the simulator's labelled summary lines.
///
/// Each label is searched independently and only its first occurrence is
/// used. Numbers are parsed with [`str::parse`], which is locale independent.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    patterns: Vec<(Metric, Regex)>,
}

impl PatternExtractor {
    /// Builds the extractor for the simulator's default labels.
    pub fn new() -> Result<Self, SweepError> {
        let mut patterns = Vec::with_capacity(LABELS.len());
        for (metric, label, suffix) in LABELS {
            let source = format!("{}{}{}", regex::escape(label), NUMBER, regex::escape(suffix));
            let regex = Regex::new(&source).map_err(|err| {
                SweepError::Extraction(
                    ErrorInfo::new("extract-pattern", "failed to compile metric pattern")
                        .with_context("metric", metric.column())
                        .with_hint(err.to_string()),
                )
            })?;
            patterns.push((metric, regex));
        }
        Ok(Self { patterns })
    }
}

impl MetricExtractor for PatternExtractor {
    fn extract(&self, output: &str) -> MetricQuadruple {
        let mut metrics = MetricQuadruple::missing();
        for (metric, regex) in &self.patterns {
            let value = regex
                .captures(output)
                .and_then(|caps| caps.get(1))
                .and_then(|number| number.as_str().parse::<f64>().ok());
            metrics.set(*metric, value);
        }
        metrics
    }
}

/// Reads `key=value` lines where the key is a column name (`res`, `lat`,
/// `spfm`, `lfm`). A trailing `%` on the value is ignored. The first line for
/// each key wins; unknown keys and malformed lines are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValueExtractor;

impl MetricExtractor for KeyValueExtractor {
    fn extract(&self, output: &str) -> MetricQuadruple {
        let mut metrics = MetricQuadruple::missing();
        for line in output.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let Some(metric) = Metric::from_column(key.trim()) else {
                continue;
            };
            if metrics.get(metric).is_some() {
                continue;
            }
            let value = value.trim();
            let value = value.strip_suffix('%').unwrap_or(value).trim_end();
            metrics.set(metric, value.parse::<f64>().ok());
        }
        metrics
    }
}

/// Describes the metrics missing from a point as an extraction error, or
/// `None` when the quadruple is complete.
pub fn missing_metrics_error(
    parameter: SweepParameter,
    metrics: &MetricQuadruple,
) -> Option<SweepError> {
    let missing = metrics.missing_metrics();
    if missing.is_empty() {
        return None;
    }
    let names: Vec<&str> = missing.iter().map(Metric::column).collect();
    Some(SweepError::Extraction(
        ErrorInfo::new("extract-missing", "metrics absent from program output")
            .with_context("dram_fit", parameter.to_arg())
            .with_context("missing", names.join(",")),
    ))
}
