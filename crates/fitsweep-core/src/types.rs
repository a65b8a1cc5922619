use std::fmt;

use serde::{Deserialize, Serialize};

/// Renders a float in its shortest round-trip form, always keeping a decimal
/// point or exponent (`0.01`, `100.0`, `1e-7`).
pub fn render_value(value: f64) -> String {
    format!("{value:?}")
}

/// A single value of the swept input (`dram_fit`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SweepParameter(f64);

impl SweepParameter {
    /// Wraps a raw parameter value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw parameter value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Renders the parameter as the single command-line argument handed to
    /// the external program.
    pub fn to_arg(&self) -> String {
        render_value(self.0)
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_value(self.0))
    }
}

/// One of the four metrics reported by the external program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Aggregate residual sum (`TOTAL: RES_SUM:`).
    Res,
    /// Aggregate latent sum (`TOTAL: LAT_SUM:`).
    Lat,
    /// Single-point fault metric, in percent (`SPFM:`).
    Spfm,
    /// Latent fault metric, in percent (`LFM:`).
    Lfm,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Metric; 4] = [Metric::Res, Metric::Lat, Metric::Spfm, Metric::Lfm];

    /// Column name used in the result table.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Res => "res",
            Metric::Lat => "lat",
            Metric::Spfm => "spfm",
            Metric::Lfm => "lfm",
        }
    }

    /// Parses a column name back into a metric.
    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|metric| metric.column() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The four metrics extracted from one invocation. Each field is optional so
/// that a missing metric never discards the rest of the record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricQuadruple {
    /// Residual sum.
    pub res: Option<f64>,
    /// Latent sum.
    pub lat: Option<f64>,
    /// SPFM percentage.
    pub spfm: Option<f64>,
    /// LFM percentage.
    pub lfm: Option<f64>,
}

impl MetricQuadruple {
    /// A quadruple with every metric missing, recorded for failed invocations.
    pub fn missing() -> Self {
        Self::default()
    }

    /// Returns the value of a single metric.
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Res => self.res,
            Metric::Lat => self.lat,
            Metric::Spfm => self.spfm,
            Metric::Lfm => self.lfm,
        }
    }

    /// Sets the value of a single metric.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        match metric {
            Metric::Res => self.res = value,
            Metric::Lat => self.lat = value,
            Metric::Spfm => self.spfm = value,
            Metric::Lfm => self.lfm = value,
        }
    }

    /// Metrics that have no value, in column order.
    pub fn missing_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|metric| self.get(*metric).is_none())
            .collect()
    }

    /// Whether all four metrics are present.
    pub fn is_complete(&self) -> bool {
        Metric::ALL.iter().all(|metric| self.get(*metric).is_some())
    }
}

/// One row of the result table: a parameter and the metrics it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    /// The swept input value.
    pub parameter: SweepParameter,
    /// Metrics extracted for this parameter.
    pub metrics: MetricQuadruple,
}

/// Ordered, read-only collection of sweep records in generation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    records: Vec<SweepRecord>,
}

impl ResultTable {
    /// Column names of the flat table, parameter first.
    pub const COLUMNS: [&'static str; 5] = ["dram_fit", "res", "lat", "spfm", "lfm"];

    /// Builds a table from records already in their final order.
    pub fn from_records(records: Vec<SweepRecord>) -> Self {
        Self { records }
    }

    /// Records in generation order.
    pub fn records(&self) -> &[SweepRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(parameter, metric)` pairs for one column, in table order.
    pub fn column_pairs(&self, metric: Metric) -> Vec<(SweepParameter, Option<f64>)> {
        self.records
            .iter()
            .map(|record| (record.parameter, record.metrics.get(metric)))
            .collect()
    }

    /// Parameters whose records carry all four metrics.
    pub fn complete_parameters(&self) -> Vec<SweepParameter> {
        self.records
            .iter()
            .filter(|record| record.metrics.is_complete())
            .map(|record| record.parameter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_keeps_decimal_point() {
        assert_eq!(render_value(100.0), "100.0");
        assert_eq!(render_value(0.01), "0.01");
        assert_eq!(render_value(12300.0), "12300.0");
    }

    #[test]
    fn missing_metrics_in_column_order() {
        let metrics = MetricQuadruple {
            res: Some(1.0),
            lat: None,
            spfm: Some(0.5),
            lfm: None,
        };
        assert_eq!(metrics.missing_metrics(), vec![Metric::Lat, Metric::Lfm]);
        assert!(!metrics.is_complete());
    }

    #[test]
    fn column_names_roundtrip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_column(metric.column()), Some(metric));
        }
        assert_eq!(Metric::from_column("dram_fit"), None);
    }
}
