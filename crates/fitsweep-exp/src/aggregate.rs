use fitsweep_core::{MetricQuadruple, ResultTable, SweepParameter, SweepRecord};

/// Append-only accumulator that turns sweep points into a [`ResultTable`].
///
/// Rows keep their insertion order; nothing is sorted, filtered or merged.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Vec<SweepRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, parameter: SweepParameter, metrics: MetricQuadruple) {
        self.records.push(SweepRecord {
            parameter,
            metrics,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the aggregator; the table is only available once every point is in.
    pub fn finish(self) -> ResultTable {
        ResultTable::from_records(self.records)
    }
}

impl Extend<(SweepParameter, MetricQuadruple)> for ResultAggregator {
    fn extend<I: IntoIterator<Item = (SweepParameter, MetricQuadruple)>>(&mut self, iter: I) {
        for (parameter, metrics) in iter {
            self.push(parameter, metrics);
        }
    }
}

impl FromIterator<(SweepParameter, MetricQuadruple)> for ResultAggregator {
    fn from_iter<I: IntoIterator<Item = (SweepParameter, MetricQuadruple)>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(iter);
        aggregator
    }
}
