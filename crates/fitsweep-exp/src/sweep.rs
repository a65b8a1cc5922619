use std::path::Path;

use fitsweep_core::{MetricQuadruple, ResultTable, SweepError, SweepParameter};
use tracing::{error, info, warn};

use crate::aggregate::ResultAggregator;
use crate::extract::{missing_metrics_error, MetricExtractor};
use crate::invoke::SimulationInvoker;
use crate::persist::write_table;
use crate::plan::SweepPlan;

/// A sweep point that produced an incomplete record.
#[derive(Debug, Clone, PartialEq)]
pub struct PointFailure {
    pub parameter: SweepParameter,
    pub error: SweepError,
}

/// Result of a sweep: one row per parameter plus the points that fell short.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub table: ResultTable,
    pub failures: Vec<PointFailure>,
}

impl SweepOutcome {
    /// Parameters whose rows carry all four metrics.
    pub fn succeeded(&self) -> Vec<SweepParameter> {
        self.table.complete_parameters()
    }

    /// Writes the table to `path`. On failure the error is logged together with
    /// the points that did succeed before being returned.
    pub fn persist(&self, path: &Path) -> Result<(), SweepError> {
        write_table(&self.table, path).map_err(|err| {
            let succeeded: Vec<String> = self.succeeded().iter().map(|p| p.to_arg()).collect();
            error!(
                path = %path.display(),
                succeeded = %succeeded.join(","),
                "failed to persist result table: {err}"
            );
            err
        })?;
        info!(path = %path.display(), rows = self.table.len(), "result table written");
        Ok(())
    }
}

/// Runs every parameter through the invoker and extractor, strictly in order.
///
/// Invocation and extraction failures are recorded against their point and
/// the sweep moves on; a failed invocation yields a row with every metric
/// missing.
pub fn run_sweep(
    parameters: &[SweepParameter],
    invoker: &dyn SimulationInvoker,
    extractor: &dyn MetricExtractor,
) -> SweepOutcome {
    info!(points = parameters.len(), "starting sweep");
    let mut aggregator = ResultAggregator::with_capacity(parameters.len());
    let mut failures = Vec::new();
    for (idx, parameter) in parameters.iter().copied().enumerate() {
        let metrics = match invoker.invoke(parameter) {
            Ok(output) => {
                let metrics = extractor.extract(&output);
                if let Some(err) = missing_metrics_error(parameter, &metrics) {
                    warn!(point = idx, dram_fit = %parameter, "{err}");
                    failures.push(PointFailure {
                        parameter,
                        error: err,
                    });
                }
                metrics
            }
            Err(err) => {
                warn!(point = idx, dram_fit = %parameter, "{err}");
                failures.push(PointFailure {
                    parameter,
                    error: err,
                });
                MetricQuadruple::missing()
            }
        };
        aggregator.push(parameter, metrics);
    }
    let table = aggregator.finish();
    info!(
        rows = table.len(),
        failed = failures.len(),
        "sweep finished"
    );
    SweepOutcome { table, failures }
}

/// Validates the plan and sweeps it with a process invoker and the
/// configured extractor.
pub fn run_plan(plan: &SweepPlan) -> Result<SweepOutcome, SweepError> {
    plan.validate()?;
    let parameters = plan.parameters()?;
    let extractor = plan.extractor.build()?;
    let invoker = plan.invoker();
    info!(
        executable = %invoker.executable().display(),
        low_exponent = plan.low_exponent,
        high_exponent = plan.high_exponent,
        "sweep plan resolved"
    );
    Ok(run_sweep(&parameters, &invoker, extractor.as_ref()))
}

#[cfg(test)]
mod tests {
    use fitsweep_core::SweepRecord;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn persist_into_directory_is_persistence_error() {
        let outcome = SweepOutcome {
            table: ResultTable::from_records(vec![SweepRecord {
                parameter: SweepParameter::new(0.01),
                metrics: MetricQuadruple {
                    res: Some(100.0),
                    lat: Some(2.5),
                    spfm: Some(0.001),
                    lfm: Some(0.002),
                },
            }]),
            failures: Vec::new(),
        };
        let dir = tempdir().unwrap();
        let err = outcome.persist(dir.path()).unwrap_err();
        assert!(matches!(err, SweepError::Persistence(_)));
        assert_eq!(err.code(), "persist-create");
        assert_eq!(outcome.succeeded(), vec![SweepParameter::new(0.01)]);
    }
}
