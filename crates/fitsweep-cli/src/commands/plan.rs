use std::path::PathBuf;

use clap::{Args, ValueEnum};
use fitsweep_core::SweepError;
use fitsweep_exp::{ExtractorKind, SweepPlan};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorArg {
    /// Labelled summary lines (`TOTAL: RES_SUM: ...`).
    Patterns,
    /// `res=<n>` lines.
    KeyValue,
}

impl From<ExtractorArg> for ExtractorKind {
    fn from(value: ExtractorArg) -> Self {
        match value {
            ExtractorArg::Patterns => ExtractorKind::Patterns,
            ExtractorArg::KeyValue => ExtractorKind::KeyValue,
        }
    }
}

/// Sweep plan selection shared by the subcommands. Flags override fields of
/// the `--plan` file, which in turn overrides the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// YAML sweep plan.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Simulator executable.
    #[arg(long)]
    pub executable: Option<PathBuf>,
    /// Argument passed before the parameter; repeat for several.
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,
    /// Lower exponent: the sweep starts at 10^low.
    #[arg(long, allow_negative_numbers = true)]
    pub low: Option<f64>,
    /// Upper exponent: the sweep ends at 10^high.
    #[arg(long, allow_negative_numbers = true)]
    pub high: Option<f64>,
    /// Number of sweep points.
    #[arg(long)]
    pub points: Option<usize>,
    /// Destination of the result table.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Kill an invocation after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    #[arg(long, value_enum)]
    pub extractor: Option<ExtractorArg>,
}

impl PlanArgs {
    pub fn resolve(&self) -> Result<SweepPlan, SweepError> {
        let mut plan = match &self.plan {
            Some(path) => SweepPlan::load(path)?,
            None => SweepPlan::default(),
        };
        if let Some(executable) = &self.executable {
            plan.executable = executable.clone();
        }
        if !self.args.is_empty() {
            plan.args = self.args.clone();
        }
        if let Some(low) = self.low {
            plan.low_exponent = low;
        }
        if let Some(high) = self.high {
            plan.high_exponent = high;
        }
        if let Some(points) = self.points {
            plan.points = points;
        }
        if let Some(out) = &self.out {
            plan.output = out.clone();
        }
        if self.timeout_secs.is_some() {
            plan.timeout_secs = self.timeout_secs;
        }
        if let Some(extractor) = self.extractor {
            plan.extractor = extractor.into();
        }
        plan.validate()?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = PlanArgs {
            low: Some(-1.0),
            points: Some(3),
            extractor: Some(ExtractorArg::KeyValue),
            ..PlanArgs::default()
        };
        let plan = args.resolve().expect("plan");
        assert_eq!(plan.low_exponent, -1.0);
        assert_eq!(plan.high_exponent, 4.0);
        assert_eq!(plan.points, 3);
        assert_eq!(plan.extractor, ExtractorKind::KeyValue);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = PlanArgs {
            points: Some(0),
            ..PlanArgs::default()
        };
        assert_eq!(args.resolve().unwrap_err().code(), "plan-points");
    }
}
