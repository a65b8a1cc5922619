use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use fitsweep_core::{ErrorInfo, SweepError, SweepParameter};
use serde::{Deserialize, Serialize};

use crate::extract::{KeyValueExtractor, MetricExtractor, PatternExtractor};
use crate::invoke::ProcessInvoker;
use crate::params::log_space;

/// Which extractor reads metrics out of the program's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// The four labelled lines (`TOTAL: RES_SUM: ...`, `SPFM:  ...%`).
    #[default]
    Patterns,
    /// Structured `res=<n>` lines.
    KeyValue,
}

impl ExtractorKind {
    pub fn build(&self) -> Result<Box<dyn MetricExtractor>, SweepError> {
        Ok(match self {
            ExtractorKind::Patterns => Box::new(PatternExtractor::new()?),
            ExtractorKind::KeyValue => Box::new(KeyValueExtractor),
        })
    }
}

/// YAML-configurable description of a sweep run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// External simulation program.
    #[serde(default = "SweepPlan::default_executable")]
    pub executable: PathBuf,
    /// Arguments placed before the parameter on every invocation.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "SweepPlan::default_low_exponent")]
    pub low_exponent: f64,
    #[serde(default = "SweepPlan::default_high_exponent")]
    pub high_exponent: f64,
    #[serde(default = "SweepPlan::default_points")]
    pub points: usize,
    /// Destination of the result table.
    #[serde(default = "SweepPlan::default_output")]
    pub output: PathBuf,
    /// Per-invocation timeout; absent means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub extractor: ExtractorKind,
}

impl SweepPlan {
    fn default_executable() -> PathBuf {
        PathBuf::from("build/dram-metrics-refactored")
    }

    const fn default_low_exponent() -> f64 {
        -2.0
    }

    const fn default_high_exponent() -> f64 {
        4.0
    }

    const fn default_points() -> usize {
        20
    }

    fn default_output() -> PathBuf {
        PathBuf::from("results.csv")
    }

    /// Loads a plan from a YAML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, SweepError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SweepError::Plan(
                ErrorInfo::new("plan-read", "failed to read sweep plan")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml(&text).map_err(|err| match err {
            SweepError::Plan(info) => {
                SweepError::Plan(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, SweepError> {
        serde_yaml::from_str(text).map_err(|err| {
            SweepError::Plan(
                ErrorInfo::new("plan-parse", "invalid sweep plan").with_hint(err.to_string()),
            )
        })
    }

    /// Checks the plan without generating or invoking anything.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.executable.as_os_str().is_empty() {
            return Err(SweepError::Plan(ErrorInfo::new(
                "plan-executable",
                "executable path is empty",
            )));
        }
        if self.timeout_secs == Some(0) {
            return Err(SweepError::Plan(
                ErrorInfo::new("plan-timeout", "timeout must be at least one second")
                    .with_hint("omit timeout_secs to wait indefinitely"),
            ));
        }
        self.parameters().map(|_| ())
    }

    /// The ordered sweep values described by this plan.
    pub fn parameters(&self) -> Result<Vec<SweepParameter>, SweepError> {
        log_space(self.low_exponent, self.high_exponent, self.points)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn invoker(&self) -> ProcessInvoker {
        ProcessInvoker::new(&self.executable)
            .with_args(self.args.iter().cloned())
            .with_timeout(self.timeout())
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            executable: Self::default_executable(),
            args: Vec::new(),
            low_exponent: Self::default_low_exponent(),
            high_exponent: Self::default_high_exponent(),
            points: Self::default_points(),
            output: Self::default_output(),
            timeout_secs: None,
            extractor: ExtractorKind::default(),
        }
    }
}
