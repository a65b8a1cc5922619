#![deny(missing_docs)]
#![doc = "Data model and error types shared by the fitsweep crates."]

pub mod errors;
mod types;

pub use errors::{ErrorInfo, SweepError};
pub use types::{
    render_value, Metric, MetricQuadruple, ResultTable, SweepParameter, SweepRecord,
};
