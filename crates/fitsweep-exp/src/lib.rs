//! Parameter-sweep pipeline: generate values, run the simulator once per
//! value, extract its metrics, and collect them into a persisted table.

mod aggregate;
pub mod extract;
mod invoke;
mod params;
mod persist;
mod plan;
pub mod report;
mod sweep;

pub use aggregate::ResultAggregator;
pub use extract::{KeyValueExtractor, MetricExtractor, PatternExtractor};
pub use invoke::{ProcessInvoker, SimulationInvoker};
pub use params::log_space;
pub use persist::{read_table, write_table};
pub use plan::{ExtractorKind, SweepPlan};
pub use sweep::{run_plan, run_sweep, PointFailure, SweepOutcome};
