pub mod extract;
pub mod points;
pub mod plan;
pub mod report;
pub mod run;
