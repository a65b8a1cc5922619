use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    extract::{self, ExtractArgs},
    points::{self, PointsArgs},
    report::{self, ReportArgs},
    run::{self, RunArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "fitsweep", about = "Sweep an external simulator over dram_fit values")]
struct Cli {
    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sweep, write the result table and print the report.
    Run(RunArgs),
    /// Print the sweep parameters without invoking the simulator.
    Points(PointsArgs),
    /// Extract the metrics from a saved simulator output.
    Extract(ExtractArgs),
    /// Print the report for an existing result table.
    Report(ReportArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level)?;
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Points(args) => points::run(&args),
        Command::Extract(args) => extract::run(&args),
        Command::Report(args) => report::run(&args),
    }
}
