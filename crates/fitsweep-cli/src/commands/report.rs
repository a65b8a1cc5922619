use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Args;
use fitsweep_exp::{read_table, report};

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Result table written by `fitsweep run`.
    #[arg(long, default_value = "results.csv")]
    pub input: PathBuf,
}

pub fn run(args: &ReportArgs) -> Result<(), Box<dyn Error>> {
    let table = read_table(&args.input)?;
    report::write_report(&table, &mut io::stdout().lock())?;
    Ok(())
}
