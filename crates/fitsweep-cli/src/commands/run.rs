use std::error::Error;
use std::io::{self, Write};

use clap::Args;
use fitsweep_exp::{report, run_plan};

use super::plan::PlanArgs;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// Exit with an error when any sweep point is incomplete.
    #[arg(long)]
    pub fail_on_gaps: bool,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let plan = args.plan.resolve()?;
    let outcome = run_plan(&plan)?;
    outcome.persist(&plan.output)?;

    let mut stdout = io::stdout().lock();
    report::write_report(&outcome.table, &mut stdout)?;
    stdout.flush()?;
    report::write_failures(
        &outcome.failures,
        outcome.table.len(),
        &mut io::stderr().lock(),
    )?;

    if args.fail_on_gaps && !outcome.failures.is_empty() {
        return Err(format!(
            "{} of {} sweep points incomplete",
            outcome.failures.len(),
            outcome.table.len()
        )
        .into());
    }
    Ok(())
}
