use std::error::Error;

use clap::Args;

use super::plan::PlanArgs;

#[derive(Args, Debug)]
pub struct PointsArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
}

pub fn run(args: &PointsArgs) -> Result<(), Box<dyn Error>> {
    let plan = args.plan.resolve()?;
    for parameter in plan.parameters()? {
        println!("{parameter}");
    }
    Ok(())
}
