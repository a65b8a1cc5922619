use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use fitsweep_core::{render_value, Metric};
use fitsweep_exp::ExtractorKind;
use tracing::warn;

use super::plan::ExtractorArg;

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File holding captured simulator output.
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long, value_enum, default_value = "patterns")]
    pub extractor: ExtractorArg,
}

pub fn run(args: &ExtractArgs) -> Result<(), Box<dyn Error>> {
    let output = fs::read_to_string(&args.input)?;
    let extractor = ExtractorKind::from(args.extractor).build()?;
    let metrics = extractor.extract(&output);
    for metric in Metric::ALL {
        match metrics.get(metric) {
            Some(value) => println!("{metric}={}", render_value(value)),
            None => {
                warn!(input = %args.input.display(), "{metric} not found");
                println!("{metric}=null");
            }
        }
    }
    Ok(())
}
