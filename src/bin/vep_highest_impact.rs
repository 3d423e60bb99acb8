use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use vep_regenie_tools::cli::{init_logging, run_highest_impact, HighestImpactArgs};

fn run(args: &HighestImpactArgs) -> anyhow::Result<()> {
    run_highest_impact(args).with_context(|| format!("processing VEP output {}", args.vep))
}

fn main() {
    init_logging();

    let args = HighestImpactArgs::parse();
    if let Err(e) = run(&args) {
        error!("{e:#}");
        std::process::exit(1);
    }
    info!("Done");
}
