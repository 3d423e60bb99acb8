use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use vep_regenie_tools::cli::{init_logging, run_annotate, AnnotateArgs};

fn run(args: &AnnotateArgs) -> anyhow::Result<()> {
    run_annotate(args).with_context(|| {
        format!(
            "annotating regenie output {} with {}",
            args.regenie, args.vep
        )
    })
}

fn main() {
    init_logging();

    let args = AnnotateArgs::parse();
    if let Err(e) = run(&args) {
        error!("{e:#}");
        std::process::exit(1);
    }
    info!("Done");
}
