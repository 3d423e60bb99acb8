//! Command-line arguments and pipelines shared by the two binaries.

use std::path::Path;

use tracing::info;

use crate::{data::Data, error::Result, merge, rename, select, vep};

/// Filter Variant Effect Predictor (VEP) annotation to keep only the highest
/// impact effect per location.
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
pub struct HighestImpactArgs {
    /// Raw VEP output (tab-separated, optionally gzipped).
    #[arg(long)]
    pub vep:    String,
    /// Comma-separated rename tokens; the first becomes the identifier prefix.
    #[arg(long)]
    pub rename: Option<String>,
    #[arg(long)]
    pub out:    String,
}

/// Annotate regenie output with highest-impact VEP records.
#[derive(Clone, Debug, clap::Parser)]
#[command(version)]
pub struct AnnotateArgs {
    /// Highest-impact VEP table written by `vep_highest_impact`.
    #[arg(long)]
    pub vep:     String,
    #[arg(long)]
    pub regenie: String,
    #[arg(long)]
    pub out:     String,
}

/// Log to stderr at `INFO` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

#[tracing::instrument]
pub fn run_highest_impact(args: &HighestImpactArgs) -> Result<()> {
    // parse before loading so a bad --rename fails fast
    let prefix = args.rename.as_deref().map(rename::parse_prefix).transpose()?;

    let records = vep::read_vep_file(Path::new(&args.vep))?;
    let mut selected = select::select_highest_impact(records);
    info!(len = selected.len(), "Selected highest impact records");
    if let Some(prefix) = prefix {
        rename::rename_variants(&prefix, &mut selected)?;
    }

    info!(out = %args.out, "Writing highest impact table");
    vep::to_data(&selected).write_path(&args.out)
}

#[tracing::instrument]
pub fn run_annotate(args: &AnnotateArgs) -> Result<()> {
    let vep = Data::read_path(&args.vep)?;
    let regenie = Data::read_path(&args.regenie)?;
    info!(
        vep = vep.data.len(),
        regenie = regenie.data.len(),
        "Read input tables"
    );
    let merged = merge::merge_vep_regenie(&vep, &regenie)?;
    info!(out = %args.out, "Writing annotated regenie table");
    merged.write_path(&args.out)
}
