mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cladesort::batch::{BatchConfig, run_batch};
use cladesort::taxonomy::Taxonomy;
use cli::Args;
use tracing::{Level, info};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let taxonomy = match &args.taxonomy {
        Some(path) => Taxonomy::from_toml_file(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => Taxonomy::default(),
    };
    info!(
        groups = taxonomy.num_groups(),
        taxa = taxonomy.num_taxa(),
        signatures = taxonomy.signatures().len(),
        "Taxonomy loaded"
    );

    let config = BatchConfig::new(&args.input_folder, &args.output_base)
        .with_jobs(args.jobs)
        .with_copy_files(!args.no_copy)
        .with_summary_name(args.summary_name);

    let report = run_batch(&config, &taxonomy).context("Classification failed")?;
    println!(
        "Classification complete. Summary saved to {}",
        report.summary_path.display()
    );

    Ok(())
}
