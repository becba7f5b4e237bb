mod cli;
mod error;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use manifest_builder::ManifestBuilder;
use manifest_config::ConfigLoader;
use manifest_metadata::MetadataIndex;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(filter)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

fn working_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.directory {
        Some(dir) => std::path::absolute(dir).or_raise(|| ErrorKind::WorkingDirectory),
        None => std::env::current_dir().or_raise(|| ErrorKind::WorkingDirectory),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let working_dir = working_dir(cli)?;
    let mut loader = ConfigLoader::standard(&working_dir);
    if let Some(path) = &cli.config {
        loader = loader.with_required_file(path).or_raise(|| ErrorKind::Config)?;
    }
    let config = loader.with_env().with_overrides(&cli.overrides()).load().or_raise(|| ErrorKind::Config)?;

    // Step 1: titles. Never fatal; worst case every title is blank.
    let index = MetadataIndex::build(config.metadata_path(&working_dir));

    // Step 2: one row per subdirectory.
    let manifest = ManifestBuilder::new(&config).build(&working_dir, &index).or_raise(|| ErrorKind::Build)?;
    tracing::info!("{}", manifest.stats);

    // Step 3: write it out.
    let output = config.output_path(&working_dir);
    manifest.write(&output).or_raise(|| ErrorKind::Write)?;
    tracing::info!("Successfully created manifest file: {}", output.display());
    Ok(())
}
