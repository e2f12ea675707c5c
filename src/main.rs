mod config;
mod data;
mod output;

use anyhow::{Context, Result};

use config::PipelineConfig;
use data::error::TableError;
use data::fill::fill_missing;
use data::loader::load_table;
use data::model::REFERENCE_WAVELENGTHS;
use output::WaterPropsDocument;

fn main() {
    env_logger::init();

    let config = PipelineConfig::default();
    if let Err(e) = run(&config) {
        log::error!("{e:#}");
        if e
            .downcast_ref::<TableError>()
            .is_some_and(TableError::is_missing_join_key)
        {
            log::error!("Source tables disagree on join keys; no output written");
        }
        std::process::exit(1);
    }
}

/// Load, join, fill and write the consolidated water property table.
fn run(config: &PipelineConfig) -> Result<WaterPropsDocument> {
    let mut table = load_table(config).context("building water type table")?;
    if table.is_empty() {
        log::warn!("No water types found in {}", config.scattering_path.display());
    }

    let filled = fill_missing(&mut table, &REFERENCE_WAVELENGTHS);
    log::info!(
        "Synthesized {filled} samples across {} water types",
        table.len()
    );

    let document = WaterPropsDocument::assemble(&table, &REFERENCE_WAVELENGTHS)?;
    document
        .write_to(&config.output_path)
        .with_context(|| format!("writing {}", config.output_path.display()))?;
    log::info!("Wrote {}", config.output_path.display());

    Ok(document)
}
