//! Data distribution check
//!
//! Loads the train and test splits, derives targets and reports the class
//! distributions before and after stratified sampling.

use anyhow::{Context, Result};

use kdd_intrusion_core::config::Config;
use kdd_intrusion_core::constants::{APP_NAME, APP_VERSION};
use kdd_intrusion_core::logic::dataset::load_kdd;
use kdd_intrusion_core::logic::report::{
    fingerprint_file, log_summary, summarize_split, write_report, RunReport,
};
use kdd_intrusion_core::logic::targets::TargetDeriver;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    log::info!("Starting {} v{}", APP_NAME, APP_VERSION);
    log::debug!("Config: {:?}", config);

    let deriver = TargetDeriver::new(config.unknown_labels);
    let mut inputs = Vec::new();
    let mut splits = Vec::new();

    for (split, path) in [("train", &config.train_path), ("test", &config.test_path)] {
        let compression = config.compression.resolve(path);
        let raw = load_kdd(path, compression)
            .with_context(|| format!("loading {} split from {}", split, path.display()))?;
        let table = deriver
            .derive(&raw)
            .with_context(|| format!("deriving targets for {} split", split))?;

        let summary = summarize_split(split, &table, config.sample_fraction, config.seed)
            .with_context(|| format!("summarising {} split", split))?;
        log_summary(&summary);

        inputs.push(fingerprint_file(path).context("fingerprinting input")?);
        splits.push(summary);
    }

    let report = RunReport::new(inputs, splits, config.sample_fraction, config.seed);
    let path = write_report(&report, &config.reports_dir).context("writing report")?;
    log::info!("Done: {}", path.display());

    Ok(())
}
