//! Distribution Summary Builder
//!
//! Counts target distributions of a derived split, samples it, prepares the
//! multiclass view and writes the run report as JSON.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::types::{DistributionSummary, InputFingerprint, RunReport};
use crate::constants::{APP_VERSION, DEFAULT_TOP_SERVICES};
use crate::error::{KddError, KddResult};
use crate::logic::analysis::service_attack_ratio;
use crate::logic::dataset::Table;
use crate::logic::sampling::stratified_sample;
use crate::logic::schema::{SchemaInfo, ATTACK_NAME, BINARY_TARGET, MULTI_TARGET};
use crate::logic::targets::{label_stats, prepare_multiclass};

// ============================================================================
// SPLIT SUMMARY
// ============================================================================

/// Summarise a table that already carries the derived targets
pub fn summarize_split(
    split: &str,
    table: &Table,
    sample_fraction: f64,
    seed: u64,
) -> KddResult<DistributionSummary> {
    let sample = stratified_sample(table, BINARY_TARGET, sample_fraction, seed)?;
    let multiclass = prepare_multiclass(&sample)?;

    Ok(DistributionSummary {
        split: split.to_string(),
        rows: table.n_rows(),
        columns: table.n_cols(),
        labels: label_stats(table)?,
        binary: table.value_counts(BINARY_TARGET)?,
        family: table.value_counts(MULTI_TARGET)?,
        attack_names: table.value_counts(ATTACK_NAME)?,
        services: service_attack_ratio(table, DEFAULT_TOP_SERVICES)?,
        sampled_rows: sample.n_rows(),
        multiclass_rows: multiclass.n_rows(),
        multiclass: multiclass.value_counts(MULTI_TARGET)?,
    })
}

/// Log a summary the way the console check prints it
pub fn log_summary(summary: &DistributionSummary) {
    log::info!(
        "[{}] {} rows x {} cols ({} normal / {} attack)",
        summary.split,
        summary.rows,
        summary.columns,
        summary.labels.normal,
        summary.labels.attack
    );
    log::info!("[{}] y_binary: {:?}", summary.split, summary.binary);
    log::info!("[{}] y_family: {:?}", summary.split, summary.family);
    log::debug!("[{}] attack_name: {:?}", summary.split, summary.attack_names);
    for s in &summary.services {
        log::debug!(
            "[{}] service {}: {} rows, attack ratio {:.3}",
            summary.split,
            s.service,
            s.rows,
            s.attack_ratio
        );
    }

    if !summary.labels.unknown.is_empty() {
        log::warn!(
            "[{}] {} rows carry labels without a family: {:?}",
            summary.split,
            summary.labels.unknown_rows(),
            summary.labels.unknown
        );
    }

    log::info!(
        "[{}] sample {} rows -> multiclass {} rows: {:?}",
        summary.split,
        summary.sampled_rows,
        summary.multiclass_rows,
        summary.multiclass
    );
}

// ============================================================================
// INPUT FINGERPRINT
// ============================================================================

/// SHA-256 of a file's raw bytes (compressed bytes for `.gz` inputs)
pub fn fingerprint_file(path: &Path) -> KddResult<InputFingerprint> {
    let mut file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => KddError::FileNotFound(path.to_path_buf()),
        _ => KddError::Io(e),
    })?;
    let mut hasher = Sha256::new();
    let bytes = std::io::copy(&mut file, &mut hasher)?;

    Ok(InputFingerprint {
        path: path.display().to_string(),
        bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}

// ============================================================================
// RUN REPORT
// ============================================================================

impl RunReport {
    pub fn new(
        inputs: Vec<InputFingerprint>,
        splits: Vec<DistributionSummary>,
        sample_fraction: f64,
        seed: u64,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            app_version: APP_VERSION.to_string(),
            schema: SchemaInfo::current(),
            sample_fraction,
            seed,
            inputs,
            splits,
        }
    }
}

/// Write `report` as pretty JSON into `dir`, returning the file path
pub fn write_report(report: &RunReport, dir: &Path) -> KddResult<PathBuf> {
    fs::create_dir_all(dir)?;

    // timestamp format: YYYY-MM-DD-HHMMSS
    let filename = format!(
        "distribution-{}.json",
        report.generated_at.format("%Y-%m-%d-%H%M%S")
    );
    let path = dir.join(filename);

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)?;

    log::info!("Report {} written to {}", report.run_id, path.display());
    Ok(path)
}
