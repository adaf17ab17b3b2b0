//! Attack ratio per service

use serde::{Deserialize, Serialize};

use crate::error::{KddError, KddResult};
use crate::logic::dataset::Table;
use crate::logic::targets::binary_target;

const SERVICE_COLUMN: &str = "service";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAttackRatio {
    pub service: String,
    pub rows: usize,
    /// Mean of `y_binary` over the service's rows
    pub attack_ratio: f64,
}

/// The `top_n` most frequent services (ties by name) with their attack ratio.
/// Requires derived targets.
pub fn service_attack_ratio(table: &Table, top_n: usize) -> KddResult<Vec<ServiceAttackRatio>> {
    let binary = binary_target(table)?;
    let services = table
        .require(SERVICE_COLUMN)?
        .data
        .as_text()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not a text column", SERVICE_COLUMN)))?;

    let ratios = table
        .value_counts(SERVICE_COLUMN)?
        .into_iter()
        .take(top_n)
        .map(|(service, rows)| {
            let attacks: i64 = services
                .iter()
                .zip(binary)
                .filter(|(s, _)| s.as_deref() == Some(service.as_str()))
                .map(|(_, &b)| b)
                .sum();
            ServiceAttackRatio {
                attack_ratio: attacks as f64 / rows as f64,
                service,
                rows,
            }
        })
        .collect();

    Ok(ratios)
}
