//! Targets Module - Supervised target derivation
//!
//! Turns the raw `label` column into:
//! - `y_binary`    0 for `normal.`, 1 for anything else
//! - `attack_name` the label for attack rows, null for normal rows
//! - `y_family`    the attack family, null for normal rows and unknown labels
//!
//! Normal rows keep a null family here. [`prepare_multiclass`] is the step
//! that assigns the literal `normal` class for multiclass work.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{KddError, KddResult};
use crate::logic::dataset::{Column, ColumnData, Table};
use crate::logic::schema::{
    lookup_family, AttackFamily, TrafficClass, ATTACK_NAME, BINARY_TARGET, LABEL_COLUMN,
    MULTI_TARGET, NORMAL_FAMILY, NORMAL_LABEL,
};

/// Key used when a row has no label at all
const MISSING_LABEL: &str = "<missing>";

// ============================================================================
// UNKNOWN LABEL POLICY
// ============================================================================

/// Handling of attack labels absent from the family table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLabelPolicy {
    /// Family stays null, logged at debug level only
    Null,
    /// Family stays null, every unknown label logged as a warning
    #[default]
    Warn,
    /// Derivation fails with `UnknownLabel`
    Error,
}

impl UnknownLabelPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" | "ignore" => Some(UnknownLabelPolicy::Null),
            "warn" => Some(UnknownLabelPolicy::Warn),
            "error" | "strict" => Some(UnknownLabelPolicy::Error),
            _ => None,
        }
    }
}

// ============================================================================
// DERIVER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct TargetDeriver {
    policy: UnknownLabelPolicy,
}

impl TargetDeriver {
    pub fn new(policy: UnknownLabelPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownLabelPolicy {
        self.policy
    }

    /// Return a copy of `table` with the three derived columns set.
    /// Existing derived columns are recomputed, never duplicated.
    pub fn derive(&self, table: &Table) -> KddResult<Table> {
        let labels = label_column(table)?;

        let mut y_binary = Vec::with_capacity(labels.len());
        let mut attack_name = Vec::with_capacity(labels.len());
        let mut y_family = Vec::with_capacity(labels.len());
        let mut unknown: BTreeMap<&str, usize> = BTreeMap::new();

        for label in labels {
            match label.as_deref() {
                Some(NORMAL_LABEL) => {
                    y_binary.push(0);
                    attack_name.push(None);
                    y_family.push(None);
                }
                Some(name) => {
                    let family = lookup_family(name);
                    if family.is_none() {
                        *unknown.entry(name).or_insert(0) += 1;
                    }
                    y_binary.push(1);
                    attack_name.push(Some(name.to_string()));
                    y_family.push(family.map(|f| f.as_str().to_string()));
                }
                None => {
                    *unknown.entry(MISSING_LABEL).or_insert(0) += 1;
                    y_binary.push(1);
                    attack_name.push(None);
                    y_family.push(None);
                }
            }
        }

        self.apply_policy(&unknown)?;

        table
            .with_column(Column::new(BINARY_TARGET, ColumnData::Int(y_binary)))?
            .with_column(Column::new(ATTACK_NAME, ColumnData::Text(attack_name)))?
            .with_column(Column::new(MULTI_TARGET, ColumnData::Text(y_family)))
    }

    fn apply_policy(&self, unknown: &BTreeMap<&str, usize>) -> KddResult<()> {
        match self.policy {
            UnknownLabelPolicy::Error => {
                if let Some((label, count)) = unknown.iter().next() {
                    return Err(KddError::UnknownLabel {
                        label: label.to_string(),
                        count: *count,
                    });
                }
            }
            UnknownLabelPolicy::Warn => {
                for (label, count) in unknown {
                    log::warn!("Unknown attack label '{}' on {} rows, family left null", label, count);
                }
            }
            UnknownLabelPolicy::Null => {
                if !unknown.is_empty() {
                    log::debug!("{} unknown attack labels left with null family", unknown.len());
                }
            }
        }
        Ok(())
    }
}

/// Derive targets with the default (warn) policy
pub fn add_targets(table: &Table) -> KddResult<Table> {
    TargetDeriver::default().derive(table)
}

fn label_column(table: &Table) -> KddResult<&[Option<String>]> {
    table
        .require(LABEL_COLUMN)?
        .data
        .as_text()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not a text column", LABEL_COLUMN)))
}

// ============================================================================
// LABEL STATISTICS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    pub total: usize,
    pub normal: usize,
    pub attack: usize,
    /// Attack labels without a family, most frequent first
    pub unknown: Vec<(String, usize)>,
}

impl LabelStats {
    pub fn unknown_rows(&self) -> usize {
        self.unknown.iter().map(|(_, n)| n).sum()
    }
}

/// Count normal/attack rows and unknown labels of a raw or derived table
pub fn label_stats(table: &Table) -> KddResult<LabelStats> {
    let labels = label_column(table)?;

    let mut normal = 0;
    let mut unknown: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        match label.as_deref() {
            Some(NORMAL_LABEL) => normal += 1,
            Some(name) if lookup_family(name).is_none() => *unknown.entry(name).or_insert(0) += 1,
            Some(_) => {}
            None => *unknown.entry(MISSING_LABEL).or_insert(0) += 1,
        }
    }

    let mut unknown: Vec<(String, usize)> =
        unknown.into_iter().map(|(l, n)| (l.to_string(), n)).collect();
    unknown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(LabelStats {
        total: labels.len(),
        normal,
        attack: labels.len() - normal,
        unknown,
    })
}

// ============================================================================
// MULTICLASS PREPARATION
// ============================================================================

/// Assign the `normal` family to benign rows and drop rows whose family is
/// still null (unknown attack labels). Requires derived targets.
pub fn prepare_multiclass(table: &Table) -> KddResult<Table> {
    let binary = binary_target(table)?;
    let family = family_column(table)?;

    let patched: Vec<Option<String>> = binary
        .iter()
        .zip(family)
        .map(|(&b, f)| {
            if b == 0 {
                Some(NORMAL_FAMILY.to_string())
            } else {
                f.clone()
            }
        })
        .collect();
    let keep: Vec<bool> = patched.iter().map(Option::is_some).collect();

    let out = table
        .with_column(Column::new(MULTI_TARGET, ColumnData::Text(patched)))?
        .filter_rows(&keep)?;

    let dropped = table.n_rows() - out.n_rows();
    if dropped > 0 {
        log::info!("Multiclass: dropped {} rows with unknown attack family", dropped);
    }
    Ok(out)
}

// ============================================================================
// ACCESSORS
// ============================================================================

pub fn binary_target(table: &Table) -> KddResult<&[i64]> {
    table
        .require(BINARY_TARGET)?
        .data
        .as_ints()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not an integer column", BINARY_TARGET)))
}

fn family_column(table: &Table) -> KddResult<&[Option<String>]> {
    table
        .require(MULTI_TARGET)?
        .data
        .as_text()
        .ok_or_else(|| KddError::InvalidArgument(format!("'{}' is not a text column", MULTI_TARGET)))
}

/// Attack family per row as derived (null for normal and unknown rows)
pub fn family_target(table: &Table) -> KddResult<Vec<Option<AttackFamily>>> {
    family_column(table)?
        .iter()
        .map(|f| match f.as_deref() {
            None => Ok(None),
            Some(name) => AttackFamily::parse(name).map(Some).ok_or_else(|| {
                KddError::InvalidArgument(format!("'{}' is not an attack family", name))
            }),
        })
        .collect()
}

/// Multiclass target of a table produced by [`prepare_multiclass`]
pub fn multiclass_target(table: &Table) -> KddResult<Vec<TrafficClass>> {
    family_column(table)?
        .iter()
        .enumerate()
        .map(|(row, f)| {
            f.as_deref().and_then(TrafficClass::parse).ok_or_else(|| {
                KddError::InvalidArgument(format!(
                    "row {} has no multiclass target ({:?})",
                    row, f
                ))
            })
        })
        .collect()
}
