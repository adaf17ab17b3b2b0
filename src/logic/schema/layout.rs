//! Record Layout - Centralized Column Definition
//!
//! **CRITICAL: This file controls the record schema**
//!
//! ## Rules:
//! 1. Add column → increment SCHEMA_VERSION
//! 2. Change order → increment SCHEMA_VERSION
//! 3. Remove column → increment SCHEMA_VERSION
//!
//! Reports carry the version and hash so results produced from different
//! layouts can be told apart.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current record layout version
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// COLUMN LAYOUT (Authoritative source)
// ============================================================================

/// Column names in the exact order they appear on each input line
pub const KDD_COLUMNS: &[&str] = &[
    // === Basic connection (0-8) ===
    "duration",
    "protocol_type",
    "service",
    "flag",
    "src_bytes",
    "dst_bytes",
    "land",
    "wrong_fragment",
    "urgent",

    // === Content (9-21) ===
    "hot",
    "num_failed_logins",
    "logged_in",
    "num_compromised",
    "root_shell",
    "su_attempted",
    "num_root",
    "num_file_creations",
    "num_shells",
    "num_access_files",
    "num_outbound_cmds",
    "is_host_login",
    "is_guest_login",

    // === Time-window traffic (22-30) ===
    "count",
    "srv_count",
    "serror_rate",
    "srv_serror_rate",
    "rerror_rate",
    "srv_rerror_rate",
    "same_srv_rate",
    "diff_srv_rate",
    "srv_diff_host_rate",

    // === Host-window traffic (31-40) ===
    "dst_host_count",
    "dst_host_srv_count",
    "dst_host_same_srv_rate",
    "dst_host_diff_srv_rate",
    "dst_host_same_src_port_rate",
    "dst_host_srv_diff_host_rate",
    "dst_host_serror_rate",
    "dst_host_srv_serror_rate",
    "dst_host_rerror_rate",
    "dst_host_srv_rerror_rate",

    // === Target (41) ===
    "label",
];

/// Total number of columns per line
/// IMPORTANT: Must match KDD_COLUMNS.len()!
pub const COLUMN_COUNT: usize = 42;

/// Number of feature columns (everything except the label)
pub const FEATURE_COUNT: usize = COLUMN_COUNT - 1;

/// Raw label column
pub const LABEL_COLUMN: &str = "label";

/// Columns routed to categorical preprocessing
pub const CATEGORICAL_COLUMNS: &[&str] = &["protocol_type", "service", "flag"];

/// The only label treated as benign traffic
pub const NORMAL_LABEL: &str = "normal.";

/// Family assigned to benign rows when building a multiclass target
pub const NORMAL_FAMILY: &str = "normal";

// Derived target columns
pub const BINARY_TARGET: &str = "y_binary";
pub const ATTACK_NAME: &str = "attack_name";
pub const MULTI_TARGET: &str = "y_family";

/// Columns that never enter the feature table
pub const NON_FEATURE_COLUMNS: &[&str] = &[LABEL_COLUMN, ATTACK_NAME, BINARY_TARGET, MULTI_TARGET];

// ============================================================================
// COLUMN KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Label,
}

/// Kind of a schema column, `None` for names outside the layout
pub fn column_kind(name: &str) -> Option<ColumnKind> {
    if name == LABEL_COLUMN {
        Some(ColumnKind::Label)
    } else if is_categorical(name) {
        Some(ColumnKind::Categorical)
    } else if column_index(name).is_some() {
        Some(ColumnKind::Numeric)
    } else {
        None
    }
}

pub fn is_categorical(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name)
}

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// Compute CRC32 hash of the column layout
pub fn schema_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[SCHEMA_VERSION]);

    for name in KDD_COLUMNS {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

/// Layout information for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub version: u8,
    pub hash: u32,
    pub column_count: usize,
    pub categorical: Vec<String>,
}

impl SchemaInfo {
    pub fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            hash: schema_hash(),
            column_count: COLUMN_COUNT,
            categorical: CATEGORICAL_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SchemaInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// COLUMN INDEX LOOKUP
// ============================================================================

/// Get column index by name
pub fn column_index(name: &str) -> Option<usize> {
    KDD_COLUMNS.iter().position(|&n| n == name)
}

/// Get column name by index
pub fn column_name(index: usize) -> Option<&'static str> {
    KDD_COLUMNS.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================
