//! Schema Module - Record layout and label taxonomy
//!
//! - `layout` - the fixed 42-column KDD layout, column kinds, derived column names
//! - `family` - attack label → family lookup

pub mod layout;
pub mod family;

pub use layout::{
    column_index, column_kind, column_name, is_categorical, schema_hash, ColumnKind, SchemaInfo,
    ATTACK_NAME, BINARY_TARGET, CATEGORICAL_COLUMNS, COLUMN_COUNT, FEATURE_COUNT, KDD_COLUMNS,
    LABEL_COLUMN, MULTI_TARGET, NON_FEATURE_COLUMNS, NORMAL_FAMILY, NORMAL_LABEL, SCHEMA_VERSION,
};
pub use family::{is_known_attack, lookup_family, AttackFamily, TrafficClass, ATTACK_FAMILY_TABLE};
