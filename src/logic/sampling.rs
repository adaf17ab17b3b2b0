//! Stratified sampling
//!
//! Seeded per-class shuffles so train/test parts keep the class balance of
//! the source table. Rows keep their original relative order in each part.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{KddError, KddResult};
use crate::logic::dataset::Table;

/// Split `table` into `(train, test)` stratified on `column`
pub fn stratified_split(
    table: &Table,
    column: &str,
    test_fraction: f64,
    seed: u64,
) -> KddResult<(Table, Table)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(KddError::InvalidArgument(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let data = &table.require(column)?.data;

    // Nulls form their own stratum
    let mut strata: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
    for row in 0..table.n_rows() {
        let key = data
            .get(row)
            .filter(|v| !v.is_null())
            .map(|v| v.to_string());
        strata.entry(key).or_default().push(row);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(table.n_rows());
    let mut test = Vec::new();

    for (_, mut rows) in strata {
        rows.shuffle(&mut rng);
        // Floor on the test side so small strata stay in the train part
        let n_test = (rows.len() as f64 * test_fraction).floor() as usize;
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    log::debug!(
        "Stratified split on '{}': {} train / {} test rows",
        column,
        train.len(),
        test.len()
    );

    Ok((table.take_rows(&train)?, table.take_rows(&test)?))
}

/// Keep a stratified `fraction` of the rows; `1.0` keeps everything
pub fn stratified_sample(table: &Table, column: &str, fraction: f64, seed: u64) -> KddResult<Table> {
    if fraction == 1.0 {
        return Ok(table.clone());
    }
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(KddError::InvalidArgument(format!(
            "sample fraction must be in (0, 1], got {}",
            fraction
        )));
    }

    let (kept, _) = stratified_split(table, column, 1.0 - fraction, seed)?;
    Ok(kept)
}
