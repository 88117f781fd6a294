//! Multicollinearity pruning stage
//!
//! Drops one column of every highly correlated feature pair. Candidate
//! pairs are enumerated in row-major upper-triangle order of the table's
//! column order; that order is part of the contract, since it decides
//! which of two perfectly correlated columns survives.

use crate::data::{ColumnType, Table};
use crate::pipeline::stats;
use crate::Result;
use std::collections::HashSet;

/// Name of the target column; never pruned, and the referee when a pair
/// must lose a member
const TARGET: &str = "salary";

/// Drop redundant numeric features whose pairwise absolute Pearson
/// correlation exceeds `threshold`
///
/// For each candidate pair still fully present, the member whose
/// correlation with the target is the algebraic minimum is dropped; on a
/// tie the first member of the pair loses. Re-running on the output with
/// the same threshold is a no-op.
pub fn prune_collinear(table: Table, threshold: f64) -> Result<Table> {
    let salary = table.require(TARGET)?.float_values();

    let features: Vec<(String, Vec<f64>)> = table
        .columns()
        .iter()
        .filter(|c| c.ty == ColumnType::Float && c.name != TARGET)
        .map(|c| (c.name.clone(), c.float_values()))
        .collect();

    if features.len() < 2 {
        return Ok(table);
    }

    // Upper triangle, row-major: (0,1), (0,2), ..., (1,2), ...
    let mut candidates = Vec::new();
    for i in 0..features.len() {
        for j in (i + 1)..features.len() {
            let corr = stats::pearson(&features[i].1, &features[j].1);
            if corr.abs() > threshold {
                candidates.push((i, j, corr));
            }
        }
    }

    let mut dropped: HashSet<usize> = HashSet::new();
    for (i, j, corr) in candidates {
        if dropped.contains(&i) || dropped.contains(&j) {
            continue;
        }
        let corr_i = stats::pearson(&salary, &features[i].1);
        let corr_j = stats::pearson(&salary, &features[j].1);
        // A NaN target correlation is never the minimum
        let victim = match (corr_i.is_nan(), corr_j.is_nan()) {
            (true, false) => j,
            (false, true) => i,
            _ => {
                if corr_i <= corr_j {
                    i
                } else {
                    j
                }
            }
        };
        log::debug!(
            "collinear pair ({}, {}) corr={:.3}: dropping '{}'",
            features[i].0,
            features[j].0,
            corr,
            features[victim].0
        );
        dropped.insert(victim);
    }

    if dropped.is_empty() {
        return Ok(table);
    }

    let dropped_names: HashSet<&str> = dropped.iter().map(|&i| features[i].0.as_str()).collect();
    log::info!(
        "collinearity pruning dropped {} of {} numeric features",
        dropped_names.len(),
        features.len()
    );

    let mut pruned = table;
    pruned.retain_columns(|c| !dropped_names.contains(c.name.as_str()));
    Ok(pruned)
}
