//! Final encoding stage
//!
//! Splits off the salary target, standardizes the remaining numeric
//! columns (zero mean, unit variance, population standard deviation), and
//! one-hot encodes the categorical columns into binary indicator columns
//! named after the category values.
//!
//! Indicator names share one flat namespace. The first column to emit a
//! category keeps the bare name; a later column re-using the same value
//! emits `<column>_<category>` instead.

use crate::data::{ColumnType, FeatureMatrix, Table};
use crate::pipeline::stats;
use crate::{HoopsError, Result};
use std::collections::{BTreeSet, HashSet};

const TARGET: &str = "salary";

/// Encode the pruned table into a feature matrix and target vector
///
/// Output column order: standardized numeric columns in table order,
/// then one-hot groups in source-column order with categories sorted.
/// A numeric column with zero variance is rejected with
/// [`HoopsError::DegenerateColumn`] rather than silently emitting zeros.
pub fn transform(pruned: Table) -> Result<(FeatureMatrix, Vec<f64>)> {
    let salary = pruned.require(TARGET)?;
    if salary.ty != ColumnType::Float {
        return Err(HoopsError::Schema(format!(
            "target column '{}' must be numeric, found {}",
            TARGET, salary.ty
        )));
    }
    let target = salary.float_values();

    let mut matrix = FeatureMatrix::new();

    for column in pruned.columns() {
        if column.ty != ColumnType::Float || column.name == TARGET {
            continue;
        }
        let xs = column.float_values();
        let m = stats::mean(&xs);
        let s = stats::population_std(&xs);
        if s == 0.0 {
            return Err(HoopsError::DegenerateColumn(column.name.clone()));
        }
        matrix.push(&column.name, xs.iter().map(|x| (x - m) / s).collect());
    }

    let mut used: HashSet<String> = matrix
        .column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    for column in pruned.columns() {
        if column.ty == ColumnType::Float {
            continue;
        }
        let labels = column
            .values
            .iter()
            .map(|v| {
                v.category_label().ok_or_else(|| HoopsError::MalformedField {
                    column: column.name.clone(),
                    value: "<missing>".to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let categories: BTreeSet<&String> = labels.iter().collect();
        for category in categories {
            let name = if used.insert(category.clone()) {
                category.clone()
            } else {
                format!("{}_{}", column.name, category)
            };
            let indicator = labels
                .iter()
                .map(|l| if l == category { 1.0 } else { 0.0 })
                .collect();
            matrix.push(name, indicator);
        }
    }

    log::debug!(
        "transformed {} rows into {} feature columns",
        target.len(),
        matrix.n_cols()
    );
    Ok((matrix, target))
}
