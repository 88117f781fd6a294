//! The four-stage transform pipeline
//!
//! Raw table → cleaned table → engineered table → pruned table →
//! (feature matrix, target vector). Each stage fully consumes its input
//! and produces a fresh table; a failure in any stage aborts the run with
//! no partial output.

pub mod clean;
pub mod collinear;
pub mod engineer;
pub mod stats;
pub mod transform;

pub use clean::clean;
pub use collinear::prune_collinear;
pub use engineer::engineer;
pub use transform::transform;

use crate::data::{FeatureMatrix, Table};
use crate::{PipelineConfig, Result};

/// Run all four stages in sequence
pub fn preprocess(raw: Table, config: &PipelineConfig) -> Result<(FeatureMatrix, Vec<f64>)> {
    let n_rows = raw.n_rows();
    let cleaned = clean::clean(raw)?;
    let engineered = engineer::engineer(cleaned, config.max_cardinality)?;
    let pruned = collinear::prune_collinear(engineered, config.correlation_threshold)?;
    let (matrix, target) = transform::transform(pruned)?;
    log::info!(
        "preprocessed {} rows into {} feature columns",
        n_rows,
        matrix.n_cols()
    );
    Ok((matrix, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, ColumnType, Value};
    use crate::HoopsError;

    fn text_column(name: &str, values: &[Option<&str>]) -> Column {
        Column::new(
            name,
            ColumnType::Text,
            values
                .iter()
                .map(|v| match v {
                    Some(s) => Value::Text(s.to_string()),
                    None => Value::Missing,
                })
                .collect(),
        )
    }

    /// Four players over two game versions; the engineered age,
    /// experience, and bmi columns are mutually uncorrelated so that no
    /// collinearity pruning fires.
    fn make_raw() -> Table {
        Table::from_columns(vec![
            text_column(
                "b_day",
                &[
                    Some("06/15/95"),
                    Some("07/20/93"),
                    Some("01/10/95"),
                    Some("03/05/93"),
                ],
            ),
            text_column(
                "draft_year",
                &[Some("2018"), Some("2018"), Some("2016"), Some("2016")],
            ),
            text_column("team", &[Some("Lakers"), None, Some("Lakers"), Some("Celtics")]),
            text_column(
                "height",
                &[
                    Some("6-7 / 2.0"),
                    Some("6-7 / 2.0"),
                    Some("6-7 / 2.0"),
                    Some("6-7 / 2.0"),
                ],
            ),
            text_column(
                "weight",
                &[
                    Some("212 lbs. / 96.0 kg."),
                    Some("229 lbs. / 104.0 kg."),
                    Some("229 lbs. / 104.0 kg."),
                    Some("212 lbs. / 96.0 kg."),
                ],
            ),
            text_column(
                "salary",
                &[
                    Some("$1000000"),
                    Some("$2000000"),
                    Some("$3000000"),
                    Some("$4000000"),
                ],
            ),
            text_column(
                "country",
                &[Some("USA"), Some("Canada"), Some("USA"), Some("Spain")],
            ),
            text_column("draft_round", &[Some("1"), Some("2"), Some("Undrafted"), Some("1")]),
            text_column(
                "version",
                &[
                    Some("NBA2k20"),
                    Some("NBA2k20"),
                    Some("NBA2k20"),
                    Some("NBA2k20"),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn end_to_end_produces_a_model_ready_matrix() {
        let (matrix, target) = preprocess(make_raw(), &PipelineConfig::default()).unwrap();

        assert_eq!(target, vec![1_000_000.0, 2_000_000.0, 3_000_000.0, 4_000_000.0]);
        assert_eq!(matrix.n_rows(), 4);
        assert_eq!(
            matrix.column_names(),
            vec![
                "age",
                "experience",
                "bmi",
                "Celtics",
                "Lakers",
                "No Team",
                "Not-USA",
                "USA",
                "0",
                "1",
                "2",
            ]
        );

        // ages [25,27,25,27], experience [2,2,4,4], bmi [24,26,26,24]:
        // each has mean at the midpoint and unit population std
        assert_eq!(matrix.column("age").unwrap(), &[-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(matrix.column("experience").unwrap(), &[-1.0, -1.0, 1.0, 1.0]);
        assert_eq!(matrix.column("bmi").unwrap(), &[-1.0, 1.0, 1.0, -1.0]);

        assert_eq!(matrix.column("No Team").unwrap(), &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(matrix.column("USA").unwrap(), &[1.0, 0.0, 1.0, 0.0]);
        assert_eq!(matrix.column("0").unwrap(), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn stage_errors_propagate_to_the_caller() {
        let mut raw = make_raw();
        raw.drop_column("salary");
        raw.push_column(text_column(
            "salary",
            &[Some("$1000000"), Some("confidential"), Some("$3000000"), Some("$4000000")],
        ))
        .unwrap();

        let err = preprocess(raw, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, HoopsError::MalformedField { .. }));
    }
}
