//! Feature engineering stage
//!
//! Derives `age`, `experience`, and `bmi` from the cleaned columns, drops
//! the superseded source columns, and prunes high-cardinality
//! identifier-like columns.
//!
//! `bmi` reproduces the source formula exactly: weight in kilograms over
//! the cleaned height squared, with the height taken as-is.

use crate::data::{Column, ColumnType, Table, Value};
use crate::{HoopsError, Result};
use chrono::Datelike;

/// Game-version strings look like `NBA2k20`; the prefix is swapped for
/// `20` to yield a four-digit year
const VERSION_PREFIX: &str = "NBA2k";

/// Columns superseded by the derived features
const SUPERSEDED_COLUMNS: [&str; 5] = ["version", "b_day", "draft_year", "weight", "height"];

/// Columns exempt from cardinality pruning: the continuous target and the
/// engineered ratio feature
const ALWAYS_RETAINED: [&str; 2] = ["bmi", "salary"];

/// Derive numeric features and prune low-information columns
///
/// Row count is preserved; the derived columns are appended in the order
/// `age`, `experience`, `bmi`.
pub fn engineer(cleaned: Table, max_cardinality: usize) -> Result<Table> {
    let version = cleaned.require("version")?;
    let b_day = cleaned.require("b_day")?;
    let draft_year = cleaned.require("draft_year")?;
    let weight = cleaned.require("weight")?;
    let height = cleaned.require("height")?;

    let n_rows = cleaned.n_rows();
    let mut age = Vec::with_capacity(n_rows);
    let mut experience = Vec::with_capacity(n_rows);
    let mut bmi = Vec::with_capacity(n_rows);

    for row in 0..n_rows {
        let year = version_year(version, &version.values[row])?;
        let birth = date_or_malformed(b_day, &b_day.values[row])?;
        let drafted = date_or_malformed(draft_year, &draft_year.values[row])?;
        let kg = float_or_malformed(weight, &weight.values[row])?;
        let meters = float_or_malformed(height, &height.values[row])?;

        age.push(Value::Float(f64::from(year - birth.year())));
        experience.push(Value::Float(f64::from(year - drafted.year())));
        bmi.push(Value::Float(kg / (meters * meters)));
    }

    let mut table = Table::new();
    for column in cleaned.columns() {
        if SUPERSEDED_COLUMNS.contains(&column.name.as_str()) {
            continue;
        }
        table.push_column(column.clone())?;
    }
    table.push_column(Column::new("age", ColumnType::Float, age))?;
    table.push_column(Column::new("experience", ColumnType::Float, experience))?;
    table.push_column(Column::new("bmi", ColumnType::Float, bmi))?;

    let before = table.n_cols();
    table.retain_columns(|c| {
        ALWAYS_RETAINED.contains(&c.name.as_str()) || c.distinct_count() <= max_cardinality
    });
    log::debug!(
        "engineered features; cardinality pruning dropped {} of {} columns",
        before - table.n_cols(),
        before
    );

    Ok(table)
}

fn version_year(column: &Column, value: &Value) -> Result<i32> {
    let malformed = || HoopsError::MalformedField {
        column: column.name.clone(),
        value: value.as_str().unwrap_or("<missing>").to_string(),
    };
    let s = value.as_str().ok_or_else(malformed)?;
    let suffix = s.strip_prefix(VERSION_PREFIX).ok_or_else(malformed)?;
    format!("20{}", suffix).parse().map_err(|_| malformed())
}

fn date_or_malformed(column: &Column, value: &Value) -> Result<chrono::NaiveDate> {
    value.as_date().ok_or_else(|| HoopsError::MalformedField {
        column: column.name.clone(),
        value: value.as_str().unwrap_or("<missing>").to_string(),
    })
}

fn float_or_malformed(column: &Column, value: &Value) -> Result<f64> {
    value.as_float().ok_or_else(|| HoopsError::MalformedField {
        column: column.name.clone(),
        value: value.as_str().unwrap_or("<missing>").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_MAX_CARDINALITY;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn make_cleaned() -> Table {
        Table::from_columns(vec![
            Column::new(
                "b_day",
                ColumnType::Date,
                vec![date(1990, 12, 31), date(1991, 2, 2)],
            ),
            Column::new(
                "draft_year",
                ColumnType::Date,
                vec![date(2010, 1, 1), date(2012, 1, 1)],
            ),
            Column::new(
                "team",
                ColumnType::Category,
                vec![
                    Value::Category("No Team".into()),
                    Value::Category("Lakers".into()),
                ],
            ),
            Column::new(
                "height",
                ColumnType::Float,
                vec![Value::Float(2.11), Value::Float(1.96)],
            ),
            Column::new(
                "weight",
                ColumnType::Float,
                vec![Value::Float(109.8), Value::Float(99.8)],
            ),
            Column::new(
                "salary",
                ColumnType::Float,
                vec![Value::Float(1_000_000.0), Value::Float(2_000_000.0)],
            ),
            Column::new(
                "country",
                ColumnType::Category,
                vec![Value::Category("USA".into()), Value::Category("Not-USA".into())],
            ),
            Column::new(
                "draft_round",
                ColumnType::Category,
                vec![Value::Category("1".into()), Value::Category("0".into())],
            ),
            Column::new(
                "version",
                ColumnType::Text,
                vec![Value::Text("NBA2k20".into()), Value::Text("NBA2k21".into())],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn derives_age_experience_and_bmi() {
        let engineered = engineer(make_cleaned(), DEFAULT_MAX_CARDINALITY).unwrap();
        assert_eq!(engineered.n_rows(), 2);

        let age = engineered.column("age").unwrap();
        assert_eq!(age.values[0].as_float(), Some(30.0)); // 2020 - 1990
        assert_eq!(age.values[1].as_float(), Some(30.0)); // 2021 - 1991

        let experience = engineered.column("experience").unwrap();
        assert_eq!(experience.values[0].as_float(), Some(10.0)); // 2020 - 2010
        assert_eq!(experience.values[1].as_float(), Some(9.0)); // 2021 - 2012

        let bmi = engineered.column("bmi").unwrap();
        assert_eq!(bmi.values[0].as_float(), Some(109.8 / (2.11 * 2.11)));
        assert_eq!(bmi.values[1].as_float(), Some(99.8 / (1.96 * 1.96)));
    }

    #[test]
    fn drops_superseded_columns() {
        let engineered = engineer(make_cleaned(), DEFAULT_MAX_CARDINALITY).unwrap();
        for name in SUPERSEDED_COLUMNS {
            assert!(!engineered.has_column(name), "{} should be dropped", name);
        }
        assert_eq!(
            engineered.column_names(),
            vec!["team", "salary", "country", "draft_round", "age", "experience", "bmi"]
        );
    }

    #[test]
    fn high_cardinality_columns_are_pruned() {
        let mut cleaned = make_cleaned();
        cleaned
            .push_column(Column::new(
                "full_name",
                ColumnType::Text,
                vec![
                    Value::Text("LeBron James".into()),
                    Value::Text("Kevin Durant".into()),
                ],
            ))
            .unwrap();
        // Two distinct names exceed a cardinality cap of one
        let engineered = engineer(cleaned, 1).unwrap();
        assert!(!engineered.has_column("full_name"));
    }

    #[test]
    fn bmi_and_salary_survive_any_cardinality_cap() {
        let engineered = engineer(make_cleaned(), 0).unwrap();
        assert_eq!(engineered.column_names(), vec!["salary", "bmi"]);
    }

    #[test]
    fn bad_version_string_is_rejected() {
        let mut cleaned = make_cleaned();
        cleaned.drop_column("version");
        cleaned
            .push_column(Column::new(
                "version",
                ColumnType::Text,
                vec![Value::Text("2k20".into()), Value::Text("NBA2k21".into())],
            ))
            .unwrap();
        let err = engineer(cleaned, DEFAULT_MAX_CARDINALITY).unwrap_err();
        assert!(matches!(err, HoopsError::MalformedField { .. }));
    }

    #[test]
    fn missing_version_column_is_a_schema_error() {
        let mut cleaned = make_cleaned();
        cleaned.drop_column("version");
        let err = engineer(cleaned, DEFAULT_MAX_CARDINALITY).unwrap_err();
        assert!(matches!(err, HoopsError::Schema(_)));
    }
}
