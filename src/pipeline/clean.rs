//! Cleaning stage
//!
//! Normalizes the raw mixed-format player fields into typed columns:
//! dates are parsed, compound height/weight strings are reduced to their
//! metric component, the salary loses its currency symbol, and the
//! country and draft-round categories are collapsed.

use crate::data::{Column, ColumnType, Table, Value};
use crate::{HoopsError, Result};
use chrono::NaiveDate;

/// Birth dates arrive as month/day/two-digit-year, e.g. `12/31/90`
const BIRTH_DATE_FORMAT: &str = "%m/%d/%y";

/// Sentinel for players without a team
const NO_TEAM: &str = "No Team";

/// Columns the cleaner rewrites; all must be present in the input
const CLEANED_COLUMNS: [&str; 8] = [
    "b_day",
    "draft_year",
    "team",
    "height",
    "weight",
    "salary",
    "country",
    "draft_round",
];

/// Normalize raw heterogeneous fields into typed columns
///
/// Row count and column order are preserved; only the listed columns
/// change representation. Fails atomically on the first malformed value.
pub fn clean(raw: Table) -> Result<Table> {
    for name in CLEANED_COLUMNS {
        raw.require(name)?;
    }

    let mut columns = Vec::with_capacity(raw.n_cols());
    for column in raw.columns() {
        let cleaned = match column.name.as_str() {
            "b_day" => parse_birth_dates(column)?,
            "draft_year" => parse_draft_years(column)?,
            "team" => fill_team(column),
            "height" => parse_compound_float(column, 2)?,
            "weight" => parse_compound_float(column, 3)?,
            "salary" => parse_salary(column)?,
            "country" => collapse_country(column),
            "draft_round" => normalize_draft_round(column),
            _ => column.clone(),
        };
        columns.push(cleaned);
    }

    log::debug!("cleaned {} rows", raw.n_rows());
    Table::from_columns(columns)
}

/// Textual form of a raw value for error messages
fn raw_text(value: &Value) -> String {
    value.as_str().unwrap_or("<missing>").to_string()
}

fn text_or_malformed<'a>(column: &Column, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| HoopsError::MalformedField {
        column: column.name.clone(),
        value: raw_text(value),
    })
}

fn parse_birth_dates(column: &Column) -> Result<Column> {
    let values = column
        .values
        .iter()
        .map(|v| {
            let s = v.as_str().ok_or_else(|| HoopsError::MalformedDate {
                column: column.name.clone(),
                value: raw_text(v),
            })?;
            let date = NaiveDate::parse_from_str(s, BIRTH_DATE_FORMAT).map_err(|_| {
                HoopsError::MalformedDate {
                    column: column.name.clone(),
                    value: s.to_string(),
                }
            })?;
            Ok(Value::Date(date))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(column.name.clone(), ColumnType::Date, values))
}

/// Draft years are bare four-digit years; they become January 1st dates
fn parse_draft_years(column: &Column) -> Result<Column> {
    let values = column
        .values
        .iter()
        .map(|v| {
            let s = v.as_str().ok_or_else(|| HoopsError::MalformedDate {
                column: column.name.clone(),
                value: raw_text(v),
            })?;
            let year: i32 = s.trim().parse().map_err(|_| HoopsError::MalformedDate {
                column: column.name.clone(),
                value: s.to_string(),
            })?;
            let date =
                NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| HoopsError::MalformedDate {
                    column: column.name.clone(),
                    value: s.to_string(),
                })?;
            Ok(Value::Date(date))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(column.name.clone(), ColumnType::Date, values))
}

fn fill_team(column: &Column) -> Column {
    let values = column
        .values
        .iter()
        .map(|v| match v {
            Value::Missing => Value::Category(NO_TEAM.to_string()),
            Value::Text(s) | Value::Category(s) => Value::Category(s.clone()),
            other => other.clone(),
        })
        .collect();
    Column::new(column.name.clone(), ColumnType::Category, values)
}

/// Extract one whitespace-separated token of a compound field as a float
///
/// Height `"6-11 / 2.11"` keeps token 2 (meters); weight
/// `"242 lbs. / 109.8 kg."` keeps token 3 (kilograms).
fn parse_compound_float(column: &Column, token_index: usize) -> Result<Column> {
    let values = column
        .values
        .iter()
        .map(|v| {
            let s = text_or_malformed(column, v)?;
            let token =
                s.split_whitespace()
                    .nth(token_index)
                    .ok_or_else(|| HoopsError::MalformedField {
                        column: column.name.clone(),
                        value: s.to_string(),
                    })?;
            let parsed: f64 = token.parse().map_err(|_| HoopsError::MalformedField {
                column: column.name.clone(),
                value: s.to_string(),
            })?;
            Ok(Value::Float(parsed))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(column.name.clone(), ColumnType::Float, values))
}

fn parse_salary(column: &Column) -> Result<Column> {
    let values = column
        .values
        .iter()
        .map(|v| {
            let s = text_or_malformed(column, v)?;
            let amount: f64 = s.strip_prefix('$').unwrap_or(s).parse().map_err(|_| {
                HoopsError::MalformedField {
                    column: column.name.clone(),
                    value: s.to_string(),
                }
            })?;
            Ok(Value::Float(amount))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::new(column.name.clone(), ColumnType::Float, values))
}

/// Binary collapse: exactly `"USA"` survives, everything else
/// (including a missing value) becomes `"Not-USA"`
fn collapse_country(column: &Column) -> Column {
    let values = column
        .values
        .iter()
        .map(|v| {
            let label = match v.as_str() {
                Some("USA") => "USA",
                _ => "Not-USA",
            };
            Value::Category(label.to_string())
        })
        .collect();
    Column::new(column.name.clone(), ColumnType::Category, values)
}

/// `"Undrafted"` becomes `"0"`; all other values pass through as categories
fn normalize_draft_round(column: &Column) -> Column {
    let values = column
        .values
        .iter()
        .map(|v| match v {
            Value::Text(s) | Value::Category(s) if s == "Undrafted" => {
                Value::Category("0".to_string())
            }
            Value::Text(s) | Value::Category(s) => Value::Category(s.clone()),
            other => other.clone(),
        })
        .collect();
    Column::new(column.name.clone(), ColumnType::Category, values)
}
