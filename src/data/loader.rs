//! CSV ingestion
//!
//! Reads a player CSV into a raw table of text columns. All parsing into
//! typed values happens later, in the cleaning stage.

use crate::data::{Column, ColumnType, Table, Value};
use crate::Result;
use std::path::Path;

/// Load a CSV file into a raw table
///
/// Every column comes back as `Text`; empty cells become `Missing`.
pub fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column::new(name, ColumnType::Text, Vec::new()))
        .collect();

    for result in reader.records() {
        let record = result?;
        for (i, field) in record.iter().enumerate() {
            let value = if field.is_empty() {
                Value::Missing
            } else {
                Value::Text(field.to_string())
            };
            columns[i].values.push(value);
        }
    }

    Table::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_text_columns_with_missing_cells() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "team,salary").unwrap();
        writeln!(file, "Lakers,$1000000").unwrap();
        writeln!(file, ",$2000000").unwrap();

        let table = load_csv(file.path()).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), vec!["team", "salary"]);

        let team = table.column("team").unwrap();
        assert_eq!(team.ty, ColumnType::Text);
        assert_eq!(team.values[0], Value::Text("Lakers".to_string()));
        assert_eq!(team.values[1], Value::Missing);
    }
}
