//! Result rendering for the terminal.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::db::table::ResultTable;
use crate::error::Result;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Render a result table in the requested format.
pub fn render(table: &ResultTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_text(table)),
        OutputFormat::Json => render_json(table),
    }
}

/// Rounded text table with a row-count footer. An empty result still shows
/// its header.
fn render_text(table: &ResultTable) -> String {
    let mut builder = Builder::new();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().map(|v| v.display()));
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    format!("{rendered}\n({} rows)", table.len())
}

/// JSON array of column-keyed objects, row order preserved.
fn render_json(table: &ResultTable) -> Result<String> {
    let rows: Vec<serde_json::Value> = table
        .rows()
        .iter()
        .map(|row| {
            let obj: serde_json::Map<String, serde_json::Value> = table
                .columns()
                .iter()
                .zip(row.iter())
                .map(|(col, val)| (col.clone(), val.to_json()))
                .collect();
            serde_json::Value::Object(obj)
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ResultTable, SqlValue};

    fn sample() -> ResultTable {
        ResultTable::try_new(
            vec!["name".to_string(), "titles".to_string()],
            vec![
                vec![SqlValue::Text("Celtics".to_string()), SqlValue::Int(17)],
                vec![SqlValue::Text("Heat".to_string()), SqlValue::Int(3)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_text_render_has_header_and_footer() {
        let out = render(&sample(), OutputFormat::Table).unwrap();
        assert!(out.contains("name"));
        assert!(out.contains("Celtics"));
        assert!(out.ends_with("(2 rows)"));
    }

    #[test]
    fn test_text_render_empty_table() {
        let table = ResultTable::empty(vec!["name".to_string()]);
        let out = render(&table, OutputFormat::Table).unwrap();
        assert!(out.contains("name"));
        assert!(out.ends_with("(0 rows)"));
    }

    #[test]
    fn test_json_render_is_column_keyed() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "Celtics");
        assert_eq!(parsed[1]["titles"], 3);
    }

    #[test]
    fn test_json_render_empty_is_empty_array() {
        let table = ResultTable::empty(vec!["name".to_string()]);
        let out = render(&table, OutputFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
