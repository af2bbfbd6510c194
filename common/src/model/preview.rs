//! Small samples shown to the user before a transfer is submitted.
//!
//! Previews are display aids only: the file-to-database transfer re-sends the full
//! original file, and the database-to-file sample is whatever the backend returns.

use serde_json::{Map, Value};

use crate::model::file::split_line;

/// Number of lines (header included) shown for an uploaded file, and number of
/// rows requested from the backend for an export.
pub const PREVIEW_LINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PreviewTable {
    /// Splits the first `max_lines` lines of `text` on `delimiter`.
    ///
    /// The first line becomes the header. Rows whose cell count differs from the
    /// header are kept as they are.
    pub fn from_text(text: &str, delimiter: char, max_lines: usize) -> Self {
        let mut lines = text
            .trim_start_matches('\u{feff}')
            .lines()
            .take(max_lines)
            .map(|line| split_line(line, delimiter));

        let header = lines.next().unwrap_or_default();
        Self {
            header,
            rows: lines.collect(),
        }
    }

    /// Projects row objects returned by the backend onto `columns`.
    ///
    /// Missing cells render empty; values that are not strings are shown using
    /// their JSON representation.
    pub fn from_records(columns: &[String], records: &[Map<String, Value>]) -> Self {
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self {
            header: columns.to_vec(),
            rows,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }

    /// True when `row` does not have one cell per header column.
    pub fn is_malformed(&self, row: &[String]) -> bool {
        row.len() != self.header.len()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn takes_header_and_first_rows() {
        let text = "a,b\n1,2\n3,4\n5,6\n7,8\n9,10\n";
        let preview = PreviewTable::from_text(text, ',', PREVIEW_LINES);
        assert_eq!(preview.header(), ["a", "b"]);
        assert_eq!(preview.rows().len(), 4);
        assert_eq!(preview.rows()[3], ["7", "8"]);
    }

    #[test]
    fn crlf_and_trailing_newline_are_tolerated() {
        let preview = PreviewTable::from_text("a;b\r\n1;2\r\n", ';', PREVIEW_LINES);
        assert_eq!(preview.header(), ["a", "b"]);
        assert_eq!(preview.rows(), [vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn malformed_rows_are_rendered_as_is() {
        let preview = PreviewTable::from_text("a,b,c\n1,2\n1,2,3,4\n", ',', PREVIEW_LINES);
        assert_eq!(preview.rows()[0], ["1", "2"]);
        assert_eq!(preview.rows()[1], ["1", "2", "3", "4"]);
        assert!(preview.is_malformed(&preview.rows()[0]));
        assert!(preview.is_malformed(&preview.rows()[1]));
    }

    #[test]
    fn quoted_cells_are_not_split() {
        let preview = PreviewTable::from_text("\"name, full\",age\n\"Doe, J\",42\n", ',', PREVIEW_LINES);
        assert_eq!(preview.header(), ["name, full", "age"]);
        assert_eq!(preview.rows()[0], ["Doe, J", "42"]);
        assert!(!preview.is_malformed(&preview.rows()[0]));
    }

    #[test]
    fn empty_text_gives_empty_preview() {
        assert!(PreviewTable::from_text("", ',', PREVIEW_LINES).is_empty());
    }

    #[test]
    fn records_are_projected_onto_selected_columns() {
        let records = vec![
            json!({"a": 1, "b": "x", "c": true}),
            json!({"a": null}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect::<Vec<_>>();

        let columns = vec!["a".to_string(), "b".to_string()];
        let preview = PreviewTable::from_records(&columns, &records);
        assert_eq!(preview.header(), ["a", "b"]);
        assert_eq!(preview.rows()[0], ["1", "x"]);
        assert_eq!(preview.rows()[1], ["", ""]);
    }
}
