// src/data_types.rs
use serde_json::Value;

use crate::error::{LoadError, LoadResult};

pub type Row = Vec<String>;

/// Canonical table: rows of display strings, lengths may differ.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableData {
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn empty() -> Self {
        TableData { rows: Vec::new() }
    }

    pub fn new(rows: Vec<Row>) -> Self {
        TableData { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a table from a parsed JSON document.
    ///
    /// An array is taken element by element, an object contributes its values
    /// in key insertion order. Each element is expected to be row-shaped; an
    /// object element gives its values, a scalar element becomes a one-cell row.
    ///
    /// A top-level number, string or bool has no values and gives an empty
    /// table; a top-level `null` is rejected.
    pub fn from_json(value: Value) -> LoadResult<Self> {
        let elements = match value {
            Value::Array(items) => items,
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            Value::Null => {
                return Err(LoadError::MalformedResponse(
                    "document is null, expected an array or object".to_string(),
                ))
            }
            _ => Vec::new(),
        };

        let rows = elements.into_iter().map(row_from_json).collect();
        Ok(TableData { rows })
    }
}

impl From<Vec<Vec<&str>>> for TableData {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        TableData {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        }
    }
}

fn row_from_json(value: Value) -> Row {
    match value {
        Value::Array(cells) => cells.iter().map(cell_to_string).collect(),
        Value::Object(map) => map.values().map(cell_to_string).collect(),
        scalar => vec![cell_to_string(&scalar)],
    }
}

/// Display form of a single JSON cell. Null is the empty string.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            // 3.0 shows as "3", the way spreadsheets display it
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.is_finite() => format!("{:.0}", f),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(cell_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Case-insensitive substring filter over rows joined with a single space.
///
/// An empty query keeps every row. The input is left untouched.
pub fn filter(table: &TableData, query: &str) -> TableData {
    if query.is_empty() {
        return table.clone();
    }

    let needle = query.to_lowercase();
    let rows = table
        .rows
        .iter()
        .filter(|row| row.join(" ").to_lowercase().contains(&needle))
        .cloned()
        .collect();

    TableData { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_empty_query_keeps_table() {
        let table = TableData::from(vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(filter(&table, ""), table);
        assert_eq!(filter(&TableData::empty(), ""), TableData::empty());
    }

    #[test]
    fn test_filter_case_insensitive() {
        let table = TableData::from(vec![vec!["Apple", "1"], vec!["banana", "2"]]);
        let filtered = filter(&table, "AN");
        assert_eq!(filtered, TableData::from(vec![vec!["banana", "2"]]));
        // input untouched
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_filter_matches_across_cell_boundary() {
        let table = TableData::from(vec![vec!["new", "york"], vec!["newark"]]);
        let filtered = filter(&table, "w y");
        assert_eq!(filtered, TableData::from(vec![vec!["new", "york"]]));
    }

    #[test]
    fn test_filter_idempotent() {
        let table = TableData::from(vec![
            vec!["Alice", "30"],
            vec!["Bob", "25"],
            vec!["alicia"],
            vec![],
        ]);
        for query in ["", "ali", "3", "zzz", " "] {
            let once = filter(&table, query);
            assert_eq!(filter(&once, query), once, "query {:?}", query);
        }
    }

    #[test]
    fn test_from_json_array() {
        let table = TableData::from_json(json!([["a", "b"], ["c"]])).unwrap();
        assert_eq!(table, TableData::from(vec![vec!["a", "b"], vec!["c"]]));
    }

    #[test]
    fn test_from_json_object_keeps_insertion_order() {
        let value: Value = serde_json::from_str(r#"{"b":[3,4],"a":[1,2]}"#).unwrap();
        let table = TableData::from_json(value).unwrap();
        assert_eq!(table, TableData::from(vec![vec!["3", "4"], vec!["1", "2"]]));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&json!(null)), "");
        assert_eq!(cell_to_string(&json!("x")), "x");
        assert_eq!(cell_to_string(&json!(42)), "42");
        assert_eq!(cell_to_string(&json!(3.0)), "3");
        assert_eq!(cell_to_string(&json!(3.5)), "3.5");
        assert_eq!(cell_to_string(&json!(true)), "true");
        assert_eq!(cell_to_string(&json!([1, "a"])), "1,a");
    }

    #[test]
    fn test_from_json_non_array_elements() {
        let table = TableData::from_json(json!([{"name": "Ann", "age": 4}, "solo"])).unwrap();
        assert_eq!(table, TableData::from(vec![vec!["Ann", "4"], vec!["solo"]]));
    }

    #[test]
    fn test_from_json_top_level_scalars() {
        assert_eq!(TableData::from_json(json!(5)).unwrap(), TableData::empty());
        assert_eq!(TableData::from_json(json!(true)).unwrap(), TableData::empty());
        assert_eq!(TableData::from_json(json!("ab")).unwrap(), TableData::empty());

        let err = TableData::from_json(json!(null)).unwrap_err();
        assert!(matches!(err, LoadError::MalformedResponse(_)));
    }
}
