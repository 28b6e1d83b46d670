//! Uniform tabular results

use itertools::Itertools;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Params};
use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Ordered rows with named columns
///
/// An empty table is a successful query that matched nothing; a failed query
/// never produces a `Table`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            columns,
            rows,
            index,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Value at a row and named column
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// All values of one column, top to bottom
    #[must_use]
    pub fn column_values(&self, column: &str) -> Option<Vec<&Value>> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().filter_map(|row| row.get(col)).collect())
    }

    /// Render as pipe-separated text, one line per row after a header
    #[must_use]
    pub fn render(&self) -> String {
        let header = self.columns.iter().join(" | ");
        let body = self
            .rows
            .iter()
            .map(|row| row.iter().map(render_value).join(" | "))
            .join("\n");
        if body.is_empty() {
            format!("{header}\n(no records)")
        } else {
            format!("{header}\n{body}")
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(format!("<{} bytes>", bytes.len())),
    }
}

/// Run one parameterized query and collect every row
pub fn query_table<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Table> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let mut rows = stmt.query(params)?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(value_to_json(row.get_ref(i)?));
        }
        collected.push(values);
    }
    Ok(Table::new(columns, collected))
}
