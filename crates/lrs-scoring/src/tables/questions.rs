use super::normalizer::{clean_cell, display_header};
use super::{csv_reader, TableImportError};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::io::Read;
use std::path::Path;

/// Questionnaire rows as served to the client, one JSON object per row keyed
/// by the column headers of the source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionTable {
    rows: Vec<Map<String, Value>>,
}

impl QuestionTable {
    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct QuestionTableImporter;

impl QuestionTableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<QuestionTable, TableImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<QuestionTable, TableImportError> {
        let mut csv = csv_reader(reader);
        let headers: Vec<String> = csv.headers()?.iter().map(display_header).collect();

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            let mut row = Map::new();
            for (index, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = cell_value(record.get(index).unwrap_or(""));
                row.entry(header.clone()).or_insert(value);
            }
            rows.push(row);
        }

        Ok(QuestionTable { rows })
    }
}

/// Blank cells become `""`; numeric cells become JSON numbers.
fn cell_value(raw: &str) -> Value {
    let Some(cell) = clean_cell(raw) else {
        return Value::String(String::new());
    };

    if let Ok(integer) = cell.parse::<i64>() {
        return Value::Number(integer.into());
    }

    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
