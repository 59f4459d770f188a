//! CSV ingestion for the reference tables: weighting map, schema
//! information and questionnaire.

mod headers;
mod metadata;
mod normalizer;
mod questions;
mod weights;

pub use metadata::MetadataTableImporter;
pub use questions::{QuestionTable, QuestionTableImporter};
pub use weights::WeightTableImporter;

use crate::catalog::MetadataTable;
use crate::config::DataConfig;
use crate::scoring::WeightingRule;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub enum TableImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl std::fmt::Display for TableImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableImportError::Io(err) => write!(f, "failed to read table: {}", err),
            TableImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            TableImportError::MissingColumn { table, column } => {
                write!(f, "{} has no '{}' column", table, column)
            }
        }
    }
}

impl std::error::Error for TableImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableImportError::Io(err) => Some(err),
            TableImportError::Csv(err) => Some(err),
            TableImportError::MissingColumn { .. } => None,
        }
    }
}

impl From<std::io::Error> for TableImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TableImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Everything read from the data directory at start-up. A table that could
/// not be loaded is `None`; the endpoints that need it report the gap.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub weights: Option<Vec<WeightingRule>>,
    pub metadata: Option<MetadataTable>,
    pub questions: Option<QuestionTable>,
}

impl ReferenceTables {
    pub fn load(data: &DataConfig) -> Self {
        let tables = Self {
            weights: load_optional("weighting", &data.weights_file, |path| {
                WeightTableImporter::from_path(path)
            }),
            metadata: load_optional(
                "schema information",
                &data.schema_info_file,
                |path| MetadataTableImporter::from_path(path),
            ),
            questions: load_optional(
                "questions",
                &data.questions_file,
                |path| QuestionTableImporter::from_path(path),
            ),
        };

        info!(
            weighting_rules = tables.weights.as_ref().map_or(0, Vec::len),
            metadata_rows = tables.metadata.as_ref().map_or(0, MetadataTable::len),
            questions = tables.questions.as_ref().map_or(0, QuestionTable::len),
            "reference tables loaded"
        );
        tables
    }
}

fn load_optional<T, F>(name: &str, path: &Path, import: F) -> Option<T>
where
    F: FnOnce(&Path) -> Result<T, TableImportError>,
{
    if !path.exists() {
        warn!(table = name, path = %path.display(), "table file not found");
        return None;
    }

    match import(path) {
        Ok(table) => {
            info!(table = name, path = %path.display(), "loaded table");
            Some(table)
        }
        Err(error) => {
            warn!(table = name, path = %path.display(), %error, "failed to load table");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_files_load_as_none() {
        let missing = PathBuf::from("/nonexistent/lrs");
        let tables = ReferenceTables::load(&DataConfig {
            questions_file: missing.join("questions.csv"),
            weights_file: missing.join("weights.csv"),
            schema_info_file: missing.join("schemas.csv"),
            frontend_dir: missing.join("build"),
        });

        assert!(tables.weights.is_none());
        assert!(tables.metadata.is_none());
        assert!(tables.questions.is_none());
    }

    #[test]
    fn missing_column_message_names_table_and_column() {
        let error = TableImportError::MissingColumn {
            table: "weighting table",
            column: "Question ID",
        };
        assert_eq!(error.to_string(), "weighting table has no 'Question ID' column");
    }
}
