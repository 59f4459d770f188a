use super::headers::{Column, ColumnLayout};
use super::{csv_reader, TableImportError};
use crate::catalog::{MetadataOverride, MetadataTable};
use std::io::Read;
use std::path::Path;

const TABLE: &str = "schema information table";

/// Reads per-schema descriptive overrides.
pub struct MetadataTableImporter;

impl MetadataTableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<MetadataTable, TableImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<MetadataTable, TableImportError> {
        let mut csv = csv_reader(reader);
        let layout = ColumnLayout::resolve(csv.headers()?);
        if !layout.contains(Column::SchemaName) {
            return Err(TableImportError::MissingColumn {
                table: TABLE,
                column: Column::SchemaName.label(),
            });
        }

        let mut rows = Vec::new();
        for record in csv.records() {
            let record = record?;
            let Some(name) = layout.value(&record, Column::SchemaName) else {
                continue;
            };
            let cell = |column| layout.value(&record, column).map(str::to_string);

            rows.push(MetadataOverride {
                name: name.to_string(),
                category: cell(Column::Category),
                causes: cell(Column::Causes),
                symptoms: cell(Column::Symptoms),
                manifestations: cell(Column::Manifestations),
                plan: [1, 2, 3, 4].map(|week| cell(Column::Week(week))),
            });
        }

        Ok(MetadataTable::from_overrides(rows))
    }
}
