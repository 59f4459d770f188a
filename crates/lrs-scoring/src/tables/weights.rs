use super::headers::{Column, ColumnLayout};
use super::{csv_reader, TableImportError};
use crate::scoring::{ScoringDirection, WeightingRule, DEFAULT_WEIGHT};
use std::io::Read;
use std::path::Path;
use tracing::debug;

const TABLE: &str = "weighting table";

/// Reads the question → schema weighting map.
pub struct WeightTableImporter;

impl WeightTableImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<WeightingRule>, TableImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<WeightingRule>, TableImportError> {
        let mut csv = csv_reader(reader);
        let layout = ColumnLayout::resolve(csv.headers()?);
        for column in [Column::QuestionId, Column::SchemaName] {
            if !layout.contains(column) {
                return Err(TableImportError::MissingColumn {
                    table: TABLE,
                    column: column.label(),
                });
            }
        }

        let mut rules = Vec::new();
        for (line, record) in csv.records().enumerate() {
            let record = record?;
            let (Some(question_id), Some(schema_name)) = (
                layout.value(&record, Column::QuestionId),
                layout.value(&record, Column::SchemaName),
            ) else {
                debug!(row = line + 2, "skipping weighting row without question or schema");
                continue;
            };

            let weight = parse_weight(layout.value(&record, Column::Weight));
            let direction = layout
                .value(&record, Column::Direction)
                .map(ScoringDirection::from_label)
                .unwrap_or_default();

            rules.push(WeightingRule::new(question_id, schema_name, weight, direction));
        }

        Ok(rules)
    }
}

fn parse_weight(cell: Option<&str>) -> f64 {
    cell.and_then(|value| value.parse::<f64>().ok())
        .filter(|weight| weight.is_finite())
        .unwrap_or(DEFAULT_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn import(csv: &str) -> Vec<WeightingRule> {
        WeightTableImporter::from_reader(Cursor::new(csv)).expect("weighting table parses")
    }

    #[test]
    fn reads_rules_in_table_order() {
        let rules = import(
            "Question ID,Schema Name,Weight,SCORING LOGIC\n\
             1,Failure,1.5,Forward\n\
             2.0,Failure,0.5,Reverse Scored\n\
             3,Defectiveness / Shame,,\n",
        );

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0], WeightingRule::forward("1", "Failure", 1.5));
        assert_eq!(rules[1], WeightingRule::reverse("2", "Failure", 0.5));
        assert_eq!(
            rules[2],
            WeightingRule::forward("3", "Defectiveness / Shame", DEFAULT_WEIGHT)
        );
    }

    #[test]
    fn invalid_weight_defaults_to_one() {
        let rules = import("ID,Schema Name,Weight\n4,Failure,heavy\n5,Failure,nan\n");
        assert!(rules.iter().all(|rule| rule.weight == DEFAULT_WEIGHT));
    }

    #[test]
    fn missing_weight_column_defaults_to_one() {
        let rules = import("Question ID,Schema Name\n1,Failure\n");
        assert_eq!(rules[0].weight, DEFAULT_WEIGHT);
        assert_eq!(rules[0].direction, ScoringDirection::Forward);
    }

    #[test]
    fn rows_without_question_or_schema_are_skipped() {
        let rules = import("Question ID,Schema Name,Weight\n,Failure,1\n2,,1\n3,Failure,2\n");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].question_id, "3");
    }

    #[test]
    fn missing_schema_column_is_an_error() {
        let error = WeightTableImporter::from_reader(Cursor::new("Question ID,Weight\n1,1\n"))
            .expect_err("schema column required");
        assert!(matches!(
            error,
            TableImportError::MissingColumn {
                column: "Schema Name",
                ..
            }
        ));
    }
}
