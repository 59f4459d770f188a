use crate::catalog::{merge_entry, InterventionPlan, MetadataTable, SchemaCatalog, SchemaMetadata};
use crate::scoring::SchemaScores;
use serde::{Deserialize, Serialize};

/// One ranked schema in a respondent's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSchemaRecord {
    pub name: String,
    pub category: String,
    pub score: f64,
    pub causes: String,
    pub symptoms: String,
    pub manifestations: String,
    pub plan: InterventionPlan,
}

impl ScoredSchemaRecord {
    fn new(metadata: SchemaMetadata, score: f64) -> Self {
        let SchemaMetadata {
            name,
            category,
            causes,
            symptoms,
            manifestations,
            plan,
        } = metadata;

        Self {
            name,
            category,
            score,
            causes,
            symptoms,
            manifestations,
            plan,
        }
    }
}

/// Produces one record per catalog schema, ranked by score descending.
///
/// Schemas absent from `scores` score `0.0`. Equal scores keep catalog order.
pub fn assemble(
    scores: &SchemaScores,
    catalog: &SchemaCatalog,
    metadata: Option<&MetadataTable>,
) -> Vec<ScoredSchemaRecord> {
    let mut records: Vec<ScoredSchemaRecord> = catalog
        .entries()
        .iter()
        .map(|fallback| {
            let external = metadata.and_then(|table| table.get(&fallback.name));
            let merged = merge_entry(fallback, external);
            let score = round_score(scores.score_or_zero(&fallback.name));
            ScoredSchemaRecord::new(merged, score)
        })
        .collect();

    // sort_by is stable
    records.sort_by(|left, right| right.score.total_cmp(&left.score));
    records
}

/// Display rounding to two decimal places. Exact halves round away from zero
/// and negative zero becomes `0.0`.
pub fn round_score(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
