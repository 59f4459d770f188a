use super::assemble::{assemble, ScoredSchemaRecord};
use crate::catalog::{MetadataTable, SchemaCatalog};
use crate::scoring::{aggregate_with_scale, AnswerSet, ScaleBounds, WeightingRule, LIKERT_SCALE};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Read-only reference data plus the scoring pipeline that runs against it.
///
/// Built once at start-up and shared between requests; `score` never mutates it.
#[derive(Debug, Clone)]
pub struct ProfileEngine {
    weights: Option<Vec<WeightingRule>>,
    catalog: SchemaCatalog,
    metadata: Option<MetadataTable>,
    scale: ScaleBounds,
}

impl ProfileEngine {
    pub fn new(
        weights: Option<Vec<WeightingRule>>,
        catalog: SchemaCatalog,
        metadata: Option<MetadataTable>,
    ) -> Self {
        report_unmatched(weights.as_deref(), &catalog, metadata.as_ref());

        Self {
            weights,
            catalog,
            metadata,
            scale: LIKERT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: ScaleBounds) -> Self {
        self.scale = scale;
        self
    }

    pub fn weights_available(&self) -> bool {
        self.weights.is_some()
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn metadata(&self) -> Option<&MetadataTable> {
        self.metadata.as_ref()
    }

    /// Scores one respondent's answers into a ranked profile.
    pub fn score(&self, answers: &AnswerSet) -> Result<Vec<ScoredSchemaRecord>, ProfileError> {
        if answers.is_empty() {
            return Err(ProfileError::NoAnswers);
        }

        let weights = self
            .weights
            .as_deref()
            .ok_or(ProfileError::WeightsUnavailable)?;

        let scores = aggregate_with_scale(answers, weights, &self.scale);
        debug!(
            answers = answers.len(),
            scored_schemas = scores.len(),
            "aggregated questionnaire answers"
        );

        Ok(assemble(&scores, &self.catalog, self.metadata.as_ref()))
    }
}

fn report_unmatched(
    weights: Option<&[WeightingRule]>,
    catalog: &SchemaCatalog,
    metadata: Option<&MetadataTable>,
) {
    if let Some(rules) = weights {
        let unknown: BTreeSet<&str> = rules
            .iter()
            .map(|rule| rule.schema_name.as_str())
            .filter(|name| !catalog.contains(name))
            .collect();
        if !unknown.is_empty() {
            warn!(
                schemas = ?unknown,
                "weighting rules target schemas outside the catalog; their scores are not reported"
            );
        }
    }

    if let Some(table) = metadata {
        let unknown: Vec<&str> = table.names().filter(|name| !catalog.contains(name)).collect();
        if !unknown.is_empty() {
            warn!(schemas = ?unknown, "ignoring metadata rows for unknown schemas");
        }
    }
}

/// Why a profile could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("No answers provided")]
    NoAnswers,
    #[error("Server data files missing: weighting table unavailable")]
    WeightsUnavailable,
}

impl ProfileError {
    /// True when the failure lies with server-side reference data rather than the caller.
    pub fn is_reference_data_failure(&self) -> bool {
        matches!(self, ProfileError::WeightsUnavailable)
    }
}
