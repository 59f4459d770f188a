//! Score Aggregator: folds questionnaire answers into per-schema totals.

mod aggregate;
mod answers;
mod rules;

pub use aggregate::{aggregate, aggregate_with_scale, SchemaScores};
pub use answers::{canonical_question_id, parse_answer_payload, AnswerSet, AnswerValue};
pub use rules::{ScaleBounds, ScoringDirection, WeightingRule, DEFAULT_WEIGHT, LIKERT_SCALE};
