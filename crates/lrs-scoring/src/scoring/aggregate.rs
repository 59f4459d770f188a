use super::answers::AnswerSet;
use super::rules::{ScaleBounds, WeightingRule, LIKERT_SCALE};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

/// Per-schema totals. A schema that received no contribution is absent and
/// reads as zero through [`SchemaScores::score_or_zero`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaScores {
    totals: BTreeMap<String, f64>,
}

impl SchemaScores {
    pub fn get(&self, schema_name: &str) -> Option<f64> {
        self.totals.get(schema_name).copied()
    }

    pub fn score_or_zero(&self, schema_name: &str) -> f64 {
        self.get(schema_name).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    fn add(&mut self, schema_name: &str, amount: f64) {
        *self.totals.entry(schema_name.to_string()).or_insert(0.0) += amount;
    }
}

/// Aggregates answers on the standard 0-4 questionnaire scale.
pub fn aggregate(answers: &AnswerSet, rules: &[WeightingRule]) -> SchemaScores {
    aggregate_with_scale(answers, rules, &LIKERT_SCALE)
}

/// Walks the weighting rules in table order and sums each scorable answer's
/// weighted contribution into its schema.
pub fn aggregate_with_scale(
    answers: &AnswerSet,
    rules: &[WeightingRule],
    scale: &ScaleBounds,
) -> SchemaScores {
    let mut scores = SchemaScores::default();

    for rule in rules {
        let Some(answer) = answers.get(&rule.question_id) else {
            continue;
        };

        match rule.contribution(answer, scale) {
            Some(amount) => scores.add(&rule.schema_name, amount),
            None => trace!(
                question_id = %rule.question_id,
                schema = %rule.schema_name,
                "answer does not score"
            ),
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{AnswerValue, ScoringDirection};

    fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerSet {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn forward_rule_multiplies_answer_by_weight() {
        let rules = vec![WeightingRule::forward("1", "Abandonment", 2.0)];
        let scores = aggregate(&answers(&[("1", AnswerValue::Number(3.0))]), &rules);
        assert_eq!(scores.get("Abandonment"), Some(6.0));
        assert_eq!(scores.len(), 1);
    }

    #[test]
    fn reverse_rule_mirrors_answer_first() {
        let rules = vec![WeightingRule::new(
            "1",
            "Abandonment",
            2.0,
            ScoringDirection::Reverse,
        )];
        let scores = aggregate(&answers(&[("1", AnswerValue::Number(3.0))]), &rules);
        assert_eq!(scores.get("Abandonment"), Some(4.0));
    }

    #[test]
    fn text_answers_leave_schema_absent() {
        let rules = vec![WeightingRule::forward("1", "Abandonment", 2.0)];
        let scores = aggregate(&answers(&[("1", AnswerValue::from("prefer not to say"))]), &rules);
        assert!(scores.get("Abandonment").is_none());
        assert_eq!(scores.score_or_zero("Abandonment"), 0.0);
    }

    #[test]
    fn unanswered_questions_contribute_nothing() {
        let rules = vec![
            WeightingRule::forward("1", "Failure", 1.0),
            WeightingRule::forward("2", "Failure", 1.0),
        ];
        let scores = aggregate(&answers(&[("2", AnswerValue::Number(4.0))]), &rules);
        assert_eq!(scores.get("Failure"), Some(4.0));
    }

    #[test]
    fn contributions_from_separate_questions_add_up() {
        let rules = vec![
            WeightingRule::forward("1", "Failure", 1.5),
            WeightingRule::reverse("2", "Failure", 1.0),
        ];
        let scores = aggregate(
            &answers(&[
                ("1", AnswerValue::Number(2.0)),
                ("2", AnswerValue::Number(4.0)),
            ]),
            &rules,
        );
        assert_eq!(scores.get("Failure"), Some(4.0));
    }

    #[test]
    fn duplicate_rules_accumulate() {
        let rules = vec![
            WeightingRule::forward("1", "Subjugation", 1.0),
            WeightingRule::forward("1", "Subjugation", 1.0),
        ];
        let scores = aggregate(&answers(&[("1", AnswerValue::Number(2.0))]), &rules);
        assert_eq!(scores.get("Subjugation"), Some(4.0));
    }

    #[test]
    fn empty_answers_give_empty_scores() {
        let rules = vec![WeightingRule::forward("1", "Failure", 1.0)];
        let scores = aggregate(&AnswerSet::new(), &rules);
        assert!(scores.is_empty());
    }

    #[test]
    fn out_of_range_and_non_numeric_answers_are_skipped() {
        let rules = vec![
            WeightingRule::forward("1", "Failure", 1.0),
            WeightingRule::forward("2", "Failure", 1.0),
            WeightingRule::forward("3", "Failure", 1.0),
            WeightingRule::forward("4", "Failure", 1.0),
        ];
        let scores = aggregate(
            &answers(&[
                ("1", AnswerValue::Number(9.0)),
                ("2", AnswerValue::Other(serde_json::Value::Null)),
                ("3", AnswerValue::Other(serde_json::json!([1, 2]))),
                ("4", AnswerValue::Number(1.0)),
            ]),
            &rules,
        );
        assert_eq!(scores.get("Failure"), Some(1.0));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let rules = vec![
            WeightingRule::forward("1", "Failure", 0.1),
            WeightingRule::forward("2", "Failure", 0.2),
            WeightingRule::reverse("3", "Punitiveness", 0.7),
        ];
        let set = answers(&[
            ("1", AnswerValue::Number(3.0)),
            ("2", AnswerValue::Number(1.0)),
            ("3", AnswerValue::Number(2.0)),
        ]);

        let first = aggregate(&set, &rules);
        let second = aggregate(&set, &rules);
        for (name, total) in first.iter() {
            let again = second.get(name).expect("schema present twice");
            assert_eq!(total.to_bits(), again.to_bits());
        }
        assert_eq!(first, second);
    }

    #[test]
    fn explicit_scale_controls_reverse_and_range() {
        let scale = ScaleBounds { min: 1.0, max: 5.0 };
        let rules = vec![WeightingRule::reverse("1", "Failure", 1.0)];
        let scores = aggregate_with_scale(
            &answers(&[("1", AnswerValue::Number(5.0))]),
            &rules,
            &scale,
        );
        assert_eq!(scores.get("Failure"), Some(1.0));

        let scores = aggregate_with_scale(
            &answers(&[("1", AnswerValue::Number(0.0))]),
            &rules,
            &scale,
        );
        assert!(scores.is_empty());
    }
}
