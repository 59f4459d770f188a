use super::answers::{canonical_question_id, AnswerValue};
use serde::{Deserialize, Serialize};

/// Weight applied when the weighting table leaves the cell blank or unreadable.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Response scale of the LRS questionnaire: 0 (strongly disagree) to 4 (strongly agree).
pub const LIKERT_SCALE: ScaleBounds = ScaleBounds { min: 0.0, max: 4.0 };

/// Whether an item counts toward its schema as answered or mirrored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringDirection {
    #[default]
    Forward,
    Reverse,
}

impl ScoringDirection {
    /// Reads a scoring-logic cell; any label mentioning "reverse" flips the item.
    pub fn from_label(value: &str) -> Self {
        if value.to_ascii_lowercase().contains("reverse") {
            Self::Reverse
        } else {
            Self::Forward
        }
    }
}

/// Inclusive bounds of an ordinal response scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl ScaleBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Mirrors an answer as `(max + 1) - value`, i.e. `5 - value` on the 0-4 scale.
    pub fn reverse(&self, value: f64) -> f64 {
        (self.max + 1.0) - value
    }
}

/// One row of the weighting table: which schema a question feeds, and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightingRule {
    pub question_id: String,
    pub schema_name: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub direction: ScoringDirection,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl WeightingRule {
    pub fn new(
        question_id: &str,
        schema_name: &str,
        weight: f64,
        direction: ScoringDirection,
    ) -> Self {
        Self {
            question_id: canonical_question_id(question_id),
            schema_name: schema_name.trim().to_string(),
            weight: if weight.is_finite() {
                weight
            } else {
                DEFAULT_WEIGHT
            },
            direction,
        }
    }

    pub fn forward(question_id: &str, schema_name: &str, weight: f64) -> Self {
        Self::new(question_id, schema_name, weight, ScoringDirection::Forward)
    }

    pub fn reverse(question_id: &str, schema_name: &str, weight: f64) -> Self {
        Self::new(question_id, schema_name, weight, ScoringDirection::Reverse)
    }

    /// Weighted contribution of `answer`, or `None` when the answer cannot score.
    pub fn contribution(&self, answer: &AnswerValue, scale: &ScaleBounds) -> Option<f64> {
        let value = answer.as_number().filter(|value| scale.contains(*value))?;
        let value = match self.direction {
            ScoringDirection::Forward => value,
            ScoringDirection::Reverse => scale.reverse(value),
        };
        Some(value * self.weight)
    }
}
