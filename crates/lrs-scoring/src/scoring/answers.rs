use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A single response as submitted by the respondent.
///
/// Likert items arrive as JSON numbers; open-ended items arrive as text. Any
/// other JSON shape is carried along but never scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    /// JSON holding a number too large for an `f64`, kept verbatim.
    OutOfRange(String),
    Other(Value),
}

impl AnswerValue {
    /// The numeric reading of the answer, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    /// Classifies one raw JSON answer. Never fails: anything unreadable as a
    /// number or text lands in a non-scoring variant.
    pub fn from_raw(raw: &RawValue) -> Self {
        match serde_json::from_str::<Value>(raw.get()) {
            Ok(Value::Number(number)) => match number.as_f64() {
                Some(value) => AnswerValue::Number(value),
                None => AnswerValue::Other(Value::Number(number)),
            },
            Ok(Value::String(text)) => AnswerValue::Text(text),
            Ok(other) => AnswerValue::Other(other),
            Err(_) => AnswerValue::OutOfRange(raw.get().trim().to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(AnswerValue::from_raw(&raw))
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Respondent answers keyed by canonical question identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "BTreeMap<String, AnswerValue>")]
pub struct AnswerSet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an answer under its canonical identifier. When two identifiers
    /// collapse to the same question, the first scorable answer is kept.
    pub fn insert(&mut self, question_id: &str, value: impl Into<AnswerValue>) {
        let value = value.into();
        match self.answers.entry(canonical_question_id(question_id)) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let replace = slot.get().as_number().is_none() && value.as_number().is_some();
                debug!(
                    question = %slot.key(),
                    submitted_as = question_id,
                    replaced = replace,
                    "duplicate answer for question"
                );
                if replace {
                    slot.insert(value);
                }
            }
        }
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id).or_else(|| {
            let canonical = canonical_question_id(question_id);
            self.answers.get(&canonical)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.answers.iter().map(|(id, value)| (id.as_str(), value))
    }
}

impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AnswerSetVisitor)
    }
}

/// Inserts entries in document order so collisions resolve deterministically.
struct AnswerSetVisitor;

impl<'de> Visitor<'de> for AnswerSetVisitor {
    type Value = AnswerSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping question identifiers to answers")
    }

    fn visit_map<A>(self, mut map: A) -> Result<AnswerSet, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut set = AnswerSet::new();
        while let Some((question_id, value)) = map.next_entry::<String, AnswerValue>()? {
            set.insert(&question_id, value);
        }
        Ok(set)
    }
}

impl From<AnswerSet> for BTreeMap<String, AnswerValue> {
    fn from(set: AnswerSet) -> Self {
        set.answers
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: AsRef<str>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (question_id, value) in iter {
            set.insert(question_id.as_ref(), value);
        }
        set
    }
}

/// Reads the `answers` member of a request body.
///
/// An absent member and the empty JSON values (`null`, `false`, `0`, `""`,
/// `[]`, `{}`) read as an empty set; any other non-object is rejected.
pub fn parse_answer_payload(raw: Option<&RawValue>) -> Result<AnswerSet, serde_json::Error> {
    let Some(raw) = raw else {
        return Ok(AnswerSet::new());
    };

    let text = raw.get().trim_start();
    if text.starts_with('{') {
        return serde_json::from_str(text);
    }

    let value: Value = serde_json::from_str(text)?;
    if is_empty_json(&value) {
        Ok(AnswerSet::new())
    } else {
        Err(de::Error::custom(
            "answers must be an object keyed by question identifier",
        ))
    }
}

fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        Value::Bool(true) => false,
    }
}

/// Canonical form of a question identifier.
///
/// Identifiers are trimmed, and integral numbers lose any fractional
/// rendering so `"1.0"`, `" 1 "` and `1` all address the same question.
pub fn canonical_question_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_ids_collapse_numeric_renderings() {
        assert_eq!(canonical_question_id("1"), "1");
        assert_eq!(canonical_question_id(" 1.0 "), "1");
        assert_eq!(canonical_question_id("07"), "7");
        assert_eq!(canonical_question_id("Q12"), "Q12");
        assert_eq!(canonical_question_id("2.5"), "2.5");
        assert_eq!(canonical_question_id("  open-1 "), "open-1");
    }

    #[test]
    fn deserializes_numbers_text_and_other_shapes() {
        let set: AnswerSet = serde_json::from_str(
            r#"{"1": 3, "2": 2.5, "3": "prefer not to say", "4": null, "5": true}"#,
        )
        .expect("answers deserialize");

        assert_eq!(set.len(), 5);
        assert_eq!(set.get("1"), Some(&AnswerValue::Number(3.0)));
        assert_eq!(set.get("2").and_then(AnswerValue::as_number), Some(2.5));
        assert!(matches!(set.get("3"), Some(AnswerValue::Text(_))));
        assert!(set.get("4").and_then(AnswerValue::as_number).is_none());
        assert!(set.get("5").and_then(AnswerValue::as_number).is_none());
    }

    #[test]
    fn keys_are_canonicalized_on_entry() {
        let set: AnswerSet = serde_json::from_str(r#"{" 12 ": 4}"#).expect("answers deserialize");
        assert_eq!(set.get("12"), Some(&AnswerValue::Number(4.0)));
        assert_eq!(set.get("12.0"), Some(&AnswerValue::Number(4.0)));
        assert!(set.get("13").is_none());
    }

    #[test]
    fn oversized_number_is_kept_but_does_not_score() {
        let set: AnswerSet =
            serde_json::from_str(r#"{"1": 3, "2": 1e400}"#).expect("answers deserialize");

        assert_eq!(set.get("1"), Some(&AnswerValue::Number(3.0)));
        assert_eq!(
            set.get("2"),
            Some(&AnswerValue::OutOfRange("1e400".to_string()))
        );
        assert!(set.get("2").and_then(AnswerValue::as_number).is_none());
    }

    #[test]
    fn colliding_ids_keep_the_scorable_answer() {
        let set: AnswerSet =
            serde_json::from_str(r#"{"1": 3, "1.0": "skip"}"#).expect("answers deserialize");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("1"), Some(&AnswerValue::Number(3.0)));

        let set: AnswerSet =
            serde_json::from_str(r#"{"1.0": "skip", "1": 2}"#).expect("answers deserialize");
        assert_eq!(set.get("1"), Some(&AnswerValue::Number(2.0)));

        let set: AnswerSet =
            serde_json::from_str(r#"{"01": 4, "1": 1}"#).expect("answers deserialize");
        assert_eq!(set.get("1"), Some(&AnswerValue::Number(4.0)));
    }

    #[test]
    fn empty_payloads_read_as_no_answers() {
        for body in ["null", "[]", "{}", "\"\"", "false", "0"] {
            let raw = RawValue::from_string(body.to_string()).expect("valid json");
            let set = parse_answer_payload(Some(&*raw)).expect("empty payload accepted");
            assert!(set.is_empty(), "{body} should be empty");
        }
        assert!(parse_answer_payload(None).expect("absent").is_empty());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        for body in ["[1, 2]", "\"3\"", "true"] {
            let raw = RawValue::from_string(body.to_string()).expect("valid json");
            assert!(parse_answer_payload(Some(&*raw)).is_err(), "{body} accepted");
        }
    }

    #[test]
    fn text_digits_are_not_numbers() {
        let value = AnswerValue::from("3");
        assert!(value.as_number().is_none());
    }
}
