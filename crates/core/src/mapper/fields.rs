//! Field lookup over loosely shaped backend JSON.
//!
//! Each concept lists its accepted keys in priority order: the backend's
//! PascalCase name first, then camelCase, then legacy aliases seen in older
//! payloads. The first key that is present and not `null` wins.

use serde_json::{Map, Value};

pub(crate) const QUESTIONS: &[&str] = &["Questions", "questions", "TestQuestions"];

pub(crate) const QUESTION_ID: &[&str] = &[
    "PKTestQuestionId",
    "pkTestQuestionId",
    "TestQuestionId",
    "QuestionId",
    "questionId",
    "Id",
    "id",
];
pub(crate) const QUESTION_TEXT: &[&str] = &[
    "Description",
    "description",
    "QuestionText",
    "questionText",
    "Question",
];
pub(crate) const OPTIONS: &[&str] = &["Options", "options", "AnswerOptions"];
pub(crate) const MULTI_ANSWER: &[&str] = &[
    "IsMultipleAnswer",
    "isMultipleAnswer",
    "IsMultiSelect",
    "isMultiSelect",
    "MultipleAnswers",
];
pub(crate) const DOMAIN: &[&str] = &["Domain", "domain", "DomainName", "Topic", "topic"];
pub(crate) const EXPLANATION: &[&str] = &[
    "Explanation",
    "explanation",
    "AnswerExplanation",
    "answerExplanation",
];
pub(crate) const SELECTED_IDS: &[&str] = &["SelectedOptionId", "selectedOptionId", "SelectedOptionIds"];
pub(crate) const MARKS_SCORED: &[&str] = &[
    "MarksScoredForthisQuestion",
    "marksScoredForthisQuestion",
    "MarksScored",
    "marksScored",
];

pub(crate) const OPTION_ID: &[&str] = &["PKOptionId", "pkOptionId", "OptionId", "optionId", "Id", "id"];
pub(crate) const OPTION_TEXT: &[&str] = &[
    "Description",
    "description",
    "OptionText",
    "optionText",
    "Text",
];
pub(crate) const OPTION_CORRECT: &[&str] = &["IsCorrect", "isCorrect", "IsCorrectAnswer"];
pub(crate) const OPTION_SELECTED: &[&str] = &[
    "isSelectedOption",
    "IsSelectedOption",
    "IsSelected",
    "isSelected",
];
pub(crate) const OPTION_IMAGE: &[&str] = &["ImageUrl", "imageUrl", "Image", "image", "ImagePath"];

pub(crate) const DURATION_SECS: &[&str] = &[
    "DurationinSeconds",
    "DurationInSeconds",
    "durationinSeconds",
    "durationInSeconds",
];
pub(crate) const PASS_PERCENTAGE: &[&str] = &["PassPercentage", "passPercentage", "PassMark"];
pub(crate) const TOTAL_MARKS: &[&str] = &["TotalMarksAllocated", "totalMarksAllocated", "TotalMarks"];
pub(crate) const CAN_PAUSE: &[&str] = &["CanPauseAndResume", "canPauseAndResume"];
pub(crate) const IS_PAUSED: &[&str] = &["IsPaused", "isPaused"];

pub(crate) const EMBEDDED_VIEW_MODEL: &[&str] = &["JsonAsString", "jsonAsString"];

/// First present, non-null value among `keys`.
pub(crate) fn field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|found| !found.is_null())
}

/// The key `field` reads from, so a write lands where the next read looks.
///
/// Falls back to the first key present with a `null` value.
pub(crate) fn write_key(object: &Map<String, Value>, keys: &[&'static str]) -> Option<&'static str> {
    keys.iter()
        .copied()
        .find(|key| object.get(*key).is_some_and(|found| !found.is_null()))
        .or_else(|| keys.iter().copied().find(|key| object.contains_key(*key)))
}

pub(crate) fn has_any(value: &Value, keys: &[&str]) -> bool {
    field(value, keys).is_some()
}

/// Text value; numbers and booleans are rendered in their JSON form.
pub(crate) fn text(value: &Value, keys: &[&str]) -> Option<String> {
    match field(value, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Like `text`, but blank strings count as missing.
pub(crate) fn non_blank_text(value: &Value, keys: &[&str]) -> Option<String> {
    text(value, keys).filter(|s| !s.trim().is_empty())
}

/// Numeric value; numeric strings are parsed.
pub(crate) fn number(value: &Value, keys: &[&str]) -> Option<f64> {
    match field(value, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Boolean value; accepts `true`/`false`, 0/1 and their string spellings.
pub(crate) fn flag(value: &Value, keys: &[&str]) -> Option<bool> {
    match field(value, keys)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Array value, or an empty slice when missing or of another type.
pub(crate) fn array<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    field(value, keys)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
