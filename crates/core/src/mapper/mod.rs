//! Normalization boundary between backend test view models and the domain.
//!
//! Nothing past this module sees the loose JSON shape. Mapping never fails:
//! missing or malformed fields degrade to empty values.

mod fields;
mod review;

use serde_json::Value;

use crate::model::{
    AnswerMode, AnswerOption, ExamSettings, OptionId, Question, QuestionId, RichText, Selection,
};
use fields::{
    CAN_PAUSE, DOMAIN, DURATION_SECS, EXPLANATION, IS_PAUSED, MARKS_SCORED, MULTI_ANSWER,
    OPTION_CORRECT, OPTION_ID, OPTION_IMAGE, OPTION_SELECTED, OPTION_TEXT, OPTIONS,
    PASS_PERCENTAGE, QUESTION_ID, QUESTION_TEXT, QUESTIONS, SELECTED_IDS, TOTAL_MARKS,
};

pub use review::map_review_record;

/// A test view model after normalization.
///
/// `selections[i]` belongs to `questions[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedSession {
    pub settings: ExamSettings,
    pub questions: Vec<Question>,
    pub selections: Vec<Selection>,
}

impl MappedSession {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        if id.is_blank() {
            return None;
        }
        self.questions.iter().position(|question| &question.id == id)
    }
}

/// Normalize a raw test view model.
#[must_use]
pub fn map_view_model(raw: &Value) -> MappedSession {
    let (questions, selections): (Vec<Question>, Vec<Selection>) = fields::array(raw, QUESTIONS)
        .iter()
        .enumerate()
        .map(|(position, entry)| map_question(position, entry))
        .unzip();

    MappedSession {
        settings: SettingsFields::read(raw).resolve(),
        questions,
        selections,
    }
}

/// Split a comma separated id list, trimming entries and dropping empty ones.
#[must_use]
pub fn parse_selected_ids(raw: &str) -> Vec<OptionId> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(OptionId::new)
        .collect()
}

/// Return a copy of `raw` with one question's selection written back.
///
/// Rewrites every option's selected flag and the comma separated id list for
/// the question at `position`, keeping whatever key spelling the payload
/// already uses. The rest of the document is untouched.
#[must_use]
pub fn apply_selection(
    raw: &Value,
    position: usize,
    question: &Question,
    selection: &Selection,
) -> Value {
    let mut updated = raw.clone();
    let Some(root) = updated.as_object_mut() else {
        return updated;
    };
    let Some(questions_key) = fields::write_key(root, QUESTIONS) else {
        return updated;
    };
    let Some(entry) = root
        .get_mut(questions_key)
        .and_then(Value::as_array_mut)
        .and_then(|entries| entries.get_mut(position))
        .and_then(Value::as_object_mut)
    else {
        return updated;
    };

    let options_key = fields::write_key(entry, OPTIONS).unwrap_or("options");
    if let Some(options) = entry.get_mut(options_key).and_then(Value::as_array_mut) {
        for (index, option) in options.iter_mut().enumerate() {
            if let Some(option) = option.as_object_mut() {
                let key = fields::write_key(option, OPTION_SELECTED).unwrap_or("isSelectedOption");
                option.insert(key.to_string(), Value::Bool(selection.contains(index)));
            }
        }
    }

    let ids = selection
        .option_ids(question)
        .iter()
        .map(OptionId::as_str)
        .collect::<Vec<_>>()
        .join(",");
    let ids_key = fields::write_key(entry, SELECTED_IDS).unwrap_or("SelectedOptionId");
    entry.insert(ids_key.to_string(), Value::String(ids));

    updated
}

fn map_question(position: usize, raw: &Value) -> (Question, Selection) {
    let options: Vec<AnswerOption> = fields::array(raw, OPTIONS)
        .iter()
        .enumerate()
        .map(|(index, entry)| map_option(index, entry))
        .collect();

    let mode = match fields::flag(raw, MULTI_ANSWER) {
        Some(true) => AnswerMode::Multiple,
        Some(false) => AnswerMode::Single,
        None if options.iter().filter(|option| option.is_correct()).count() > 1 => {
            AnswerMode::Multiple
        }
        None => AnswerMode::Single,
    };

    let selection = initial_selection(raw, &options);

    let question = Question {
        number: position + 1,
        id: QuestionId::new(fields::text(raw, QUESTION_ID).unwrap_or_default()),
        text: RichText::detect(fields::text(raw, QUESTION_TEXT).unwrap_or_default()),
        options,
        mode,
        domain: fields::non_blank_text(raw, DOMAIN).map(|domain| domain.trim().to_string()),
        explanation: fields::non_blank_text(raw, EXPLANATION).map(RichText::detect),
        marks_scored: fields::number(raw, MARKS_SCORED),
    };

    (question, selection)
}

fn map_option(index: usize, raw: &Value) -> AnswerOption {
    // Options without an id fall back to their 1-based position.
    let id = fields::non_blank_text(raw, OPTION_ID).unwrap_or_else(|| (index + 1).to_string());
    let text = match raw {
        Value::String(plain) => plain.clone(),
        _ => fields::text(raw, OPTION_TEXT).unwrap_or_default(),
    };

    AnswerOption {
        id: OptionId::new(id),
        text: RichText::detect(text),
        is_correct: fields::flag(raw, OPTION_CORRECT),
        image: fields::non_blank_text(raw, OPTION_IMAGE),
    }
}

/// Per-option selected flags win when any option carries one; otherwise the
/// comma separated id list is matched against option ids.
fn initial_selection(raw: &Value, options: &[AnswerOption]) -> Selection {
    let option_values = fields::array(raw, OPTIONS);
    if option_values
        .iter()
        .any(|option| fields::has_any(option, OPTION_SELECTED))
    {
        return Selection::from_indices(
            option_values
                .iter()
                .enumerate()
                .filter(|(_, option)| fields::flag(option, OPTION_SELECTED) == Some(true))
                .map(|(index, _)| index),
        );
    }

    selection_from_ids(raw, options)
}

pub(crate) fn selection_from_ids(raw: &Value, options: &[AnswerOption]) -> Selection {
    let ids = fields::text(raw, SELECTED_IDS)
        .map(|ids| parse_selected_ids(&ids))
        .unwrap_or_default();
    Selection::from_indices(
        ids.iter()
            .filter_map(|id| options.iter().position(|option| &option.id == id)),
    )
}

/// Session-level fields before defaults are applied, so several documents
/// can be layered over each other.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SettingsFields {
    duration_secs: Option<u32>,
    pass_percentage: Option<f64>,
    total_marks: Option<f64>,
    can_pause_and_resume: Option<bool>,
    is_paused: Option<bool>,
}

impl SettingsFields {
    pub(crate) fn read(raw: &Value) -> Self {
        Self {
            duration_secs: fields::number(raw, DURATION_SECS).map(clamp_secs),
            pass_percentage: fields::number(raw, PASS_PERCENTAGE),
            total_marks: fields::number(raw, TOTAL_MARKS),
            can_pause_and_resume: fields::flag(raw, CAN_PAUSE),
            is_paused: fields::flag(raw, IS_PAUSED),
        }
    }

    /// Fill fields missing here from `fallback`.
    pub(crate) fn or(self, fallback: Self) -> Self {
        Self {
            duration_secs: self.duration_secs.or(fallback.duration_secs),
            pass_percentage: self.pass_percentage.or(fallback.pass_percentage),
            total_marks: self.total_marks.or(fallback.total_marks),
            can_pause_and_resume: self.can_pause_and_resume.or(fallback.can_pause_and_resume),
            is_paused: self.is_paused.or(fallback.is_paused),
        }
    }

    pub(crate) fn resolve(self) -> ExamSettings {
        ExamSettings {
            duration_secs: self.duration_secs.unwrap_or(0),
            pass_percentage: self.pass_percentage,
            total_marks: self.total_marks,
            can_pause_and_resume: self.can_pause_and_resume.unwrap_or(false),
            is_paused: self.is_paused.unwrap_or(false),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_secs(value: f64) -> u32 {
    value.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_view_model() -> Value {
        json!({
            "DurationinSeconds": 5400,
            "PassPercentage": 70,
            "TotalMarksAllocated": 100,
            "CanPauseAndResume": true,
            "IsPaused": false,
            "Questions": [
                {
                    "PKTestQuestionId": 11,
                    "Description": "<p>Pick one</p>",
                    "Options": [
                        { "PKOptionId": 101, "Description": "A", "IsCorrect": false, "isSelectedOption": false },
                        { "PKOptionId": 102, "Description": "B", "IsCorrect": true, "isSelectedOption": true }
                    ],
                    "SelectedOptionId": "101"
                },
                {
                    "PKTestQuestionId": "12",
                    "Description": "Pick two",
                    "Options": [
                        { "PKOptionId": "abc", "Description": "A", "IsCorrect": true },
                        { "PKOptionId": "def", "Description": "B", "IsCorrect": true },
                        { "PKOptionId": "ghi", "Description": "C" }
                    ],
                    "SelectedOptionId": "abc,def,"
                },
                { "PKTestQuestionId": 13, "Description": "No options" }
            ]
        })
    }

    #[test]
    fn maps_settings_and_numbers_questions_from_one() {
        let session = map_view_model(&sample_view_model());

        assert_eq!(session.settings.duration_secs, 5400);
        assert_eq!(session.settings.pass_percentage, Some(70.0));
        assert_eq!(session.settings.total_marks, Some(100.0));
        assert!(session.settings.can_pause_and_resume);
        assert!(!session.settings.is_paused);

        let numbers: Vec<_> = session.questions.iter().map(|q| q.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(session.questions[0].id, QuestionId::new("11"));
        assert!(session.questions[0].text.is_html());
    }

    #[test]
    fn per_option_flags_take_precedence_over_id_list() {
        let session = map_view_model(&sample_view_model());
        assert_eq!(session.selections[0], Selection::from_indices([1]));
    }

    #[test]
    fn comma_separated_ids_drop_trailing_empty_entries() {
        assert_eq!(
            parse_selected_ids("abc,def,"),
            vec![OptionId::new("abc"), OptionId::new("def")]
        );
        assert_eq!(parse_selected_ids(" , ,"), Vec::<OptionId>::new());

        let session = map_view_model(&sample_view_model());
        assert_eq!(session.selections[1], Selection::from_indices([0, 1]));
    }

    #[test]
    fn more_than_one_correct_flag_implies_multiple_answers() {
        let session = map_view_model(&sample_view_model());
        assert_eq!(session.questions[0].mode, AnswerMode::Single);
        assert_eq!(session.questions[1].mode, AnswerMode::Multiple);
        assert_eq!(session.questions[1].options[2].is_correct, None);
    }

    #[test]
    fn explicit_multi_flag_overrides_inference() {
        let raw = json!({ "Questions": [{
            "IsMultipleAnswer": "false",
            "Options": [{ "IsCorrect": true }, { "IsCorrect": true }]
        }]});
        assert_eq!(map_view_model(&raw).questions[0].mode, AnswerMode::Single);
    }

    #[test]
    fn missing_options_yield_empty_list() {
        let session = map_view_model(&sample_view_model());
        assert!(session.questions[2].options.is_empty());
        assert!(session.selections[2].is_empty());
    }

    #[test]
    fn malformed_input_degrades_to_empty_session() {
        for raw in [Value::Null, json!([]), json!("text"), json!({ "Questions": 4 })] {
            let session = map_view_model(&raw);
            assert!(session.is_empty());
            assert_eq!(session.settings, ExamSettings::default());
        }
    }

    #[test]
    fn options_without_ids_use_their_position() {
        let raw = json!({ "questions": [{
            "description": "camel case payload",
            "options": [{ "description": "first" }, { "description": "second" }],
            "selectedOptionId": "2"
        }]});
        let session = map_view_model(&raw);
        let question = &session.questions[0];
        assert_eq!(question.options[1].id, OptionId::new("2"));
        assert_eq!(session.selections[0], Selection::from_indices([1]));
    }

    #[test]
    fn apply_selection_rewrites_only_the_target_question() {
        let raw = sample_view_model();
        let session = map_view_model(&raw);
        let selection = Selection::from_indices([0, 2]);

        let updated = apply_selection(&raw, 1, &session.questions[1], &selection);

        let options = &updated["Questions"][1]["Options"];
        assert_eq!(options[0]["isSelectedOption"], json!(true));
        assert_eq!(options[1]["isSelectedOption"], json!(false));
        assert_eq!(options[2]["isSelectedOption"], json!(true));
        assert_eq!(updated["Questions"][1]["SelectedOptionId"], json!("abc,ghi"));
        assert_eq!(updated["Questions"][0], raw["Questions"][0]);
        assert_eq!(updated["DurationinSeconds"], json!(5400));
    }

    #[test]
    fn apply_selection_skips_null_keys_like_the_mapper() {
        let raw = json!({
            "Questions": null,
            "questions": [
                {
                    "PKTestQuestionId": 1,
                    "Options": null,
                    "options": [ { "PKOptionId": 5 }, { "PKOptionId": 6 } ]
                }
            ]
        });
        let session = map_view_model(&raw);
        assert_eq!(session.questions.len(), 1);

        let updated = apply_selection(&raw, 0, &session.questions[0], &Selection::from_indices([1]));

        assert_eq!(updated["Questions"], Value::Null);
        assert_eq!(updated["questions"][0]["options"][1]["isSelectedOption"], json!(true));
        assert_eq!(updated["questions"][0]["SelectedOptionId"], json!("6"));
        assert_eq!(map_view_model(&updated).selections[0], Selection::from_indices([1]));
    }

    #[test]
    fn apply_selection_out_of_range_position_is_noop() {
        let raw = sample_view_model();
        let session = map_view_model(&raw);
        let updated = apply_selection(&raw, 9, &session.questions[0], &Selection::new());
        assert_eq!(updated, raw);
    }
}
