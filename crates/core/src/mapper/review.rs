use serde_json::Value;

use super::fields::{self, EMBEDDED_VIEW_MODEL, MARKS_SCORED, QUESTION_ID, QUESTIONS, SELECTED_IDS};
use super::{MappedSession, SettingsFields, map_view_model, selection_from_ids};
use crate::model::{Question, QuestionId};

/// Normalize a scored buyer-test record for review.
///
/// The record embeds the session's view model as a JSON string and repeats
/// each question's selected ids and awarded marks at the top level; those
/// top-level values win. `question_bank` supplies correctness flags the
/// embedded view model left out.
#[must_use]
pub fn map_review_record(record: &Value, question_bank: &Value) -> MappedSession {
    let embedded = embedded_view_model(record);
    let bank = map_view_model(question_bank);

    let mut session = map_view_model(&embedded);
    if session.is_empty() {
        session.questions.clone_from(&bank.questions);
        session.selections = vec![Default::default(); bank.questions.len()];
    }

    session.settings = SettingsFields::read(record)
        .or(SettingsFields::read(&embedded))
        .or(SettingsFields::read(question_bank))
        .resolve();

    overlay_scores(&mut session, record);
    fill_answer_key(&mut session.questions, &bank.questions);

    session
}

fn embedded_view_model(record: &Value) -> Value {
    match fields::field(record, EMBEDDED_VIEW_MODEL) {
        Some(Value::String(serialized)) => serde_json::from_str(serialized).unwrap_or(Value::Null),
        Some(object @ Value::Object(_)) => object.clone(),
        _ => Value::Null,
    }
}

fn overlay_scores(session: &mut MappedSession, record: &Value) {
    for (position, entry) in fields::array(record, QUESTIONS).iter().enumerate() {
        let id = QuestionId::new(fields::text(entry, QUESTION_ID).unwrap_or_default());
        let target = session.position_of(&id).or_else(|| {
            (id.is_blank() && position < session.questions.len()).then_some(position)
        });
        let Some(target) = target else {
            continue;
        };

        if let Some(marks) = fields::number(entry, MARKS_SCORED) {
            session.questions[target].marks_scored = Some(marks);
        }
        if fields::has_any(entry, SELECTED_IDS) {
            session.selections[target] = selection_from_ids(entry, &session.questions[target].options);
        }
    }
}

fn fill_answer_key(questions: &mut [Question], bank: &[Question]) {
    for (position, question) in questions.iter_mut().enumerate() {
        let source = bank
            .iter()
            .find(|candidate| !question.id.is_blank() && candidate.id == question.id)
            .or_else(|| bank.get(position).filter(|_| question.id.is_blank()));
        let Some(source) = source else {
            continue;
        };

        for option in &mut question.options {
            if option.is_correct.is_some() {
                continue;
            }
            option.is_correct = source
                .options
                .iter()
                .find(|candidate| candidate.id == option.id)
                .and_then(|candidate| candidate.is_correct);
        }
        if question.explanation.is_none() {
            question.explanation.clone_from(&source.explanation);
        }
        if question.domain.is_none() {
            question.domain.clone_from(&source.domain);
        }
    }
}
