use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::mapper::MappedSession;
use crate::model::{ExamSettings, Question, QuestionId, Selection};
use crate::navigator::Navigator;
use crate::timer::{Countdown, CountdownTick};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question {0} is not part of this session")]
    UnknownQuestion(QuestionId),

    #[error("session has no questions")]
    NoQuestions,

    #[error("time is up; selections are locked")]
    TimeUp,
}

/// What a toggle did, so callers know which question to sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub position: usize,
    pub changed: bool,
}

/// One in-progress attempt at an exam.
///
/// Owns the mapped questions, the per-question selections, the navigation
/// cursor and the countdown. Network concerns live in the services layer.
#[derive(Debug, Clone)]
pub struct ExamSession {
    settings: ExamSettings,
    questions: Vec<Question>,
    selections: Vec<Selection>,
    navigator: Navigator,
    countdown: Countdown,
    started_at: DateTime<Utc>,
}

impl ExamSession {
    #[must_use]
    pub fn new(mapped: MappedSession, started_at: DateTime<Utc>) -> Self {
        let MappedSession {
            settings,
            questions,
            mut selections,
        } = mapped;
        selections.resize(questions.len(), Selection::new());

        Self {
            navigator: Navigator::new(questions.len()),
            countdown: Countdown::from_settings(&settings),
            settings,
            questions,
            selections,
            started_at,
        }
    }

    #[must_use]
    pub fn empty(started_at: DateTime<Utc>) -> Self {
        Self::new(MappedSession::default(), started_at)
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn question(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    #[must_use]
    pub fn selection(&self, position: usize) -> Option<&Selection> {
        self.selections.get(position)
    }

    #[must_use]
    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        if id.is_blank() {
            return None;
        }
        self.questions.iter().position(|question| &question.id == id)
    }

    /// Number of questions with at least one chosen option.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| !s.is_empty()).count()
    }

    //
    // ─── NAVIGATION ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.navigator.current()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question(self.navigator.current())
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<&Selection> {
        self.selection(self.navigator.current())
    }

    pub fn goto(&mut self, index: isize) -> usize {
        self.navigator.goto(index)
    }

    pub fn first(&mut self) -> usize {
        self.navigator.first()
    }

    pub fn prev(&mut self) -> usize {
        self.navigator.prev()
    }

    pub fn next(&mut self) -> usize {
        self.navigator.next()
    }

    pub fn last(&mut self) -> usize {
        self.navigator.last()
    }

    pub fn reveal_answer(&mut self) {
        self.navigator.reveal_answer();
    }

    //
    // ─── TIMER ────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn tick(&mut self) -> CountdownTick {
        self.countdown.tick()
    }

    pub fn pause(&mut self) -> bool {
        self.countdown.pause()
    }

    pub fn resume(&mut self) {
        self.countdown.resume();
    }

    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.countdown.is_expired()
    }

    //
    // ─── SELECTION ────────────────────────────────────────────────────────────
    //

    /// Apply a user choice to the question with backend id `question_id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownQuestion` if the id is not in this
    /// session, or `SessionError::TimeUp` once the countdown has expired.
    pub fn toggle_option(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<ToggleOutcome, SessionError> {
        let position = self
            .position_of(question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.clone()))?;
        self.toggle_at(position, option_index)
    }

    /// Apply a user choice to the question under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` for an empty session, or
    /// `SessionError::TimeUp` once the countdown has expired.
    pub fn toggle_current(&mut self, option_index: usize) -> Result<ToggleOutcome, SessionError> {
        if self.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        self.toggle_at(self.navigator.current(), option_index)
    }

    fn toggle_at(&mut self, position: usize, option_index: usize) -> Result<ToggleOutcome, SessionError> {
        if self.is_time_up() {
            return Err(SessionError::TimeUp);
        }
        let question = &self.questions[position];
        let changed =
            self.selections[position].toggle(question.mode, option_index, question.option_count());
        Ok(ToggleOutcome { position, changed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_view_model;
    use crate::time::fixed_now;
    use serde_json::json;

    fn session() -> ExamSession {
        let raw = json!({
            "DurationinSeconds": 2,
            "Questions": [
                {
                    "PKTestQuestionId": 1,
                    "Options": [{ "PKOptionId": "a" }, { "PKOptionId": "b" }]
                },
                {
                    "PKTestQuestionId": 2,
                    "IsMultipleAnswer": true,
                    "Options": [{ "PKOptionId": "c" }, { "PKOptionId": "d" }, { "PKOptionId": "e" }]
                }
            ]
        });
        ExamSession::new(map_view_model(&raw), fixed_now())
    }

    #[test]
    fn single_select_toggle_never_clears() {
        let mut session = session();
        let id = QuestionId::new("1");

        session.toggle_option(&id, 0).unwrap();
        session.toggle_option(&id, 0).unwrap();
        assert_eq!(session.selection(0), Some(&Selection::from_indices([0])));

        session.toggle_option(&id, 1).unwrap();
        assert_eq!(session.selection(0), Some(&Selection::from_indices([1])));
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn multi_select_toggle_is_symmetric() {
        let mut session = session();
        let id = QuestionId::new("2");

        let outcome = session.toggle_option(&id, 2).unwrap();
        assert_eq!(outcome, ToggleOutcome { position: 1, changed: true });
        session.toggle_option(&id, 0).unwrap();
        session.toggle_option(&id, 2).unwrap();
        assert_eq!(session.selection(1), Some(&Selection::from_indices([0])));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut session = session();
        let err = session.toggle_option(&QuestionId::new("99"), 0).unwrap_err();
        assert_eq!(err, SessionError::UnknownQuestion(QuestionId::new("99")));
    }

    #[test]
    fn toggles_are_locked_after_time_up() {
        let mut session = session();
        session.tick();
        session.tick();
        assert!(session.is_time_up());
        assert_eq!(session.toggle_current(0).unwrap_err(), SessionError::TimeUp);
    }

    #[test]
    fn toggle_current_follows_cursor() {
        let mut session = session();
        session.last();
        let outcome = session.toggle_current(1).unwrap();
        assert_eq!(outcome.position, 1);
        assert!(session.current_selection().unwrap().contains(1));
    }

    #[test]
    fn empty_session_has_nothing_to_toggle() {
        let mut session = ExamSession::empty(fixed_now());
        assert_eq!(session.toggle_current(0).unwrap_err(), SessionError::NoQuestions);
        assert_eq!(session.goto(5), 0);
        assert!(session.current_question().is_none());
    }
}
