use std::time::Duration;

use dioxus::prelude::Key;
use exam_core::model::{AnswerMode, TestId};
use exam_core::{CountdownTick, SessionError as StateError};
use services::{PracticeSession, SessionError};
use tracing::debug;

use super::html::{image_html, rich_text_html};
use super::option_letter;
use super::time_fmt::{format_countdown, format_started};

/// How long Finish waits for queued selections before moving on.
pub const FINISH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeIntent {
    Toggle(usize),
    Goto(usize),
    First,
    Prev,
    Next,
    Last,
    Reveal,
    Pause,
    Resume,
}

/// Keyboard shortcut for the practice screen, if `key` has one.
///
/// Digits pick options 1-9; arrows, Home and End move between questions.
#[must_use]
pub fn intent_for_key(key: &Key) -> Option<PracticeIntent> {
    match key {
        Key::ArrowLeft => Some(PracticeIntent::Prev),
        Key::ArrowRight => Some(PracticeIntent::Next),
        Key::Home => Some(PracticeIntent::First),
        Key::End => Some(PracticeIntent::Last),
        Key::Character(value) => match value.parse::<usize>() {
            Ok(digit @ 1..=9) => Some(PracticeIntent::Toggle(digit - 1)),
            _ => None,
        },
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: char,
    pub html: String,
    pub image_html: Option<String>,
    pub selected: bool,
    /// Set once the answer is revealed and the option is known to be correct.
    pub marked_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number: usize,
    pub html: String,
    pub hint: &'static str,
    pub domain: Option<String>,
    pub options: Vec<OptionVm>,
    pub explanation_html: Option<String>,
    pub revealed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerVm {
    Untimed,
    Running(String),
    Paused(String),
    Expired,
}

impl TimerVm {
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Untimed => "Untimed".into(),
            Self::Running(remaining) => format!("Time left {remaining}"),
            Self::Paused(remaining) => format!("Paused at {remaining}"),
            Self::Expired => "Time's up".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub index: usize,
    pub number: usize,
    pub answered: bool,
    pub current: bool,
}

/// Presentation wrapper around a running `PracticeSession`.
#[derive(Clone)]
pub struct PracticeVm {
    session: PracticeSession,
}

impl PracticeVm {
    #[must_use]
    pub fn new(session: PracticeSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn test_id(&self) -> TestId {
        self.session.test_id()
    }

    #[must_use]
    pub fn has_questions(&self) -> bool {
        !self.session.exam().is_empty()
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let exam = self.session.exam();
        if exam.is_empty() {
            return "No questions".into();
        }
        format!("Question {} of {}", exam.current_position() + 1, exam.total())
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        let exam = self.session.exam();
        format!("{} / {} answered", exam.answered_count(), exam.total())
    }

    #[must_use]
    pub fn started_label(&self) -> String {
        format_started(self.session.exam().started_at())
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.has_questions() && !self.session.navigator().is_first()
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.has_questions() && !self.session.navigator().is_last()
    }

    #[must_use]
    pub fn can_pause(&self) -> bool {
        self.session.exam().countdown().can_pause() && !self.session.is_time_up()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session.exam().countdown().is_paused()
    }

    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.session.is_time_up()
    }

    #[must_use]
    pub fn timer(&self) -> TimerVm {
        let countdown = self.session.exam().countdown();
        if countdown.duration_secs() == 0 {
            TimerVm::Untimed
        } else if countdown.is_expired() {
            TimerVm::Expired
        } else if countdown.is_paused() {
            TimerVm::Paused(format_countdown(countdown.remaining_secs()))
        } else {
            TimerVm::Running(format_countdown(countdown.remaining_secs()))
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        let question = self.session.current_question()?;
        let selection = self.session.current_selection();
        let revealed = self.session.navigator().answer_revealed();

        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| OptionVm {
                letter: option_letter(index),
                html: rich_text_html(&option.text),
                image_html: option.image.as_deref().and_then(image_html),
                selected: selection.is_some_and(|selection| selection.contains(index)),
                marked_correct: revealed && option.is_correct(),
            })
            .collect();

        Some(QuestionVm {
            number: question.number,
            html: rich_text_html(&question.text),
            hint: match question.mode {
                AnswerMode::Single => "Select one answer",
                AnswerMode::Multiple => "Select all that apply",
            },
            domain: question.domain.clone(),
            options,
            explanation_html: question
                .explanation
                .as_ref()
                .filter(|_| revealed)
                .map(rich_text_html),
            revealed,
        })
    }

    #[must_use]
    pub fn nav_items(&self) -> Vec<NavItemVm> {
        let exam = self.session.exam();
        let current = exam.current_position();
        (0..exam.total())
            .map(|index| NavItemVm {
                index,
                number: index + 1,
                answered: exam.selection(index).is_some_and(|selection| !selection.is_empty()),
                current: index == current,
            })
            .collect()
    }

    /// Apply a user intent. Toggles after time is up are ignored.
    pub fn apply(&mut self, intent: PracticeIntent) {
        match intent {
            PracticeIntent::Toggle(index) => match self.session.toggle_current(index) {
                Ok(_) | Err(SessionError::State(StateError::TimeUp | StateError::NoQuestions)) => {}
                Err(err) => debug!(error = %err, "toggle rejected"),
            },
            PracticeIntent::Goto(index) => {
                self.session.goto(isize::try_from(index).unwrap_or(isize::MAX));
            }
            PracticeIntent::First => {
                self.session.first();
            }
            PracticeIntent::Prev => {
                self.session.prev();
            }
            PracticeIntent::Next => {
                self.session.next();
            }
            PracticeIntent::Last => {
                self.session.last();
            }
            PracticeIntent::Reveal => self.session.reveal_answer(),
            PracticeIntent::Pause => {
                self.session.pause();
            }
            PracticeIntent::Resume => self.session.resume(),
        }
    }

    /// One-second heartbeat from the screen.
    pub fn tick(&mut self) -> CountdownTick {
        self.session.tick()
    }

    /// Flush pending selections and return the test to review.
    pub async fn finish(self) -> TestId {
        self.session.finish(FINISH_TIMEOUT).await
    }
}
