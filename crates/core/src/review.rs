use crate::mapper::MappedSession;
use crate::model::{Question, Selection};

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Pass/fail verdict for a scored attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamOutcome {
    Passed,
    Failed,
    /// Total marks or pass mark unknown, or nothing to score against.
    Pending,
}

/// Classification of a single reviewed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Correct,
    Incorrect,
    Unanswered,
}

/// Percentage of `total_marks` earned, or 0 when there is nothing to score against.
#[must_use]
pub fn score_percent(marks_scored: f64, total_marks: f64) -> f64 {
    if total_marks > 0.0 {
        marks_scored / total_marks * 100.0
    } else {
        0.0
    }
}

/// Compare the rounded score with the pass mark.
///
/// Stays `Pending` until both the total and the pass mark are known and the
/// total is positive.
#[must_use]
pub fn outcome(marks_scored: f64, total_marks: Option<f64>, pass_percentage: Option<f64>) -> ExamOutcome {
    match (total_marks, pass_percentage) {
        (Some(total), Some(pass)) if total > 0.0 => {
            if score_percent(marks_scored, total).round() >= pass {
                ExamOutcome::Passed
            } else {
                ExamOutcome::Failed
            }
        }
        _ => ExamOutcome::Pending,
    }
}

/// Backend-scored classification: any awarded mark means correct.
#[must_use]
pub fn status_by_marks(marks_scored: f64, selection: &Selection) -> QuestionStatus {
    if marks_scored > 0.0 {
        QuestionStatus::Correct
    } else if selection.is_empty() {
        QuestionStatus::Unanswered
    } else {
        QuestionStatus::Incorrect
    }
}

/// Client-side classification: the selection must equal the set of
/// correct-flagged options exactly.
#[must_use]
pub fn status_by_options(question: &Question, selection: &Selection) -> QuestionStatus {
    if selection.is_empty() {
        return QuestionStatus::Unanswered;
    }
    let correct = question.correct_indices();
    let exact = correct.len() == selection.len() && selection.indices().all(|i| correct.contains(&i));
    if exact {
        QuestionStatus::Correct
    } else {
        QuestionStatus::Incorrect
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Review line for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionReview {
    pub question: Question,
    pub selection: Selection,
    pub status: QuestionStatus,
    /// False when the backend mark and the option comparison disagree.
    pub consistent: bool,
}

/// Derived review of a completed attempt. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewReport {
    pub questions: Vec<QuestionReview>,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub marks_scored: f64,
    pub total_marks: Option<f64>,
    pub pass_percentage: Option<f64>,
    pub score_percent: f64,
    pub outcome: ExamOutcome,
}

impl ReviewReport {
    #[must_use]
    pub fn empty() -> Self {
        aggregate(&MappedSession::default())
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn inconsistent(&self) -> impl Iterator<Item = &QuestionReview> {
        self.questions.iter().filter(|review| !review.consistent)
    }
}

/// Score a mapped session.
///
/// A question's backend mark is authoritative when present; option matching
/// decides otherwise and is kept as a consistency check. The check is only
/// meaningful when the question carries an answer key.
#[must_use]
pub fn aggregate(session: &MappedSession) -> ReviewReport {
    let empty = Selection::new();
    let questions: Vec<QuestionReview> = session
        .questions
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let selection = session.selections.get(position).unwrap_or(&empty);
            let by_options = status_by_options(question, selection);
            let (status, consistent) = match question.marks_scored {
                Some(marks) => {
                    let by_marks = status_by_marks(marks, selection);
                    (by_marks, !question.has_answer_key() || by_marks == by_options)
                }
                None => (by_options, true),
            };
            QuestionReview {
                question: question.clone(),
                selection: selection.clone(),
                status,
                consistent,
            }
        })
        .collect();

    let count = |wanted: QuestionStatus| questions.iter().filter(|q| q.status == wanted).count();
    let correct = count(QuestionStatus::Correct);
    let incorrect = count(QuestionStatus::Incorrect);
    let unanswered = count(QuestionStatus::Unanswered);

    let marks_scored: f64 = session
        .questions
        .iter()
        .filter_map(|question| question.marks_scored)
        .sum();
    let total_marks = session.settings.total_marks;
    let pass_percentage = session.settings.pass_percentage;

    ReviewReport {
        questions,
        correct,
        incorrect,
        unanswered,
        marks_scored,
        total_marks,
        pass_percentage,
        score_percent: score_percent(marks_scored, total_marks.unwrap_or(0.0)),
        outcome: outcome(marks_scored, total_marks, pass_percentage),
    }
}

//
// ─── SCREEN STATE ──────────────────────────────────────────────────────────────
//

/// Review screen lifecycle: `Loading` until both payloads arrive, then
/// `Ready` for the rest of the screen's life.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReviewScreen {
    #[default]
    Loading,
    Ready(ReviewReport),
}

impl ReviewScreen {
    /// Move to `Ready`. A screen that is already ready keeps its report.
    #[must_use]
    pub fn finish(self, report: ReviewReport) -> Self {
        match self {
            Self::Loading => Self::Ready(report),
            ready @ Self::Ready(_) => ready,
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&ReviewReport> {
        match self {
            Self::Loading => None,
            Self::Ready(report) => Some(report),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerMode, AnswerOption, ExamSettings, OptionId, QuestionId, RichText};

    fn two_correct_question(marks: Option<f64>) -> Question {
        let mut question = Question::new(1, QuestionId::new("q"), RichText::Plain("Q".into()))
            .with_mode(AnswerMode::Multiple)
            .with_options(vec![
                AnswerOption::new(OptionId::new("a"), RichText::Plain("A".into())).with_correct(true),
                AnswerOption::new(OptionId::new("b"), RichText::Plain("B".into())).with_correct(true),
                AnswerOption::new(OptionId::new("c"), RichText::Plain("C".into())).with_correct(false),
            ]);
        question.marks_scored = marks;
        question
    }

    #[test]
    fn score_and_outcome_with_known_totals() {
        assert!((score_percent(72.0, 100.0) - 72.0).abs() < f64::EPSILON);
        assert_eq!(outcome(72.0, Some(100.0), Some(70.0)), ExamOutcome::Passed);
        assert_eq!(outcome(69.0, Some(100.0), Some(70.0)), ExamOutcome::Failed);
    }

    #[test]
    fn rounding_applies_before_comparison() {
        // 69.5% rounds to 70.
        assert_eq!(outcome(139.0, Some(200.0), Some(70.0)), ExamOutcome::Passed);
        assert_eq!(outcome(138.0, Some(200.0), Some(70.0)), ExamOutcome::Failed);
    }

    #[test]
    fn zero_total_is_pending() {
        assert_eq!(score_percent(10.0, 0.0), 0.0);
        assert_eq!(outcome(10.0, Some(0.0), Some(70.0)), ExamOutcome::Pending);
        assert_eq!(outcome(10.0, None, Some(70.0)), ExamOutcome::Pending);
        assert_eq!(outcome(10.0, Some(100.0), None), ExamOutcome::Pending);
    }

    #[test]
    fn option_matching_requires_exact_set() {
        let question = two_correct_question(None);
        assert_eq!(
            status_by_options(&question, &Selection::from_indices([0, 1])),
            QuestionStatus::Correct
        );
        assert_eq!(
            status_by_options(&question, &Selection::from_indices([0])),
            QuestionStatus::Incorrect
        );
        assert_eq!(
            status_by_options(&question, &Selection::from_indices([0, 1, 2])),
            QuestionStatus::Incorrect
        );
        assert_eq!(status_by_options(&question, &Selection::new()), QuestionStatus::Unanswered);
    }

    #[test]
    fn marks_drive_status() {
        assert_eq!(status_by_marks(1.0, &Selection::new()), QuestionStatus::Correct);
        assert_eq!(
            status_by_marks(0.0, &Selection::from_indices([1])),
            QuestionStatus::Incorrect
        );
        assert_eq!(status_by_marks(0.0, &Selection::new()), QuestionStatus::Unanswered);
    }

    #[test]
    fn aggregate_counts_and_flags_disagreement() {
        let session = MappedSession {
            settings: ExamSettings::default().with_scoring(70.0, 100.0),
            questions: vec![
                two_correct_question(Some(72.0)),
                two_correct_question(Some(0.0)),
                two_correct_question(Some(0.0)),
                two_correct_question(Some(0.0)),
            ],
            selections: vec![
                Selection::from_indices([0, 1]),
                Selection::from_indices([0]),
                Selection::new(),
                Selection::from_indices([0, 1]),
            ],
        };

        let report = aggregate(&session);

        assert_eq!(report.correct, 1);
        assert_eq!(report.incorrect, 2);
        assert_eq!(report.unanswered, 1);
        assert!((report.score_percent - 72.0).abs() < f64::EPSILON);
        assert_eq!(report.outcome, ExamOutcome::Passed);

        let inconsistent: Vec<_> = report.inconsistent().map(|r| r.question.number).collect();
        assert_eq!(inconsistent.len(), 1);
        assert_eq!(report.questions[3].status, QuestionStatus::Incorrect);
        assert!(!report.questions[3].consistent);
    }

    #[test]
    fn option_matching_decides_without_marks() {
        let session = MappedSession {
            settings: ExamSettings::default(),
            questions: vec![two_correct_question(None)],
            selections: vec![Selection::from_indices([0, 1])],
        };
        let report = aggregate(&session);
        assert_eq!(report.questions[0].status, QuestionStatus::Correct);
        assert_eq!(report.outcome, ExamOutcome::Pending);
        assert_eq!(report.score_percent, 0.0);
    }

    #[test]
    fn review_screen_ready_is_terminal() {
        let screen = ReviewScreen::default();
        assert!(!screen.is_ready());
        assert!(screen.report().is_none());

        let first = ReviewReport::empty();
        let mut second = ReviewReport::empty();
        second.correct = 9;

        let screen = screen.finish(first.clone()).finish(second);
        assert_eq!(screen.report(), Some(&first));
    }
}
