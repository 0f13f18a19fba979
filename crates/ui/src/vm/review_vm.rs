use exam_core::{ExamOutcome, QuestionReview, QuestionStatus, ReviewReport};

use super::html::{image_html, rich_text_html};
use super::option_letter;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewOptionVm {
    pub letter: char,
    pub html: String,
    pub image_html: Option<String>,
    pub selected: bool,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewQuestionVm {
    pub number: usize,
    pub html: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub domain: Option<String>,
    pub options: Vec<ReviewOptionVm>,
    pub explanation_html: Option<String>,
    pub marks_label: Option<String>,
    /// Shown when the backend mark and the answer key disagree.
    pub note: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub outcome_label: &'static str,
    pub outcome_class: &'static str,
    pub score_label: String,
    pub marks_label: Option<String>,
    pub pass_label: Option<String>,
    pub correct_label: String,
    pub incorrect_label: String,
    pub unanswered_label: String,
    pub questions: Vec<ReviewQuestionVm>,
}

impl ReviewVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[must_use]
pub fn map_review(report: &ReviewReport) -> ReviewVm {
    let (outcome_label, outcome_class) = match report.outcome {
        ExamOutcome::Passed => ("Passed", "outcome outcome--passed"),
        ExamOutcome::Failed => ("Failed", "outcome outcome--failed"),
        ExamOutcome::Pending => ("Result pending", "outcome outcome--pending"),
    };
    let score_label = if report.outcome == ExamOutcome::Pending {
        "--".to_string()
    } else {
        format!("{}%", report.score_percent.round())
    };

    ReviewVm {
        outcome_label,
        outcome_class,
        score_label,
        marks_label: report
            .total_marks
            .map(|total| format!("{} / {} marks", trim_number(report.marks_scored), trim_number(total))),
        pass_label: report
            .pass_percentage
            .map(|pass| format!("Pass mark {}%", trim_number(pass))),
        correct_label: format!("{} correct", report.correct),
        incorrect_label: format!("{} incorrect", report.incorrect),
        unanswered_label: format!("{} unanswered", report.unanswered),
        questions: report.questions.iter().map(map_question).collect(),
    }
}

fn map_question(review: &QuestionReview) -> ReviewQuestionVm {
    let question = &review.question;
    let (status_label, status_class) = match review.status {
        QuestionStatus::Correct => ("Correct", "status status--correct"),
        QuestionStatus::Incorrect => ("Incorrect", "status status--incorrect"),
        QuestionStatus::Unanswered => ("Not answered", "status status--unanswered"),
    };

    ReviewQuestionVm {
        number: question.number,
        html: rich_text_html(&question.text),
        status_label,
        status_class,
        domain: question.domain.clone(),
        options: question
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| ReviewOptionVm {
                letter: option_letter(index),
                html: rich_text_html(&option.text),
                image_html: option.image.as_deref().and_then(image_html),
                selected: review.selection.contains(index),
                correct: option.is_correct(),
            })
            .collect(),
        explanation_html: question.explanation.as_ref().map(rich_text_html),
        marks_label: question
            .marks_scored
            .map(|marks| format!("{} marks", trim_number(marks))),
        note: (!review.consistent).then_some("Scored by the exam server"),
    }
}

/// `2` rather than `2.0`, keeping real fractions.
fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{AnswerOption, ExamSettings, OptionId, Question, QuestionId, RichText, Selection};
    use exam_core::{MappedSession, aggregate};

    fn question(marks: Option<f64>) -> Question {
        let mut question = Question::new(1, QuestionId::new("1"), RichText::Plain("Q".into()))
            .with_options(vec![
                AnswerOption::new(OptionId::new("a"), RichText::Plain("A".into())).with_correct(true),
                AnswerOption::new(OptionId::new("b"), RichText::Plain("B".into())).with_correct(false),
            ]);
        question.marks_scored = marks;
        question
    }

    #[test]
    fn passed_report_labels() {
        let report = aggregate(&MappedSession {
            settings: ExamSettings::default().with_scoring(50.0, 2.0),
            questions: vec![question(Some(2.0))],
            selections: vec![Selection::from_indices([0])],
        });

        let vm = map_review(&report);
        assert_eq!(vm.outcome_label, "Passed");
        assert_eq!(vm.score_label, "100%");
        assert_eq!(vm.marks_label.as_deref(), Some("2 / 2 marks"));
        assert_eq!(vm.pass_label.as_deref(), Some("Pass mark 50%"));
        assert_eq!(vm.correct_label, "1 correct");

        let row = &vm.questions[0];
        assert_eq!(row.status_label, "Correct");
        assert!(row.options[0].selected && row.options[0].correct);
        assert!(row.note.is_none());
    }

    #[test]
    fn disagreement_adds_a_note() {
        let report = aggregate(&MappedSession {
            settings: ExamSettings::default(),
            questions: vec![question(Some(1.0))],
            selections: vec![Selection::from_indices([1])],
        });

        let vm = map_review(&report);
        assert_eq!(vm.outcome_label, "Result pending");
        assert_eq!(vm.score_label, "--");
        assert_eq!(vm.questions[0].status_label, "Correct");
        assert!(vm.questions[0].note.is_some());
    }

    #[test]
    fn option_images_are_sanitized() {
        let mut question = question(Some(1.0));
        question.options[0].image = Some("https://x.test/a.png".into());
        question.options[1].image = Some("javascript:alert(1)".into());
        let report = aggregate(&MappedSession {
            settings: ExamSettings::default(),
            questions: vec![question],
            selections: vec![Selection::from_indices([0])],
        });

        let vm = map_review(&report);
        let options = &vm.questions[0].options;
        assert!(options[0].image_html.as_deref().is_some_and(|html| html.contains("https://x.test/a.png")));
        assert_eq!(options[1].image_html, None);
    }

    #[test]
    fn empty_report_maps_to_empty_vm() {
        let vm = map_review(&ReviewReport::empty());
        assert!(vm.is_empty());
        assert_eq!(vm.unanswered_label, "0 unanswered");
    }

    #[test]
    fn numbers_drop_trailing_zeroes() {
        assert_eq!(trim_number(2.0), "2");
        assert_eq!(trim_number(2.5), "2.5");
        assert_eq!(trim_number(0.25), "0.25");
    }
}
