use crate::model::ids::{OptionId, QuestionId};
use crate::model::text::RichText;

//
// ─── ANSWER MODE ───────────────────────────────────────────────────────────────
//

/// Whether a question accepts one option or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerMode {
    /// Choosing an option replaces the previous choice.
    #[default]
    Single,
    /// Choosing an option toggles it in or out of the selection.
    Multiple,
}

impl AnswerMode {
    #[must_use]
    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

//
// ─── OPTION ────────────────────────────────────────────────────────────────────
//

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub id: OptionId,
    pub text: RichText,
    /// `None` when the payload carried no correctness flag (practice payloads
    /// usually hide it). Unknown is never treated as correct.
    pub is_correct: Option<bool>,
    pub image: Option<String>,
}

impl AnswerOption {
    #[must_use]
    pub fn new(id: OptionId, text: RichText) -> Self {
        Self {
            id,
            text,
            is_correct: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_correct(mut self, is_correct: bool) -> Self {
        self.is_correct = Some(is_correct);
        self
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct == Some(true)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A normalized exam question.
///
/// Built once by the mapper and not mutated afterwards; selection state lives
/// next to it in the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// 1-based display number.
    pub number: usize,
    pub id: QuestionId,
    pub text: RichText,
    pub options: Vec<AnswerOption>,
    pub mode: AnswerMode,
    pub domain: Option<String>,
    pub explanation: Option<RichText>,
    /// Marks awarded by the scoring backend, present only on scored payloads.
    pub marks_scored: Option<f64>,
}

impl Question {
    #[must_use]
    pub fn new(number: usize, id: QuestionId, text: RichText) -> Self {
        Self {
            number,
            id,
            text,
            options: Vec::new(),
            mode: AnswerMode::Single,
            domain: None,
            explanation: None,
            marks_scored: None,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<AnswerOption>) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: AnswerMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Indices of the options flagged correct.
    #[must_use]
    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_correct())
            .map(|(index, _)| index)
            .collect()
    }

    /// True when at least one option carries a correctness flag.
    #[must_use]
    pub fn has_answer_key(&self) -> bool {
        self.options.iter().any(|option| option.is_correct.is_some())
    }

    #[must_use]
    pub fn option_index(&self, id: &OptionId) -> Option<usize> {
        self.options.iter().position(|option| &option.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str, correct: Option<bool>) -> AnswerOption {
        AnswerOption {
            id: OptionId::new(id),
            text: RichText::Plain(id.to_uppercase()),
            is_correct: correct,
            image: None,
        }
    }

    #[test]
    fn unknown_correctness_is_not_correct() {
        let question = Question::new(1, QuestionId::new("q1"), RichText::Plain("Q".into()))
            .with_options(vec![
                option("a", Some(true)),
                option("b", None),
                option("c", Some(false)),
                option("d", Some(true)),
            ]);

        assert_eq!(question.correct_indices(), vec![0, 3]);
        assert!(question.has_answer_key());
        assert_eq!(question.option_index(&OptionId::new("c")), Some(2));
    }

    #[test]
    fn question_without_flags_has_no_answer_key() {
        let question = Question::new(1, QuestionId::new("q1"), RichText::Plain("Q".into()))
            .with_options(vec![option("a", None)]);
        assert!(!question.has_answer_key());
        assert!(question.correct_indices().is_empty());
    }
}
