use std::collections::BTreeSet;

use crate::model::ids::OptionId;
use crate::model::question::{AnswerMode, Question};

/// The options a user has chosen for one question, by option index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection(BTreeSet<usize>);

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Apply a user choice.
    ///
    /// `Multiple` toggles the index in or out. `Single` replaces the whole
    /// selection, so once something is chosen it never becomes empty again.
    /// Indices outside `0..option_count` are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, mode: AnswerMode, index: usize, option_count: usize) -> bool {
        if index >= option_count {
            return false;
        }
        match mode {
            AnswerMode::Multiple => {
                if !self.0.remove(&index) {
                    self.0.insert(index);
                }
                true
            }
            AnswerMode::Single => {
                if self.0.len() == 1 && self.0.contains(&index) {
                    return false;
                }
                self.0.clear();
                self.0.insert(index);
                true
            }
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Resolve indices to option ids, skipping any that fall outside the question.
    #[must_use]
    pub fn option_ids(&self, question: &Question) -> Vec<OptionId> {
        self.indices()
            .filter_map(|index| question.options.get(index).map(|option| option.id.clone()))
            .collect()
    }
}
