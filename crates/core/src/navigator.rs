/// Current-question cursor for a session.
///
/// `goto` is the only place that clamps; the step helpers just compute a
/// target and delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    current: usize,
    total: usize,
    answer_revealed: bool,
}

impl Navigator {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total,
            answer_revealed: false,
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Move to `index`, clamped to `[0, total - 1]`, and hide any revealed answer.
    ///
    /// With no questions the cursor stays at 0.
    pub fn goto(&mut self, index: isize) -> usize {
        let last = self.total.saturating_sub(1);
        self.current = usize::try_from(index).map_or(0, |index| index.min(last));
        self.answer_revealed = false;
        self.current
    }

    pub fn first(&mut self) -> usize {
        self.goto(0)
    }

    pub fn prev(&mut self) -> usize {
        self.goto(self.current_signed() - 1)
    }

    pub fn next(&mut self) -> usize {
        self.goto(self.current_signed() + 1)
    }

    pub fn last(&mut self) -> usize {
        self.goto(isize::try_from(self.total).unwrap_or(isize::MAX) - 1)
    }

    pub fn reveal_answer(&mut self) {
        self.answer_revealed = true;
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total
    }

    fn current_signed(&self) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX)
    }
}
