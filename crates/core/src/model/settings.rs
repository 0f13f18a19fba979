/// Session-wide parameters carried by a test view model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExamSettings {
    pub duration_secs: u32,
    /// Pass mark as a percentage (0..=100). `None` when the payload omitted it.
    pub pass_percentage: Option<f64>,
    /// Total marks the exam is scored out of. `None` when omitted.
    pub total_marks: Option<f64>,
    pub can_pause_and_resume: bool,
    pub is_paused: bool,
}

impl ExamSettings {
    #[must_use]
    pub fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, pass_percentage: f64, total_marks: f64) -> Self {
        self.pass_percentage = Some(pass_percentage);
        self.total_marks = Some(total_marks);
        self
    }
}
