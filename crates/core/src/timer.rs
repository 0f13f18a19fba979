use crate::model::ExamSettings;

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    Running { remaining_secs: u32 },
    Paused { remaining_secs: u32 },
    Expired,
}

/// Exam countdown in whole seconds, floored at zero.
///
/// The owner calls `tick` once per second while the practice screen is
/// mounted. Pausing is only honoured when the exam allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    paused: bool,
    can_pause: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            paused: false,
            can_pause: false,
        }
    }

    /// Countdown configured from a view model, starting paused when the
    /// backend says the attempt is paused and pausing is allowed.
    #[must_use]
    pub fn from_settings(settings: &ExamSettings) -> Self {
        Self {
            duration_secs: settings.duration_secs,
            remaining_secs: settings.duration_secs,
            paused: settings.can_pause_and_resume && settings.is_paused,
            can_pause: settings.can_pause_and_resume,
        }
    }

    pub fn tick(&mut self) -> CountdownTick {
        if self.duration_secs == 0 {
            return CountdownTick::Running { remaining_secs: 0 };
        }
        if self.is_expired() {
            return CountdownTick::Expired;
        }
        if self.paused {
            return CountdownTick::Paused {
                remaining_secs: self.remaining_secs,
            };
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    /// An exam without a configured duration never expires.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.duration_secs > 0 && self.remaining_secs == 0
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn can_pause(&self) -> bool {
        self.can_pause
    }

    /// Returns whether the countdown is now paused.
    pub fn pause(&mut self) -> bool {
        if self.can_pause && !self.is_expired() {
            self.paused = true;
        }
        self.paused
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}
