mod components;
mod home;
mod practice;
mod review;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use components::{QuestionCard, ReviewQuestion, ReviewSummary, TimeUpBanner, TimerBadge};
pub use home::HomeView;
pub use practice::PracticeView;
pub use review::ReviewView;
pub use state::{ViewState, view_state_from_resource};
