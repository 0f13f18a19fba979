#![forbid(unsafe_code)]

pub mod error;
pub mod mapper;
pub mod model;
pub mod navigator;
pub mod review;
pub mod session;
pub mod time;
pub mod timer;

pub use error::Error;
pub use mapper::{MappedSession, apply_selection, map_review_record, map_view_model, parse_selected_ids};
pub use navigator::Navigator;
pub use review::{ExamOutcome, QuestionReview, QuestionStatus, ReviewReport, ReviewScreen, aggregate};
pub use session::{ExamSession, SessionError, ToggleOutcome};
pub use time::Clock;
pub use timer::{Countdown, CountdownTick};
