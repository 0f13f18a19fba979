#![forbid(unsafe_code)]

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod practice;
pub mod review;
pub mod sync;

pub use exam_core::Clock;

pub use backend::{ExamBackend, HttpExamBackend, InMemoryBackend};
pub use config::BackendConfig;
pub use context::{AuthContext, LoadingGuard, LoadingTracker, SessionContext};
pub use error::{BackendError, ConfigError, SessionError};
pub use practice::{PracticeService, PracticeSession};
pub use review::ReviewService;
pub use sync::SelectionSync;
