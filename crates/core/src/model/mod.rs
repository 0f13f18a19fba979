mod ids;
mod question;
mod selection;
mod settings;
mod text;

pub use ids::{OptionId, ParseIdError, QuestionId, TestId};
pub use question::{AnswerMode, AnswerOption, Question};
pub use selection::Selection;
pub use settings::ExamSettings;
pub use text::RichText;
