use thiserror::Error;

use crate::model::ParseIdError;
use crate::session::SessionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestId;

    #[test]
    fn wraps_component_errors() {
        let err: Error = "x".parse::<TestId>().unwrap_err().into();
        assert!(matches!(err, Error::ParseId(_)));

        let err: Error = SessionError::NoQuestions.into();
        assert_eq!(err.to_string(), "session has no questions");
    }
}
