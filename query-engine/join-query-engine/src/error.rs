use join_query::JoinQueryError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{}", _0)]
    JoinQuery(JoinQueryError),

    #[error("Unable to read {}: {}", path.display(), source)]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Invalid hook context: {}", _0)]
    JsonDecode(serde_json::Error),

    #[error("{}", _0)]
    Serialization(String),

    #[error("{}", _0)]
    Configuration(String),
}

impl EngineError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    pub fn configuration(message: impl ToString) -> Self {
        Self::Configuration(message.to_string())
    }

    pub fn into_user_facing_error(self) -> user_facing_errors::Error {
        match self {
            EngineError::JoinQuery(err) => err.into(),
            other => user_facing_errors::Error::new_non_panic_with_current_backtrace(other.to_string()),
        }
    }

    pub fn render_as_json(self) -> std::io::Result<()> {
        let error = self.into_user_facing_error();

        // Callers read stderr line by line.
        error.write_json_line(std::io::LineWriter::new(std::io::stderr().lock()))
    }
}

impl From<JoinQueryError> for EngineError {
    fn from(e: JoinQueryError) -> Self {
        EngineError::JoinQuery(e)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::JsonDecode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn library_errors_keep_their_code() {
        let err = EngineError::from(JoinQueryError::invalid_argument("$groupBy", "$groupBy must be a string"));
        let rendered = err.into_user_facing_error();

        assert_eq!(rendered.as_known().map(|err| err.error_code.as_ref()), Some("BadRequest"));
        assert_eq!(rendered.status_code(), 400);
    }

    #[test]
    fn other_errors_are_unknown() {
        let err = EngineError::io(
            Path::new("ctx.json"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );

        expect!["Unable to read ctx.json: no such file"].assert_eq(&err.to_string());

        let rendered = err.into_user_facing_error();
        assert!(rendered.as_known().is_none());
        assert!(!rendered.is_panic());
    }
}
