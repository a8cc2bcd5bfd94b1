//! Errors as they are presented to the caller of the engine: a stable error code,
//! a human readable message and structured metadata.

pub mod common;
mod panic_hook;

pub use panic_hook::{PANIC_EXIT_CODE, set_panic_hook};

use serde::{Deserialize, Serialize};
use std::{borrow::Cow, io};

/// An error with a stable code that callers can match on.
pub trait UserFacingError: Serialize {
    const ERROR_CODE: &'static str;

    /// HTTP status the web framework answers with.
    const STATUS_CODE: u16;

    fn message(&self) -> String;
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct KnownError {
    pub message: String,
    pub meta: serde_json::Value,
    pub error_code: Cow<'static, str>,
    pub status_code: u16,
}

impl KnownError {
    pub fn new<T: UserFacingError>(inner: T) -> KnownError {
        KnownError {
            message: inner.message(),
            meta: serde_json::to_value(&inner).unwrap_or(serde_json::Value::Null),
            error_code: Cow::from(T::ERROR_CODE),
            status_code: T::STATUS_CODE,
        }
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct UnknownError {
    pub message: String,
    pub backtrace: Option<String>,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(untagged)]
enum ErrorType {
    Known(KnownError),
    Unknown(UnknownError),
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    is_panic: bool,
    #[serde(flatten)]
    inner: ErrorType,
}

impl Error {
    pub fn as_known(&self) -> Option<&KnownError> {
        match &self.inner {
            ErrorType::Known(err) => Some(err),
            ErrorType::Unknown(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match &self.inner {
            ErrorType::Known(err) => &err.message,
            ErrorType::Unknown(err) => &err.message,
        }
    }

    pub fn is_panic(&self) -> bool {
        self.is_panic
    }

    /// Status code for the framework's error response. Unknown errors are server errors.
    pub fn status_code(&self) -> u16 {
        match &self.inner {
            ErrorType::Known(err) => err.status_code,
            ErrorType::Unknown(_) => 500,
        }
    }

    /// Writes the error as one JSON line and flushes, so line-oriented readers of the
    /// stream receive it whole.
    pub fn write_json_line<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }

    pub fn new_non_panic_with_current_backtrace(message: String) -> Self {
        Error {
            inner: ErrorType::Unknown(UnknownError {
                message,
                backtrace: Some(format!("{:?}", backtrace::Backtrace::new())),
            }),
            is_panic: false,
        }
    }

    /// Construct a new UnknownError from a panic, formatting its payload and location.
    pub fn new_in_panic_hook(panic_info: &std::panic::PanicHookInfo<'_>) -> Self {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| -> String { (*s).to_owned() })
            .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.to_owned()))
            .unwrap_or_else(|| "<unknown panic>".to_owned());

        let backtrace = Some(format!("{:?}", backtrace::Backtrace::new()));
        let location = panic_info
            .location()
            .map(|loc| format!("{loc}"))
            .unwrap_or_else(|| "<unknown location>".to_owned());

        Error {
            inner: ErrorType::Unknown(UnknownError {
                message: format!("[{location}] {message}"),
                backtrace,
            }),
            is_panic: true,
        }
    }
}

impl From<KnownError> for Error {
    fn from(known_error: KnownError) -> Self {
        Error {
            is_panic: false,
            inner: ErrorType::Known(known_error),
        }
    }
}

impl From<UnknownError> for Error {
    fn from(unknown_error: UnknownError) -> Self {
        Error {
            is_panic: false,
            inner: ErrorType::Unknown(unknown_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::InvalidQueryArgument;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn known_errors_serialize_flat() {
        let err = Error::from(KnownError::new(InvalidQueryArgument {
            argument: "$groupBy".to_owned(),
            reason: "$groupBy must be a string".to_owned(),
        }));

        let rendered = serde_json::to_value(&err).unwrap();

        assert_eq!(
            rendered,
            json!({
                "isPanic": false,
                "message": "$groupBy must be a string",
                "meta": { "argument": "$groupBy", "reason": "$groupBy must be a string" },
                "error_code": "BadRequest",
                "status_code": 400,
            })
        );
    }

    #[test]
    fn json_lines_hold_exactly_one_error() {
        let err = Error::from(UnknownError {
            message: "line one\nline two".to_owned(),
            backtrace: None,
        });
        let mut out = Vec::new();

        err.write_json_line(&mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.ends_with('\n'));
        assert_eq!(serde_json::from_str::<Error>(out.trim_end()).unwrap(), err);
    }

    #[test]
    fn unknown_errors_are_server_errors() {
        let err = Error::from(UnknownError {
            message: "boom".to_owned(),
            backtrace: None,
        });

        assert_eq!(err.status_code(), 500);
        assert!(err.as_known().is_none());
        assert_eq!(err.message(), "boom");
    }
}
