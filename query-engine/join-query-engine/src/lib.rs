pub mod cli;
pub mod error;
pub mod logger;
pub mod opt;

use error::EngineError;

#[macro_use]
extern crate tracing;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum LogFormat {
    Text,
    Json,
}
