//! Client query objects and the classification of their keys.

mod key;

pub use key::*;

/// A client supplied filter object. Key order is preserved.
pub type QueryObject = serde_json::Map<String, serde_json::Value>;

/// The special key carrying the grouping field.
pub const GROUP_BY: &str = "$groupBy";
