//! Hooks run by the web framework before a service method executes, and the request
//! context they operate on.

mod group_by;
mod join_query;

pub use group_by::GroupBy;
pub use join_query::JoinQuery;

use crate::{include::IncludeTree, query_document::QueryObject};
use serde::{Deserialize, Serialize};

/// A before-hook. Hooks mutate the context in place and leave it untouched when they fail.
pub trait Hook {
    fn run(&self, ctx: &mut HookContext) -> crate::Result<()>;
}

/// Request scoped context handed to a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookContext {
    /// Path of the service the request is issued against.
    pub service: String,

    #[serde(default)]
    pub params: Params,
}

impl HookContext {
    pub fn new(service: impl Into<String>, query: QueryObject) -> Self {
        Self {
            service: service.into(),
            params: Params {
                query: Some(query),
                query_options: None,
            },
        }
    }

    pub fn with_include(mut self, include: impl Into<IncludeTree>) -> Self {
        self.params.query_options_mut().include = Some(include.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QueryObject>,

    /// Configuration passed through to the relational query layer.
    #[serde(rename = "sequelize", default, skip_serializing_if = "Option::is_none")]
    pub query_options: Option<QueryOptions>,
}

impl Params {
    pub fn query_options_mut(&mut self) -> &mut QueryOptions {
        self.query_options.get_or_insert_with(QueryOptions::default)
    }

    pub fn include(&self) -> Option<&IncludeTree> {
        self.query_options.as_ref().and_then(|options| options.include.as_ref())
    }

    pub fn group(&self) -> Option<&[String]> {
        self.query_options.as_ref().and_then(|options| options.group.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<IncludeTree>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Vec<String>>,

    /// Any other option, passed through untouched.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}
