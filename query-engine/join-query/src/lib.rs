//! Query rewriting hooks for association filters.
//!
//! Clients filter on associated entities with dotted keys (`"team.name"`), dollar keys
//! (`"$team.name$"`) or nested objects (`{ team: { name } }`). The [`JoinQuery`] hook
//! rewrites all three into the dollar notation the relational query layer understands,
//! and builds the `include` tree that makes the layer join the referenced associations.
//! The [`GroupBy`] hook translates `$groupBy` into a grouping directive.

pub mod hooks;
pub mod include;
pub mod query_document;
pub mod schema;
pub mod transformers;

mod error;

pub use error::JoinQueryError;
pub use hooks::{GroupBy, Hook, HookContext, JoinQuery, Params, QueryOptions};
pub use include::{IncludeNode, IncludeTree};
pub use query_document::QueryObject;
pub use schema::{Application, EntityId, SchemaGraph, ServiceDirectory};
pub use transformers::{QueryRewriter, RewrittenQuery};

pub type Result<T> = std::result::Result<T, JoinQueryError>;
