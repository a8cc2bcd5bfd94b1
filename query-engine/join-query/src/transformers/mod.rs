//! Rewriting of association filters into the dollar notation plus the include tree
//! needed to join every referenced association.

mod flatten;
mod resolve;

pub use flatten::flatten_object_notation;
pub use resolve::{AssociationResolver, Resolution};

use crate::{
    include::IncludeTree,
    query_document::{QueryKey, QueryObject},
    schema::{EntityId, SchemaGraph, ServiceDirectory},
};
use serde_json::Value;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenQuery {
    pub query: QueryObject,
    pub include: IncludeTree,
}

pub struct QueryRewriter<'a, S, D> {
    schema: &'a S,
    resolver: AssociationResolver<'a, S, D>,
}

impl<'a, S, D> QueryRewriter<'a, S, D>
where
    S: SchemaGraph,
    D: ServiceDirectory,
{
    pub fn new(schema: &'a S, services: &'a D) -> Self {
        Self {
            schema,
            resolver: AssociationResolver::new(schema, services),
        }
    }

    /// Rewrites `query` issued against `entity`. `include` seeds the include tree, nodes
    /// it already contains are extended rather than duplicated.
    pub fn rewrite(&self, entity: &EntityId, query: QueryObject, include: IncludeTree) -> crate::Result<RewrittenQuery> {
        let query = flatten_object_notation(self.schema, entity, query);
        let (query, include) = self.rewrite_object(entity, query, include)?;

        Ok(RewrittenQuery { query, include })
    }

    /// Rewrites every key of `query`, threading the include tree from key to key and
    /// through combinator branches.
    fn rewrite_object(
        &self,
        entity: &EntityId,
        query: QueryObject,
        include: IncludeTree,
    ) -> crate::Result<(QueryObject, IncludeTree)> {
        query
            .into_iter()
            .try_fold((QueryObject::new(), include), |(mut rewritten, include), (key, value)| {
                let include = match QueryKey::parse(&key, &value) {
                    QueryKey::Combinator(_) => {
                        let (branches, include) = self.rewrite_branches(entity, value, include)?;
                        rewritten.insert(key, branches);
                        include
                    }
                    QueryKey::Path(path) => match self.resolver.resolve(entity, path.segments(), include)? {
                        (Resolution::Association, include) => {
                            let key = if path.is_dollar_wrapped() { key } else { path.to_dollar_key() };
                            rewritten.insert(key, value);
                            include
                        }
                        (Resolution::Field, include) => {
                            trace!(key = key.as_str(), "path does not start with an association");
                            rewritten.insert(key, value);
                            include
                        }
                    },
                    QueryKey::Field => {
                        rewritten.insert(key, value);
                        include
                    }
                };

                crate::Result::Ok((rewritten, include))
            })
    }

    fn rewrite_branches(
        &self,
        entity: &EntityId,
        branches: Value,
        include: IncludeTree,
    ) -> crate::Result<(Value, IncludeTree)> {
        let Value::Array(branches) = branches else {
            return Ok((branches, include));
        };

        let (branches, include) =
            branches
                .into_iter()
                .try_fold((Vec::new(), include), |(mut rewritten, include), branch| {
                    let include = match branch {
                        Value::Object(branch) => {
                            let (branch, include) = self.rewrite_object(entity, branch, include)?;
                            rewritten.push(Value::Object(branch));
                            include
                        }
                        other => {
                            rewritten.push(other);
                            include
                        }
                    };

                    crate::Result::Ok((rewritten, include))
                })?;

        Ok((Value::Array(branches), include))
    }
}
