use crate::{
    JoinQueryError,
    include::IncludeTree,
    schema::{EntityId, SchemaGraph, ServiceDirectory},
};
use tracing::debug;

/// Outcome of resolving one path against the schema graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The path starts with at least one association.
    Association,
    /// The path is a field of the entity itself.
    Field,
}

/// Resolves association chains and grows the include tree along them.
pub struct AssociationResolver<'a, S, D> {
    schema: &'a S,
    services: &'a D,
}

impl<'a, S, D> AssociationResolver<'a, S, D>
where
    S: SchemaGraph,
    D: ServiceDirectory,
{
    pub fn new(schema: &'a S, services: &'a D) -> Self {
        Self { schema, services }
    }

    /// Resolves `segments` starting at `entity`, adding one include node per association
    /// hop to `include` (reusing existing nodes) and returning the grown tree.
    ///
    /// The last segment is always a field, so a path needs at least two segments to
    /// reference an association.
    pub fn resolve(
        &self,
        entity: &EntityId,
        segments: &[String],
        mut include: IncludeTree,
    ) -> crate::Result<(Resolution, IncludeTree)> {
        let (head, rest) = match segments.split_first() {
            Some((head, rest)) if !rest.is_empty() => (head, rest),
            _ => return Ok((Resolution::Field, include)),
        };

        let Some(association) = self.schema.association(entity, head) else {
            return Ok((Resolution::Field, include));
        };

        let service = self
            .services
            .service_for(&association.target)
            .ok_or_else(|| JoinQueryError::associated_service_not_found(head, &association.target))?;

        debug!(
            entity = entity.as_str(),
            association = head.as_str(),
            service = service.path(),
            "resolved association"
        );

        let node = include.find_or_insert(&association.target, &association.name);
        let children = std::mem::take(&mut node.children);
        let (_, children) = self.resolve(service.schema(), rest, children)?;
        node.children = children;

        Ok((Resolution::Association, include))
    }
}
