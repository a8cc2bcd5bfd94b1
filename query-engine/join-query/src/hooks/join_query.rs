use super::{Hook, HookContext};
use crate::{
    JoinQueryError,
    schema::{SchemaGraph, ServiceDirectory},
    transformers::QueryRewriter,
};
use tracing::debug;

/// Lets clients filter on associated entities with `"team.name"`, `"$team.name$"` or
/// `{ team: { name } }`. Every such filter is rewritten to the dollar notation and the
/// associations it traverses are added to the query layer's `include`.
pub struct JoinQuery<'a, S, D> {
    schema: &'a S,
    services: &'a D,
}

impl<'a, S, D> JoinQuery<'a, S, D>
where
    S: SchemaGraph,
    D: ServiceDirectory,
{
    pub fn new(schema: &'a S, services: &'a D) -> Self {
        Self { schema, services }
    }
}

impl<S, D> Hook for JoinQuery<'_, S, D>
where
    S: SchemaGraph,
    D: ServiceDirectory,
{
    #[tracing::instrument(name = "join_query", skip_all, fields(service = ctx.service.as_str()))]
    fn run(&self, ctx: &mut HookContext) -> crate::Result<()> {
        let service = self
            .services
            .service(&ctx.service)
            .ok_or_else(|| JoinQueryError::unknown_service(&ctx.service))?;

        let query = ctx.params.query.clone().unwrap_or_default();
        let provided = ctx.params.include().cloned().unwrap_or_default();
        let had_include = ctx.params.include().is_some();

        let rewritten = QueryRewriter::new(self.schema, self.services).rewrite(service.schema(), query, provided)?;

        debug!(includes = rewritten.include.len(), "rewrote association filters");

        ctx.params.query = Some(rewritten.query);

        if had_include || !rewritten.include.is_empty() {
            ctx.params.query_options_mut().include = Some(rewritten.include);
        }

        Ok(())
    }
}
