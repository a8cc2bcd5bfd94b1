use super::{Hook, HookContext};
use crate::{JoinQueryError, query_document::GROUP_BY};
use tracing::debug;

/// Turns `{ "$groupBy": "teamId" }` into the query layer's `group: ["teamId"]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupBy;

impl Hook for GroupBy {
    #[tracing::instrument(name = "group_by", skip_all, fields(service = ctx.service.as_str()))]
    fn run(&self, ctx: &mut HookContext) -> crate::Result<()> {
        let Some(query) = ctx.params.query.as_mut() else {
            return Ok(());
        };

        let Some(value) = query.get(GROUP_BY) else {
            return Ok(());
        };

        let field = value
            .as_str()
            .ok_or_else(|| JoinQueryError::invalid_argument(GROUP_BY, "$groupBy must be a string"))?
            .to_owned();

        query.shift_remove(GROUP_BY);

        debug!(field = field.as_str(), "grouping");
        ctx.params.query_options_mut().group = Some(vec![field]);

        Ok(())
    }
}
