//! Projection Builder
//!
//! Renders `RETURN <fields>`. Explicit return fields win; positional entries
//! are mapped to the resolved alias of the node at that position and any
//! other entry is passed through as a literal. Without explicit fields the
//! projection falls back to whatever the query binds.

use crate::query_builder::positional_field;

use super::compile_ctx::CompileContext;
use super::condition_builder::PropertyFilter;
use super::pattern_builder::push_unique;

/// What to project when the builder has no explicit return fields and
/// nothing is referenced by relationships or conditions.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ReturnFallback<'s> {
    /// The configured fallback alias (`n` by default)
    Rows,
    /// The node whose count is being limited
    Primary(&'s str),
}

pub(crate) fn build_return(
    ctx: &CompileContext<'_>,
    filters: &[PropertyFilter<'_>],
    fallback: ReturnFallback<'_>,
) -> String {
    format!("RETURN {}", return_fields(ctx, filters, fallback).join(", "))
}

pub(crate) fn return_fields(
    ctx: &CompileContext<'_>,
    filters: &[PropertyFilter<'_>],
    fallback: ReturnFallback<'_>,
) -> Vec<String> {
    let explicit = explicit_fields(ctx);
    if !explicit.is_empty() {
        return explicit;
    }

    let referenced = referenced_aliases(ctx, filters);
    if !referenced.is_empty() {
        return referenced;
    }

    match fallback {
        ReturnFallback::Rows => vec![ctx.config.fallback_alias.clone()],
        ReturnFallback::Primary(alias) => vec![alias.to_string()],
    }
}

fn explicit_fields(ctx: &CompileContext<'_>) -> Vec<String> {
    let nodes = &ctx.state.nodes;
    let mut fields = Vec::new();
    for field in &ctx.state.return_fields {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        match positional_field(field, nodes.len()) {
            Some(position) => push_unique(&mut fields, ctx.alias_of(&nodes[position].id)),
            None => push_unique(&mut fields, field),
        }
    }
    fields
}

/// Aliases touched by active relationships or renderable conditions, in
/// first-seen order.
fn referenced_aliases(ctx: &CompileContext<'_>, filters: &[PropertyFilter<'_>]) -> Vec<String> {
    let mut aliases = Vec::new();
    for (_, rel) in &ctx.active {
        push_unique(&mut aliases, ctx.alias_of(&rel.from));
        push_unique(&mut aliases, ctx.alias_of(&rel.to));
    }
    for filter in filters.iter().filter(|f| f.known_node) {
        push_unique(&mut aliases, filter.alias);
    }
    aliases
}
