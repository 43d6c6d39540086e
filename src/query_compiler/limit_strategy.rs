//! Limit Strategy
//!
//! Two limit semantics are supported:
//!
//! - **rows** caps result rows with a trailing `LIMIT`
//! - **nodes** caps distinct primary entities first and only then expands
//!   relationships from them:
//!
//! ```text
//! MATCH (p:Person) [WHERE <primary filters>]
//! WITH p LIMIT 10
//! MATCH (p)-[r1:WORKS_AT]->(c:Company)
//! [MATCH ... | OPTIONAL MATCH ...]
//! [WHERE <other filters>]
//! RETURN ...
//! ```
//!
//! Nodes mode needs a limit, at least one node and at least one active
//! relationship; anything else compiles in rows mode.

use crate::query_builder::{LimitMode, QueryNode};

use super::common::node_pattern;
use super::compile_ctx::CompileContext;
use super::condition_builder::build_where;
use super::pattern_builder::{build_match_clauses, render_relationship, LabelPolicy};
use super::projection_builder::{build_return, ReturnFallback};

#[derive(Debug, Clone, Copy)]
pub(crate) enum QueryShape<'a> {
    Rows { limit: Option<&'a str> },
    Nodes { primary: &'a QueryNode, limit: &'a str },
}

/// Pick the query shape for a compile request.
pub(crate) fn choose_shape<'a>(ctx: &CompileContext<'a>) -> QueryShape<'a> {
    let limit = Some(ctx.state.limit.trim()).filter(|l| !l.is_empty());

    let (LimitMode::Nodes, Some(limit)) = (ctx.state.limit_mode, limit) else {
        return QueryShape::Rows { limit };
    };
    if !ctx.has_relationships() {
        log::debug!("limit_strategy: nodes mode without relationships, limiting rows");
        return QueryShape::Rows { limit: Some(limit) };
    }

    let primary = ctx
        .groups
        .primary
        .first()
        .and_then(|rel| ctx.node(&rel.from))
        .or_else(|| ctx.state.nodes.first());

    match primary {
        Some(primary) => QueryShape::Nodes { primary, limit },
        None => QueryShape::Rows { limit: Some(limit) },
    }
}

/// Full pattern, `WHERE`, `RETURN`, then an optional trailing `LIMIT`.
pub(crate) fn build_rows_query(ctx: &CompileContext<'_>, limit: Option<&str>) -> Vec<String> {
    let filters = ctx.property_filters();
    let mut clauses = build_match_clauses(ctx);
    if let Some(predicate) = build_where(&filters) {
        clauses.push(format!("WHERE {}", predicate));
    }
    clauses.push(build_return(ctx, &filters, ReturnFallback::Rows));
    if let Some(limit) = limit {
        clauses.push(format!("LIMIT {}", limit));
    }
    clauses
}

/// Limit distinct primary entities, then expand relationships from them.
pub(crate) fn build_nodes_query<'a>(
    ctx: &CompileContext<'a>,
    primary: &'a QueryNode,
    limit: &str,
) -> Vec<String> {
    let filters = ctx.property_filters();
    let primary_alias = ctx.alias_of(&primary.id);
    let (primary_filters, other_filters): (Vec<_>, Vec<_>) = filters
        .iter()
        .partition(|filter| filter.node_id == primary.id);

    log::debug!(
        "limit_strategy: limiting {} '{}' entities to {}",
        primary.label.as_deref().unwrap_or("unlabeled"),
        primary_alias,
        limit
    );

    let mut clauses = vec![format!(
        "MATCH {}",
        node_pattern(primary_alias, primary.label.as_deref())
    )];
    if let Some(predicate) = build_where(primary_filters) {
        clauses.push(format!("WHERE {}", predicate));
    }
    clauses.push(format!("WITH {} LIMIT {}", primary_alias, limit));

    let mut policy = LabelPolicy::OmitFor {
        node_id: primary.id.as_str(),
    };
    let groups = &ctx.groups;
    if !groups.primary.is_empty() {
        let patterns: Vec<String> = groups
            .primary
            .iter()
            .map(|rel| render_relationship(ctx, rel, &mut policy))
            .collect();
        clauses.push(format!("MATCH {}", patterns.join(", ")));
    }
    for rel in &groups.chained {
        clauses.push(format!("MATCH {}", render_relationship(ctx, rel, &mut policy)));
    }
    for rel in &groups.optional {
        clauses.push(format!(
            "OPTIONAL MATCH {}",
            render_relationship(ctx, rel, &mut policy)
        ));
    }

    if let Some(predicate) = build_where(other_filters) {
        clauses.push(format!("WHERE {}", predicate));
    }
    clauses.push(build_return(
        ctx,
        &filters,
        ReturnFallback::Primary(primary_alias),
    ));
    clauses
}
